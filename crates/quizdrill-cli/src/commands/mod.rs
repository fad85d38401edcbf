pub mod dedup;
pub mod init;
pub mod run;
pub mod sources;
pub mod validate;
