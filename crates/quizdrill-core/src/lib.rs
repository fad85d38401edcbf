//! quizdrill-core: bank parsing, session selection, and the quiz state machine.
//!
//! This crate defines the fundamental data model, traits, and session logic
//! that the entire quizdrill system builds on.

pub mod error;
pub mod loader;
pub mod model;
pub mod parser;
pub mod report;
pub mod selector;
pub mod session;
pub mod shuffle;
pub mod traits;
