//! The `quizdrill init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create quizdrill.toml
    if std::path::Path::new("quizdrill.toml").exists() {
        println!("quizdrill.toml already exists, skipping.");
    } else {
        std::fs::write("quizdrill.toml", SAMPLE_CONFIG)?;
        println!("Created quizdrill.toml");
    }

    // Create example bank
    std::fs::create_dir_all("banks")?;
    let bank_path = std::path::Path::new("banks/questions.csv");
    if bank_path.exists() {
        println!("banks/questions.csv already exists, skipping.");
    } else {
        std::fs::write(bank_path, SAMPLE_BANK)?;
        println!("Created banks/questions.csv");
    }

    println!("\nNext steps:");
    println!("  1. Add your own questions to banks/questions.csv");
    println!("  2. Run: quizdrill validate --bank banks/questions.csv");
    println!("  3. Run: quizdrill run");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizdrill configuration

sources = ["questions.csv"]
session_size = 30
shuffle_options = false
output_dir = "./quizdrill-results"

[source]
type = "fs"
root = "banks"
"#;

const SAMPLE_BANK: &str = r#"id,prompt,option_a,option_b,option_c,option_d,answer,explanation
Q1,What is 2+2?,3,4,5,6,2,Basic arithmetic.
Q2,Which planet is closest to the sun?,Venus,Earth,Mercury,Mars,3,Mercury orbits closest.
Q3,"Which is larger, a megabyte or a kilobyte?",kilobyte,megabyte,equal,depends,2,
"#;
