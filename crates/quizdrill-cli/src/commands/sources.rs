//! The `quizdrill sources` command.

use std::path::PathBuf;

use anyhow::Result;

use quizdrill_core::loader::load_source;
use quizdrill_sources::{create_source, load_config_from};

pub async fn execute(config_path: Option<PathBuf>) -> Result<()> {
    use comfy_table::{Cell, Table};

    let config = load_config_from(config_path.as_deref())?;
    anyhow::ensure!(!config.sources.is_empty(), "no sources configured");

    let source = create_source(&config.source);

    let mut table = Table::new();
    table.set_header(vec!["Source", "Role", "Status", "Questions", "Skipped"]);

    for (position, source_id) in config.sources.iter().enumerate() {
        let role = if position == 0 { "required" } else { "optional" };
        match load_source(source.as_ref(), source_id).await {
            Ok((questions, failures)) => {
                table.add_row(vec![
                    Cell::new(source_id),
                    Cell::new(role),
                    Cell::new("ok"),
                    Cell::new(questions.len()),
                    Cell::new(failures.len()),
                ]);
            }
            Err(error) => {
                table.add_row(vec![
                    Cell::new(source_id),
                    Cell::new(role),
                    Cell::new(format!("unavailable: {error}")),
                    Cell::new("-"),
                    Cell::new("-"),
                ]);
            }
        }
    }

    println!("{table}");
    println!("Transport: {}", source.name());

    Ok(())
}
