use std::path::Path;

use anyhow::{Context, Result};
use webforge_core::preview::{PreviewGenerator, StylesheetTable};

use super::utils::read_input;

pub fn run(file: &Path, output: Option<&Path>, css: &[String]) -> Result<()> {
    let source = read_input(file)?;
    let html = PreviewGenerator::new(stylesheets(css)?).generate(&source);

    match output {
        Some(path) => {
            std::fs::write(path, &html)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("✅ Preview written to {}", path.display());
        }
        None => print!("{html}"),
    }
    Ok(())
}

/// The built-in table extended with `NAME=PATH` entries.
fn stylesheets(entries: &[String]) -> Result<StylesheetTable> {
    let mut table = StylesheetTable::default();
    for entry in entries {
        let (name, path) = entry
            .split_once('=')
            .with_context(|| format!("Expected NAME=PATH, got '{entry}'"))?;
        let css = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read stylesheet {path}"))?;
        table = table.with(name, css);
    }
    Ok(table)
}
