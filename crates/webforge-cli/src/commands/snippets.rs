use std::path::Path;

use anyhow::Result;
use webforge_core::chat::extract_snippets;

use super::utils::read_input;

pub fn run(file: &Path) -> Result<()> {
    let reply = read_input(file)?;
    let snippets = extract_snippets(&reply);
    if snippets.is_empty() {
        eprintln!("No code blocks found");
    }
    println!("{}", serde_json::to_string_pretty(&snippets)?);
    Ok(())
}
