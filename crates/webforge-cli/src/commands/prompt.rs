use std::path::Path;

use anyhow::Result;
use webforge_core::chat::{BufferContext, build_prompt};

use super::utils::read_input;

pub fn run(utterance: &str, file: Option<&str>, code: Option<&Path>) -> Result<()> {
    let code = code.map(read_input).transpose()?.unwrap_or_default();
    println!("{}", build_prompt(utterance, BufferContext::new(file, &code)));
    Ok(())
}
