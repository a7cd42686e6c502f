use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

/// Reads `path`, or stdin when it is `-`.
pub fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_input_from_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "export default App;").unwrap();
        assert_eq!(read_input(file.path()).unwrap(), "export default App;");
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = read_input(Path::new("/definitely/missing.jsx")).unwrap_err();
        assert!(err.to_string().contains("/definitely/missing.jsx"));
    }
}
