pub mod file;
pub mod parse;
pub mod rate;
pub mod stdin;

use serde::de::DeserializeOwned;

/// Calculator input from `--input <file.json>`, else from JSON piped on
/// stdin. `None` means the caller should build the input from flags.
pub fn load_input<T: DeserializeOwned>(
    path: Option<&str>,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        tracing::debug!(path, "reading calculator input from file");
        return Ok(Some(file::read_json(path)?));
    }
    if let Some(data) = stdin::read_stdin()? {
        tracing::debug!("reading calculator input from stdin");
        return Ok(Some(serde_json::from_value(data)?));
    }
    Ok(None)
}
