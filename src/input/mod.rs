use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Document has no readable text: {0}")]
    EmptyDocument(PathBuf),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Raw text ready to be handed to the playback engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedDocument {
    pub text: String,
    pub source: String,
}

const TEXT_EXTENSIONS: [&str; 3] = ["txt", "md", "text"];

/// Load a plain-text document (`.txt`, `.md` or no extension).
///
/// Whitespace-only files are rejected here so the front-end can report them;
/// the engine itself accepts empty text.
pub fn load_text_file(path: impl AsRef<Path>) -> Result<LoadedDocument, LoadError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(LoadError::FileNotFound(path.to_path_buf()));
    }

    if let Some(extension) = path.extension().and_then(|e| e.to_str()) {
        let extension = extension.to_lowercase();
        if !TEXT_EXTENSIONS.contains(&extension.as_str()) {
            return Err(LoadError::UnsupportedFormat(extension));
        }
    }

    let text = fs::read_to_string(path)?;
    if text.trim().is_empty() {
        return Err(LoadError::EmptyDocument(path.to_path_buf()));
    }

    Ok(LoadedDocument {
        text,
        source: format!("file:{}", path.display()),
    })
}
