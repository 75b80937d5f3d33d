//! Document boundary types.
//!
//! Rich-format extraction (Word, PDF, spreadsheets) happens outside this
//! workspace; the core only receives already-extracted text together with
//! its source format. Plain-text formats load directly from disk.

use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Source format of a loaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Text,
    Docx,
    Pdf,
    Spreadsheet,
}

impl FileType {
    /// Map a file extension (without the dot) to its format.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "txt" => Some(Self::Text),
            "docx" => Some(Self::Docx),
            "pdf" => Some(Self::Pdf),
            "csv" | "xlsx" | "xls" => Some(Self::Spreadsheet),
            _ => None,
        }
    }

    /// Extensions accepted by [`Document::from_path`] and the front end.
    pub fn supported_extensions() -> &'static [&'static str] {
        &["txt", "docx", "pdf", "csv", "xlsx", "xls"]
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::Docx => "docx",
            Self::Pdf => "pdf",
            Self::Spreadsheet => "spreadsheet",
        };
        f.write_str(name)
    }
}

/// Failure to turn a file into a [`Document`].
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("unsupported file type: {0}")]
    Unsupported(String),
    #[error("no extractor available for {0} files; provide extracted text instead")]
    NoExtractor(FileType),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Extracted document content plus its source format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub content: String,
    pub file_type: FileType,
}

impl Document {
    /// Wrap already-extracted content.
    pub fn new(content: impl Into<String>, file_type: FileType) -> Self {
        Self {
            content: content.into(),
            file_type,
        }
    }

    /// Load a document from disk.
    ///
    /// Only plain-text formats (`.txt`, `.csv`) are read here; binary
    /// formats require an external extractor and return
    /// [`DocumentError::NoExtractor`].
    pub fn from_path(path: &Path) -> Result<Self, DocumentError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        let Some(file_type) = FileType::from_extension(ext) else {
            return Err(DocumentError::Unsupported(format!(".{ext}")));
        };

        if !matches!(ext.to_lowercase().as_str(), "txt" | "csv") {
            return Err(DocumentError::NoExtractor(file_type));
        }

        let content = std::fs::read_to_string(path)?;
        Ok(Self { content, file_type })
    }
}
