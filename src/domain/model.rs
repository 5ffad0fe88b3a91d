use crate::core::document::ParsedDocument;
use crate::utils::error::{ConvertError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Source text as received, plus the file name it was selected under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    name: String,
    text: String,
}

impl RawDocument {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Decodes bytes read from storage. Anything that is not UTF-8 is a parse
    /// failure: the document cannot be well-formed XML for us.
    pub fn from_bytes(name: impl Into<String>, bytes: &[u8]) -> Result<Self> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        let text = std::str::from_utf8(bytes)
            .map_err(|e| ConvertError::parse(format!("source is not valid UTF-8: {}", e)))?;
        Ok(Self::new(name, text))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// File name without directories and without its last extension.
    pub fn base_name(&self) -> String {
        let stem = Path::new(&self.name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        if stem.is_empty() {
            "export".to_string()
        } else {
            stem.to_string()
        }
    }
}

/// The fixed column schema of the export, in column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookmarkField {
    Url,
    Title,
    BookmarkPath,
}

impl BookmarkField {
    pub const ALL: [BookmarkField; 3] = [
        BookmarkField::Url,
        BookmarkField::Title,
        BookmarkField::BookmarkPath,
    ];

    /// Key used both in the plist dictionary and as the column header.
    pub fn key(self) -> &'static str {
        match self {
            BookmarkField::Url => "URL",
            BookmarkField::Title => "Title",
            BookmarkField::BookmarkPath => "BookmarkPath",
        }
    }
}

impl fmt::Display for BookmarkField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkRecord {
    #[serde(rename = "URL", default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "Title", default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "BookmarkPath", default, skip_serializing_if = "Option::is_none")]
    pub bookmark_path: Option<String>,
}

impl BookmarkRecord {
    pub fn get(&self, field: BookmarkField) -> Option<&str> {
        match field {
            BookmarkField::Url => self.url.as_deref(),
            BookmarkField::Title => self.title.as_deref(),
            BookmarkField::BookmarkPath => self.bookmark_path.as_deref(),
        }
    }

    pub fn set(&mut self, field: BookmarkField, value: String) {
        let slot = match field {
            BookmarkField::Url => &mut self.url,
            BookmarkField::Title => &mut self.title,
            BookmarkField::BookmarkPath => &mut self.bookmark_path,
        };
        *slot = Some(value);
    }
}

/// Bookmarks in source order.
pub type BookmarkCollection = Vec<BookmarkRecord>;

/// A single-sheet projection ready for encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub sheet_name: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Xlsx,
    Csv,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "xlsx" => Ok(ExportFormat::Xlsx),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(ConvertError::config(format!(
                "unknown export format '{}' (expected xlsx or csv)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub format: ExportFormat,
}

/// Result of one successful load: everything needed to preview or export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub source_name: String,
    pub base_name: String,
    pub records: BookmarkCollection,
    pub document: ParsedDocument,
}
