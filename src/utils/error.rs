use thiserror::Error;

/// Why a well-formed document does not have the bookmark shape.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    #[error("document root is <{root}>, expected <plist> wrapping a dictionary")]
    NotAPlist { root: String },

    #[error("{path} not found")]
    Missing { path: String },

    #[error("{path} is {found}, expected {expected}")]
    WrongType {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("{path} holds an invalid {kind} value: {text:?}")]
    InvalidScalar {
        path: String,
        kind: &'static str,
        text: String,
    },
}

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Parse error: {message}")]
    ParseError { message: String },

    #[error("Extract error: {0}")]
    ExtractError(#[from] ShapeError),

    #[error("Nothing to export: the bookmark collection is empty")]
    NothingToExportError,

    #[error("Unsupported source file: {name} (expected .plist or .xml)")]
    UnsupportedSourceError { name: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("XML write error: {0}")]
    XmlWriteError(#[from] quick_xml::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Parse,
    Extract,
    NothingToExport,
    Usage,
    Io,
}

impl ConvertError {
    pub fn parse(message: impl Into<String>) -> Self {
        ConvertError::ParseError {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        ConvertError::ConfigError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ConvertError::ParseError { .. } => ErrorCategory::Parse,
            ConvertError::ExtractError(_) => ErrorCategory::Extract,
            ConvertError::NothingToExportError => ErrorCategory::NothingToExport,
            ConvertError::UnsupportedSourceError { .. } | ConvertError::ConfigError { .. } => {
                ErrorCategory::Usage
            }
            ConvertError::IoError(_)
            | ConvertError::ZipError(_)
            | ConvertError::CsvError(_)
            | ConvertError::XmlWriteError(_)
            | ConvertError::SerializationError(_) => ErrorCategory::Io,
        }
    }

    /// Message shown to the person who picked the file.
    pub fn user_friendly_message(&self) -> String {
        match self {
            ConvertError::ParseError { message } => {
                format!("Parsing failed! Please check your plist file. ({})", message)
            }
            ConvertError::ExtractError(ShapeError::Missing { path }) => format!(
                "The plist has no {}; it does not look like a bookmark profile.",
                path
            ),
            ConvertError::ExtractError(shape) => {
                format!("The plist does not have the expected bookmark layout: {}", shape)
            }
            ConvertError::NothingToExportError => {
                "There are no bookmarks to export.".to_string()
            }
            ConvertError::UnsupportedSourceError { name } => {
                format!("File is not a plist file! ({})", name)
            }
            other => other.to_string(),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Usage => 1,
            ErrorCategory::Parse => 2,
            ErrorCategory::Extract => 3,
            ErrorCategory::NothingToExport => 4,
            ErrorCategory::Io => 5,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
