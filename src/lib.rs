pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::{CliConfig, PreviewMode};
pub use crate::config::{local_storage::LocalStorage, Settings};

pub use crate::core::document::{parse, ParsedDocument};
pub use crate::core::etl::{ConversionEngine, ConversionOutcome};
pub use crate::core::export::{export_table, TabularExporter};
pub use crate::core::extract::extract;
pub use crate::core::session::Converter;
pub use crate::domain::model::{
    BookmarkCollection, BookmarkField, BookmarkRecord, Conversion, ExportArtifact, ExportFormat,
    RawDocument,
};
pub use crate::utils::error::{ConvertError, ErrorCategory, Result, ShapeError};
