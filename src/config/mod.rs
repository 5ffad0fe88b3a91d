#[cfg(feature = "cli")]
pub mod cli;
pub mod local_storage;
pub mod toml_config;

use crate::core::export::DEFAULT_SHEET_NAME;
use crate::core::ConfigProvider;
use crate::domain::model::ExportFormat;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_sheet_name, Validate};
use toml_config::TomlConfig;

pub const DEFAULT_OUTPUT_DIR: &str = "./output";

/// Effective output settings after merging the config file and flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub output_dir: String,
    pub format: ExportFormat,
    pub sheet_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_dir: DEFAULT_OUTPUT_DIR.to_string(),
            format: ExportFormat::default(),
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
        }
    }
}

impl Settings {
    /// File values replace the built-in defaults.
    pub fn with_file(mut self, file: &TomlConfig) -> Self {
        if let Some(dir) = &file.output.dir {
            self.output_dir = dir.clone();
        }
        if let Some(format) = file.output.format {
            self.format = format;
        }
        if let Some(sheet_name) = &file.output.sheet_name {
            self.sheet_name = sheet_name.clone();
        }
        self
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_path("output_dir", &self.output_dir)?;
        validate_sheet_name("sheet_name", &self.sheet_name)?;
        Ok(())
    }
}

impl ConfigProvider for Settings {
    fn output_dir(&self) -> &str {
        &self.output_dir
    }

    fn format(&self) -> ExportFormat {
        self.format
    }

    fn sheet_name(&self) -> &str {
        &self.sheet_name
    }
}
