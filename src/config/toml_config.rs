use crate::domain::model::ExportFormat;
use crate::utils::error::{ConvertError, Result};
use crate::utils::validation::{validate_path, validate_sheet_name, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional defaults file:
///
/// ```toml
/// [output]
/// dir = "./output"
/// format = "xlsx"
/// sheet_name = "Sheet1"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    pub dir: Option<String>,
    pub format: Option<ExportFormat>,
    pub sheet_name: Option<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ConvertError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: TomlConfig = toml::from_str(content)
            .map_err(|e| ConvertError::config(format!("TOML parsing error: {}", e)))?;
        config.validate()?;
        Ok(config)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(dir) = &self.output.dir {
            validate_path("output.dir", dir)?;
        }
        if let Some(sheet_name) = &self.output.sheet_name {
            validate_sheet_name("output.sheet_name", sheet_name)?;
        }
        Ok(())
    }
}
