use crate::config::toml_config::TomlConfig;
use crate::config::Settings;
use crate::domain::model::ExportFormat;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PreviewMode {
    /// Header plus one tab-separated line per bookmark
    Table,
    /// Pretty JSON array of bookmarks
    Json,
    /// The parsed source document
    Source,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "plist2xlsx")]
#[command(about = "Convert the AllowListBookmarks of a plist profile into a spreadsheet")]
pub struct CliConfig {
    /// Source .plist or .xml file
    pub input: String,

    /// Directory the spreadsheet is written to [default: ./output]
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// Spreadsheet format [default: xlsx]
    #[arg(short, long, value_enum, ignore_case = true)]
    pub format: Option<ExportFormat>,

    /// Worksheet name [default: Sheet1]
    #[arg(long)]
    pub sheet_name: Option<String>,

    /// Print the extracted bookmarks to stdout
    #[arg(long, value_enum)]
    pub preview: Option<PreviewMode>,

    /// Only parse and extract; do not write a spreadsheet
    #[arg(long)]
    pub no_export: bool,

    /// TOML file with output defaults
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl CliConfig {
    /// Built-in defaults, then the config file, then explicit flags.
    pub fn settings(&self) -> Result<Settings> {
        let mut settings = Settings::default();
        if let Some(path) = &self.config {
            let file = TomlConfig::from_file(path)?;
            settings = settings.with_file(&file);
        }

        if let Some(dir) = &self.output_dir {
            settings.output_dir = dir.clone();
        }
        if let Some(format) = self.format {
            settings.format = format;
        }
        if let Some(sheet_name) = &self.sheet_name {
            settings.sheet_name = sheet_name.clone();
        }

        settings.validate()?;
        Ok(settings)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("input", &self.input)?;
        if let Some(config) = &self.config {
            validate_path("config", config)?;
        }
        Ok(())
    }
}
