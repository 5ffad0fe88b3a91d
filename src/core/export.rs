use crate::adapters::{csv_sheet::CsvEncoder, xlsx::XlsxEncoder};
use crate::domain::model::{BookmarkField, BookmarkRecord, ExportArtifact, ExportFormat, Table};
use crate::domain::ports::{ConfigProvider, SheetEncoder};
use crate::utils::error::{ConvertError, Result};

pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

impl ExportFormat {
    pub fn encoder(self) -> Box<dyn SheetEncoder> {
        match self {
            ExportFormat::Xlsx => Box::new(XlsxEncoder),
            ExportFormat::Csv => Box::new(CsvEncoder),
        }
    }
}

/// Projects records onto the fixed `URL, Title, BookmarkPath` schema.
pub fn project(records: &[BookmarkRecord], sheet_name: &str) -> Table {
    let header = BookmarkField::ALL
        .iter()
        .map(|field| field.key().to_string())
        .collect();

    let rows = records
        .iter()
        .map(|record| {
            BookmarkField::ALL
                .iter()
                .map(|field| record.get(*field).map(str::to_string))
                .collect()
        })
        .collect();

    Table {
        sheet_name: sheet_name.to_string(),
        header,
        rows,
    }
}

pub struct TabularExporter {
    encoder: Box<dyn SheetEncoder>,
    sheet_name: String,
}

impl TabularExporter {
    pub fn new(format: ExportFormat) -> Self {
        Self::with_encoder(format.encoder())
    }

    pub fn from_config(config: &impl ConfigProvider) -> Self {
        Self::new(config.format()).sheet_name(config.sheet_name())
    }

    pub fn with_encoder(encoder: Box<dyn SheetEncoder>) -> Self {
        Self {
            encoder,
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
        }
    }

    pub fn sheet_name(mut self, sheet_name: impl Into<String>) -> Self {
        self.sheet_name = sheet_name.into();
        self
    }

    /// Encodes `records` as `<base_name>.<ext>`. The records are only read, so
    /// the same collection can be exported any number of times.
    pub fn export_table(&self, records: &[BookmarkRecord], base_name: &str) -> Result<ExportArtifact> {
        if records.is_empty() {
            return Err(ConvertError::NothingToExportError);
        }

        let table = project(records, &self.sheet_name);
        let bytes = self.encoder.encode(&table)?;
        let file_name = format!("{}.{}", base_name, self.encoder.extension());

        tracing::debug!(
            "Encoded {} rows into {} ({} bytes)",
            table.rows.len(),
            file_name,
            bytes.len()
        );

        Ok(ExportArtifact {
            file_name,
            bytes,
            format: self.encoder.format(),
        })
    }
}

impl Default for TabularExporter {
    fn default() -> Self {
        Self::new(ExportFormat::Xlsx)
    }
}

/// XLSX export with the default sheet name.
pub fn export_table(records: &[BookmarkRecord], base_name: &str) -> Result<ExportArtifact> {
    TabularExporter::default().export_table(records, base_name)
}
