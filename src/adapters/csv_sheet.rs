use crate::domain::model::{ExportFormat, Table};
use crate::domain::ports::SheetEncoder;
use crate::utils::error::Result;

#[derive(Debug, Clone, Copy, Default)]
pub struct CsvEncoder;

impl SheetEncoder for CsvEncoder {
    fn format(&self) -> ExportFormat {
        ExportFormat::Csv
    }

    // The sheet name has no place in CSV and is dropped.
    fn encode(&self, table: &Table) -> Result<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&table.header)?;
        for row in &table.rows {
            writer.write_record(row.iter().map(|cell| cell.as_deref().unwrap_or("")))?;
        }
        let bytes = writer.into_inner().map_err(|e| e.into_error())?;
        Ok(bytes)
    }
}
