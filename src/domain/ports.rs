use crate::domain::model::{ExportFormat, Table};
use crate::utils::error::Result;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn output_dir(&self) -> &str;
    fn format(&self) -> ExportFormat;
    fn sheet_name(&self) -> &str;
}

/// Narrow seam to the spreadsheet container format.
pub trait SheetEncoder: Send + Sync {
    fn format(&self) -> ExportFormat;
    fn encode(&self, table: &Table) -> Result<Vec<u8>>;

    fn extension(&self) -> &'static str {
        self.format().extension()
    }
}
