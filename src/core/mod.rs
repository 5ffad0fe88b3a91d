pub mod document;
pub mod etl;
pub mod export;
pub mod extract;
pub mod plist;
pub mod preview;
pub mod session;

pub use crate::domain::model::{
    BookmarkCollection, BookmarkField, BookmarkRecord, Conversion, ExportArtifact, ExportFormat,
    RawDocument, Table,
};
pub use crate::domain::ports::{ConfigProvider, SheetEncoder, Storage};
pub use crate::utils::error::Result;
