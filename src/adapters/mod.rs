// Adapters layer: concrete encoders behind the `SheetEncoder` port.

pub mod csv_sheet;
pub mod xlsx;
