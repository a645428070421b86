// Adapters layer: concrete implementations for external systems (file formats, storage).

pub mod csv_input;
pub mod preview;
pub mod storage;
pub mod xlsx_output;
