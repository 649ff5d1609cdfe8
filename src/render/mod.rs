pub mod document;
pub mod plot;
pub mod table;

pub use document::{Block, ReportDocument, load_figure, write_document};
pub use plot::write_curve;
pub use table::{ReportTable, build_table};
