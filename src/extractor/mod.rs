pub mod coordinate;
pub mod header;
pub mod summary_writer;

pub use coordinate::{format_coord, get_coord};
pub use header::{extract, extract_file, extract_summary, StationRecord, StationSummary};
pub use summary_writer::{SkippedFile, SummaryReport, SummaryWriter};
