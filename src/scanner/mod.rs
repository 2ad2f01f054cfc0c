pub mod file_filter;
pub mod station_scanner;

pub use file_filter::FileFilter;
pub use station_scanner::{StationFile, StationScanner};
