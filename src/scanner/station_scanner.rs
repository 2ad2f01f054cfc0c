use crate::config::ScanConfig;
use crate::error::{Result, Tmy2Error};
use crate::scanner::file_filter::FileFilter;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationFile {
    pub path: PathBuf,
    pub filename: String,
}

impl StationFile {
    pub fn new(path: PathBuf) -> Self {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        Self { path, filename }
    }
}

/// Lists the station files directly inside one directory.
pub struct StationScanner {
    filter: FileFilter,
    sort: bool,
}

impl StationScanner {
    pub fn new(config: &ScanConfig) -> Self {
        Self {
            filter: FileFilter::new(config),
            sort: config.sort,
        }
    }

    pub fn with_sort(mut self, sort: bool) -> Self {
        self.sort = sort;
        self
    }

    /// Files come back in directory listing order unless sorting is enabled.
    /// Subdirectories are not searched.
    pub fn scan_directory<P: AsRef<Path>>(&self, root: P) -> Result<Vec<StationFile>> {
        let root_path = root.as_ref();

        if !root_path.exists() {
            return Err(Tmy2Error::InvalidPath {
                path: root_path.display().to_string(),
            });
        }

        if !root_path.is_dir() {
            return Err(Tmy2Error::InvalidPath {
                path: format!("{} is not a directory", root_path.display()),
            });
        }

        let walker = WalkDir::new(root_path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true);

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| {
                Tmy2Error::Io(e.into_io_error().unwrap_or_else(|| {
                    std::io::Error::new(std::io::ErrorKind::Other, "directory walk failed")
                }))
            })?;

            if self.is_station_entry(&entry) {
                files.push(StationFile::new(entry.into_path()));
            }
        }

        if self.sort {
            files.sort_by(|a, b| a.filename.cmp(&b.filename));
        }

        Ok(files)
    }

    fn is_station_entry(&self, entry: &DirEntry) -> bool {
        entry.file_type().is_file() && self.filter.is_station_file(entry.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn names(files: &[StationFile]) -> Vec<&str> {
        files.iter().map(|f| f.filename.as_str()).collect()
    }

    #[test]
    fn test_station_file_creation() {
        let file = StationFile::new(PathBuf::from("weather/23129.tm2"));
        assert_eq!(file.filename, "23129.tm2");
    }

    #[test]
    fn test_scan_filters_by_suffix() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::write(root.join("23129.tm2"), "header").unwrap();
        fs::write(root.join("11641.tm2"), "header").unwrap();
        fs::write(root.join("11641.TM2"), "header").unwrap();
        fs::write(root.join("tmy2_data.csv"), "file_id,lat,lon").unwrap();
        fs::create_dir(root.join("nested.tm2")).unwrap();
        fs::write(root.join("nested.tm2").join("99999.tm2"), "header").unwrap();

        let scanner = StationScanner::new(&ScanConfig::default()).with_sort(true);
        let files = scanner.scan_directory(root).unwrap();

        assert_eq!(names(&files), vec!["11641.tm2", "23129.tm2"]);
        assert!(files.iter().all(|f| f.path.starts_with(root)));
    }

    #[test]
    fn test_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        let scanner = StationScanner::new(&ScanConfig::default());

        let files = scanner.scan_directory(temp_dir.path()).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_invalid_roots() {
        let temp_dir = TempDir::new().unwrap();
        let scanner = StationScanner::new(&ScanConfig::default());

        let missing = scanner.scan_directory(temp_dir.path().join("missing"));
        assert!(matches!(missing, Err(Tmy2Error::InvalidPath { .. })));

        let file = temp_dir.path().join("23129.tm2");
        fs::write(&file, "header").unwrap();
        let not_dir = scanner.scan_directory(&file);
        assert!(matches!(not_dir, Err(Tmy2Error::InvalidPath { .. })));
    }
}
