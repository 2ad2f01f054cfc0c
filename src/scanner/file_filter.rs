use crate::config::ScanConfig;
use regex::Regex;
use std::path::Path;

pub struct FileFilter {
    suffix: String,
    exclude_patterns: Vec<Regex>,
}

impl FileFilter {
    pub fn new(config: &ScanConfig) -> Self {
        let exclude_patterns = config
            .exclude_patterns
            .iter()
            .filter_map(|pattern| Regex::new(pattern).ok())
            .collect();

        Self {
            suffix: config.suffix.clone(),
            exclude_patterns,
        }
    }

    /// Exact, case-sensitive suffix match on the file name.
    pub fn is_station_file(&self, path: &Path) -> bool {
        let Some(filename) = path.file_name().and_then(|s| s.to_str()) else {
            return false;
        };

        filename.ends_with(&self.suffix) && !self.matches_exclude_pattern(filename)
    }

    fn matches_exclude_pattern(&self, filename: &str) -> bool {
        self.exclude_patterns
            .iter()
            .any(|pattern| pattern.is_match(filename))
    }
}
