use crate::error::{Result, Tmy2Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub processing: ProcessingConfig,
    #[serde(default)]
    pub locator: LocatorConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ScanConfig {
    pub directory: PathBuf,
    pub suffix: String,
    pub sort: bool,
    pub exclude_patterns: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub file: PathBuf,
    pub echo_records: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ProcessingConfig {
    pub on_error: ErrorPolicy,
}

/// Search radius for `--near`, in miles. Zero means unlimited.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LocatorConfig {
    pub radius_miles: f64,
}

/// What to do when a single header cannot be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    #[default]
    Abort,
    Skip,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            suffix: ".tm2".to_string(),
            sort: false,
            exclude_patterns: Vec::new(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("tmy2_data.csv"),
            echo_records: false,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(Tmy2Error::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| Tmy2Error::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| Tmy2Error::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["tmy2summary.toml", ".tmy2summary.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref directory) = cli_args.directory {
            self.scan.directory = directory.clone();
        }

        if let Some(ref output_file) = cli_args.output_file {
            self.output.file = output_file.clone();
        }

        if cli_args.sort {
            self.scan.sort = true;
        }

        if cli_args.skip_invalid {
            self.processing.on_error = ErrorPolicy::Skip;
        }

        if cli_args.echo_records {
            self.output.echo_records = true;
        }

        if let Some(radius_miles) = cli_args.radius_miles {
            self.locator.radius_miles = radius_miles;
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| Tmy2Error::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| Tmy2Error::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.scan.suffix.is_empty() {
            return Err(Tmy2Error::Config {
                message: "File suffix must not be empty".to_string(),
            });
        }

        if self.output.file.as_os_str().is_empty() {
            return Err(Tmy2Error::Config {
                message: "Output file name must not be empty".to_string(),
            });
        }

        let radius = self.locator.radius_miles;
        if !radius.is_finite() || radius < 0.0 {
            return Err(Tmy2Error::Config {
                message: format!(
                    "Search radius must be zero or a positive number of miles, got {}",
                    radius
                ),
            });
        }

        for pattern in &self.scan.exclude_patterns {
            if let Err(e) = regex::Regex::new(pattern) {
                return Err(Tmy2Error::Config {
                    message: format!("Invalid exclude pattern '{}': {}", pattern, e),
                });
            }
        }

        Ok(())
    }

    pub fn skip_invalid(&self) -> bool {
        self.processing.on_error == ErrorPolicy::Skip
    }

}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub directory: Option<PathBuf>,
    pub output_file: Option<PathBuf>,
    pub sort: bool,
    pub skip_invalid: bool,
    pub echo_records: bool,
    pub radius_miles: Option<f64>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_directory(mut self, directory: Option<PathBuf>) -> Self {
        self.directory = directory;
        self
    }

    pub fn with_output_file(mut self, output_file: Option<PathBuf>) -> Self {
        self.output_file = output_file;
        self
    }

    pub fn with_sort(mut self, sort: bool) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_skip_invalid(mut self, skip: bool) -> Self {
        self.skip_invalid = skip;
        self
    }

    pub fn with_echo_records(mut self, echo: bool) -> Self {
        self.echo_records = echo;
        self
    }

    pub fn with_radius_miles(mut self, radius_miles: Option<f64>) -> Self {
        self.radius_miles = radius_miles;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.scan.suffix, ".tm2");
        assert_eq!(config.scan.directory, PathBuf::from("."));
        assert_eq!(config.output.file, PathBuf::from("tmy2_data.csv"));
        assert_eq!(config.processing.on_error, ErrorPolicy::Abort);
        assert!(!config.skip_invalid());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.scan.suffix.clear();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.scan.exclude_patterns.push("(unclosed".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_radius_validation() {
        let mut config = Config::default();
        assert_eq!(config.locator.radius_miles, 0.0);

        config.locator.radius_miles = 25.0;
        assert!(config.validate().is_ok());

        for bad in [-5.0, f64::NAN, f64::INFINITY] {
            config.locator.radius_miles = bad;
            assert!(matches!(config.validate(), Err(Tmy2Error::Config { .. })));
        }
    }

    #[test]
    fn test_negative_radius_in_file_rejected() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[locator]\nradius_miles = -5.0").unwrap();

        let config = Config::load_from_file(temp_file.path()).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_file_operations() {
        let mut config = Config::default();
        config.processing.on_error = ErrorPolicy::Skip;
        let temp_file = NamedTempFile::new().unwrap();

        config.save_to_file(temp_file.path()).unwrap();

        let loaded_config = Config::load_from_file(temp_file.path()).unwrap();
        assert_eq!(loaded_config.processing.on_error, ErrorPolicy::Skip);
        assert_eq!(loaded_config.output.file, config.output.file);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[processing]\non_error = \"skip\"").unwrap();

        let config = Config::load_from_file(temp_file.path()).unwrap();
        assert!(config.skip_invalid());
        assert_eq!(config.scan.suffix, ".tm2");
        assert_eq!(config.output.file, PathBuf::from("tmy2_data.csv"));
    }

    #[test]
    fn test_missing_config_file() {
        let result = Config::load_from_file("definitely/not/here.toml");
        assert!(matches!(result, Err(Tmy2Error::Config { .. })));
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = Config::default();

        let overrides = CliOverrides::new()
            .with_directory(Some(PathBuf::from("weather")))
            .with_output_file(Some(PathBuf::from("stations.csv")))
            .with_skip_invalid(true);

        config.merge_with_cli_args(&overrides);

        assert_eq!(config.scan.directory, PathBuf::from("weather"));
        assert_eq!(config.output.file, PathBuf::from("stations.csv"));
        assert!(config.skip_invalid());
        assert!(!config.scan.sort);
    }

    #[test]
    fn test_default_config_file_contents() {
        let temp_file = NamedTempFile::new().unwrap();
        Config::default().save_to_file(temp_file.path()).unwrap();

        let sample = std::fs::read_to_string(temp_file.path()).unwrap();
        assert!(sample.contains("[scan]"));
        assert!(sample.contains("[output]"));
        assert!(sample.contains("[processing]"));
        assert!(sample.contains("[locator]"));
        assert!(sample.contains("on_error = \"abort\""));
    }
}
