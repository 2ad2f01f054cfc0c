use thiserror::Error;

#[derive(Error, Debug)]
pub enum Tmy2Error {
    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read {path}: {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },

    #[error("Header too short in {path}: needed {needed} bytes, found {found}")]
    Truncated {
        path: String,
        needed: usize,
        found: usize,
    },

    #[error("Invalid {field} in {path}: {value:?} is not an integer")]
    InvalidNumber {
        path: String,
        field: &'static str,
        value: String,
    },

    #[error("Invalid {field} in {path}: not valid UTF-8")]
    InvalidText { path: String, field: &'static str },

    #[error("CSV output failed: {message}")]
    Csv { message: String },

    #[error("Path validation failed: {path}")]
    InvalidPath { path: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid coordinate pair: {input}")]
    InvalidCoordinate { input: String },

    #[error("Operation was cancelled by user")]
    Cancelled,
}

impl Tmy2Error {
    /// Errors caused by the content of a single input header.
    pub fn is_header_error(&self) -> bool {
        matches!(
            self,
            Tmy2Error::Truncated { .. }
                | Tmy2Error::InvalidNumber { .. }
                | Tmy2Error::InvalidText { .. }
        )
    }

    /// Replace the placeholder path of a header error with the file it came from.
    /// Plain I/O errors become `FileRead` so the message names the file.
    pub fn with_path<S: Into<String>>(self, file: S) -> Self {
        match self {
            Tmy2Error::Truncated { needed, found, .. } => Tmy2Error::Truncated {
                path: file.into(),
                needed,
                found,
            },
            Tmy2Error::InvalidNumber { field, value, .. } => Tmy2Error::InvalidNumber {
                path: file.into(),
                field,
                value,
            },
            Tmy2Error::InvalidText { field, .. } => Tmy2Error::InvalidText {
                path: file.into(),
                field,
            },
            Tmy2Error::Io(source) => Tmy2Error::FileRead {
                path: file.into(),
                source,
            },
            other => other,
        }
    }
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for Tmy2Error {
    fn user_message(&self) -> String {
        match self {
            Tmy2Error::Truncated {
                path,
                needed,
                found,
            } => {
                format!(
                    "Header of {} is truncated ({} of {} bytes)",
                    path, found, needed
                )
            }
            Tmy2Error::InvalidNumber { path, field, value } => {
                format!("Could not read {} from {}: '{}'", field, path, value)
            }
            Tmy2Error::InvalidText { path, field } => {
                format!("Could not read {} from {}: not valid UTF-8", field, path)
            }
            Tmy2Error::FileRead { path, source } => {
                format!("Could not read {}: {}", path, source)
            }
            Tmy2Error::Csv { message } => {
                format!("Failed to write CSV output: {}", message)
            }
            Tmy2Error::InvalidPath { path } => {
                format!("Invalid directory: {}", path)
            }
            Tmy2Error::Config { message } => {
                format!("Configuration error: {}", message)
            }
            Tmy2Error::InvalidCoordinate { input } => {
                format!("Invalid coordinate pair: {}", input)
            }
            Tmy2Error::Cancelled => "Operation was cancelled by user".to_string(),
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            Tmy2Error::Truncated { .. }
            | Tmy2Error::InvalidNumber { .. }
            | Tmy2Error::InvalidText { .. } => Some(
                "Check that the file is a TMY2 file, or rerun with --skip-invalid to skip unreadable headers.".to_string()
            ),
            Tmy2Error::InvalidPath { .. } => Some(
                "Pass an existing directory with --dir, or run from the directory holding the .tm2 files.".to_string()
            ),
            Tmy2Error::Config { .. } => Some(
                "Check your configuration file syntax, or regenerate one with --generate-config.".to_string()
            ),
            Tmy2Error::InvalidCoordinate { .. } => Some(
                "Use decimal degrees separated by a comma, e.g. --near 35.22,-97.23".to_string()
            ),
            Tmy2Error::Io(_) | Tmy2Error::FileRead { .. } | Tmy2Error::Csv { .. } => Some(
                "Ensure you have read permission on the input files and write permission on the output file.".to_string()
            ),
            _ => None,
        }
    }
}

impl From<csv::Error> for Tmy2Error {
    fn from(error: csv::Error) -> Self {
        if !error.is_io_error() {
            return Tmy2Error::Csv {
                message: error.to_string(),
            };
        }

        match error.into_kind() {
            csv::ErrorKind::Io(io) => Tmy2Error::Io(io),
            kind => Tmy2Error::Csv {
                message: format!("{:?}", kind),
            },
        }
    }
}

impl From<toml::de::Error> for Tmy2Error {
    fn from(error: toml::de::Error) -> Self {
        Tmy2Error::Config {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Tmy2Error>;
