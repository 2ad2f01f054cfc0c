use crate::config::{CliOverrides, Config};
use crate::error::Result;
use crate::locator::parse_lat_lon;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tmy2summary")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Summarize TMY2 weather file headers into a CSV")]
#[command(
    long_about = "tmy2summary reads the station header of every .tm2 file in a directory \
                  and writes the station id, latitude and longitude of each one to \
                  tmy2_data.csv. Run it with no arguments inside the weather directory."
)]
#[command(after_help = "EXAMPLES:\n  \
    tmy2summary\n  \
    tmy2summary --dir weather/tmy2 --output stations.csv --sort\n  \
    tmy2summary --skip-invalid --output-format json\n  \
    tmy2summary --near 35.2,-97.4 --radius 50")]
pub struct Cli {
    /// Directory containing the .tm2 files (defaults to the working directory)
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// CSV file to write (defaults to tmy2_data.csv)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Skip files whose header cannot be read instead of aborting
    #[arg(long)]
    pub skip_invalid: bool,

    /// Sort input files by name
    #[arg(long, help = "Process files in name order instead of directory order")]
    pub sort: bool,

    /// Print each parsed header
    #[arg(long)]
    pub echo: bool,

    /// Report the station closest to LAT,LON
    #[arg(long, value_name = "LAT,LON", allow_hyphen_values = true, value_parser = validate_lat_lon)]
    pub near: Option<String>,

    /// Search radius for --near in miles (0 = unlimited)
    #[arg(long, value_name = "MILES", requires = "near", value_parser = validate_radius)]
    pub radius: Option<f64>,

    /// Output format for messages and the final report
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Dry run (list the files that would be read)
    #[arg(long, help = "Show which files would be summarized without writing the CSV")]
    pub dry_run: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_directory(self.dir.clone())
            .with_output_file(self.output.clone())
            .with_sort(self.sort)
            .with_skip_invalid(self.skip_invalid)
            .with_echo_records(self.echo || self.verbose > 0)
            .with_radius_miles(self.radius)
    }

    /// The `--near` query, already validated by clap.
    pub fn near_point(&self) -> Result<Option<(f64, f64)>> {
        self.near.as_deref().map(parse_lat_lon).transpose()
    }
}

pub fn validate_lat_lon(s: &str) -> std::result::Result<String, String> {
    parse_lat_lon(s)
        .map(|_| s.to_string())
        .map_err(|_| "expected LAT,LON in decimal degrees, e.g. 35.22,-97.23".to_string())
}

pub fn validate_radius(s: &str) -> std::result::Result<f64, String> {
    match s.trim().parse::<f64>() {
        Ok(radius) if radius.is_finite() && radius >= 0.0 => Ok(radius),
        _ => Err("expected a radius of zero or more miles".to_string()),
    }
}
