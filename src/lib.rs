pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod locator;
pub mod scanner;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{
    CliOverrides, Config, ErrorPolicy, LocatorConfig, OutputConfig, ProcessingConfig, ScanConfig,
};
pub use error::{Result, Tmy2Error, UserFriendlyError};

// Core functionality re-exports
pub use extractor::{
    extract, extract_file, get_coord, StationRecord, StationSummary, SummaryReport, SummaryWriter,
};
pub use locator::{haversine_km, StationIndex};
pub use scanner::{FileFilter, StationFile, StationScanner};
pub use ui::{GracefulShutdown, OutputFormatter, OutputMode, ProgressManager};

use std::io::Write;
use std::path::Path;
use std::time::Instant;

/// Main library interface: scan a directory, read each header, write the CSV.
pub struct Tmy2Summary {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
    shutdown: GracefulShutdown,
}

/// Result of a run: the report plus every station that made it into the CSV.
pub struct SummaryOutcome {
    pub report: SummaryReport,
    pub stations: StationIndex,
}

impl Tmy2Summary {
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Result<Self> {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let progress_manager = ProgressManager::new(!quiet && output_mode == OutputMode::Human);
        let shutdown = GracefulShutdown::new()?;

        Ok(Self {
            config,
            output_formatter,
            progress_manager,
            shutdown,
        })
    }

    /// Create an instance without installing a Ctrl+C handler, for library use
    /// where the host process owns signal handling.
    pub fn without_signal_handler(
        config: Config,
        output_mode: OutputMode,
        verbose: u8,
        quiet: bool,
    ) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let progress_manager = ProgressManager::new(false);
        let shutdown = GracefulShutdown::without_handler();

        Self {
            config,
            output_formatter,
            progress_manager,
            shutdown,
        }
    }

    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let output_mode = match cli_args.output_format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        };

        Self::new(config, output_mode, cli_args.verbose, cli_args.quiet)
    }

    /// Summarize the configured directory into the configured CSV file.
    pub fn run(&self) -> Result<SummaryOutcome> {
        self.shutdown.check_shutdown()?;

        let directory = self.config.scan.directory.clone();
        let files = self.scan_station_files(&directory)?;

        let output_path = &self.config.output.file;
        self.output_formatter
            .debug(&format!("Writing {}", output_path.display()));
        let mut writer = SummaryWriter::create(output_path)?;

        let mut report = SummaryReport::new(directory, output_path.clone(), files.len());
        let stations = self.summarize_files(&files, &mut writer, &mut report)?;
        writer.finish()?;

        self.output_formatter.success(&format!(
            "Wrote {} rows to {}",
            report.rows_written,
            output_path.display()
        ));

        Ok(SummaryOutcome { report, stations })
    }

    /// List the station files without reading them.
    pub fn scan_station_files(&self, directory: &Path) -> Result<Vec<StationFile>> {
        self.output_formatter.start_operation(&format!(
            "Scanning {} for *{} files",
            directory.display(),
            self.config.scan.suffix
        ));

        let scanner = StationScanner::new(&self.config.scan);
        let files = scanner.scan_directory(directory)?;

        self.output_formatter
            .info(&format!("Found {} station files", files.len()));

        Ok(files)
    }

    /// Read each file's header and append its row to `writer`, in order.
    ///
    /// With the abort policy the first unreadable header stops the run; rows
    /// already written stay in the writer.
    pub fn summarize_files<W: Write>(
        &self,
        files: &[StationFile],
        writer: &mut SummaryWriter<W>,
        report: &mut SummaryReport,
    ) -> Result<StationIndex> {
        let start_time = Instant::now();
        let progress = self.progress_manager.create_file_progress(files.len() as u64);
        let mut stations = StationIndex::default();

        for (index, file) in files.iter().enumerate() {
            if let Err(e) = self.shutdown.check_shutdown() {
                progress.abandon_with_message("Cancelled");
                writer.flush()?;
                return Err(e);
            }

            ui::progress::update_file_progress(&progress, index, &file.filename);

            let summary = match extract_file(&file.path) {
                Ok(summary) => summary,
                Err(e) if e.is_header_error() && self.config.skip_invalid() => {
                    progress.suspend(|| {
                        self.output_formatter
                            .warning(&format!("Skipping {}: {}", file.filename, e));
                    });
                    report.add_skipped(file.filename.clone(), e.to_string());
                    continue;
                }
                Err(e) => {
                    progress.abandon_with_message(format!("Failed on {}", file.filename));
                    writer.flush()?;
                    return Err(e);
                }
            };

            let record = summary.to_record();
            if self.config.output.echo_records {
                progress.suspend(|| self.output_formatter.print_record(&record));
            }

            writer.write_record(&record)?;
            stations.push(summary);
        }

        report.rows_written = writer.rows_written();
        report.duration = start_time.elapsed();

        ui::progress::finish_progress_with_summary(
            &progress,
            &format!("Read {} headers", report.rows_written),
            report.duration,
        );

        Ok(stations)
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        Config::default().save_to_file(output_path)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    pub fn is_running(&self) -> bool {
        self.shutdown.is_running()
    }

    pub fn request_shutdown(&self) {
        self.shutdown.request_shutdown();
    }

    pub fn handle_error(&self, error: &Tmy2Error) {
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Summarize `directory` into `output` with default settings.
pub fn summarize_directory<P: AsRef<Path>, Q: AsRef<Path>>(
    directory: P,
    output: Q,
) -> Result<SummaryReport> {
    let mut config = Config::default();
    config.scan.directory = directory.as_ref().to_path_buf();
    config.output.file = output.as_ref().to_path_buf();

    let summary = Tmy2Summary::without_signal_handler(config, OutputMode::Plain, 0, true);
    summary.run().map(|outcome| outcome.report)
}

pub fn version_info() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
