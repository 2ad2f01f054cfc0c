use clap::Parser;
use std::process;
use tmy2summary::{Cli, OutputFormatter, OutputMode, Tmy2Error, Tmy2Summary, UserFriendlyError};

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    let cli = Cli::parse();

    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let summary = match Tmy2Summary::from_cli(&cli) {
        Ok(summary) => summary,
        Err(e) => {
            print_startup_error(&e);
            return exit_code_for(&e);
        }
    };

    if cli.dry_run {
        return handle_dry_run(&summary);
    }

    match summary.run() {
        Ok(outcome) => {
            summary
                .output_formatter()
                .print_summary_report(&outcome.report);

            match cli.near_point() {
                Ok(Some((lat, lon))) => {
                    let nearest = outcome
                        .stations
                        .nearest(lat, lon, summary.config().locator.radius_miles);
                    summary.output_formatter().print_nearest(lat, lon, nearest);
                }
                Ok(None) => {}
                Err(e) => {
                    summary.handle_error(&e);
                    return exit_code_for(&e);
                }
            }

            if outcome.report.is_complete() {
                0
            } else {
                2 // Success with skipped files
            }
        }
        Err(e) => {
            summary.handle_error(&e);
            exit_code_for(&e)
        }
    }
}

fn exit_code_for(error: &Tmy2Error) -> i32 {
    match error {
        Tmy2Error::Cancelled => 130, // Interrupted (SIGINT)
        Tmy2Error::Io(_) | Tmy2Error::FileRead { .. } | Tmy2Error::Csv { .. } => 3,
        e if e.is_header_error() => 4,
        _ => 1,
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "tmy2summary.toml".to_string());

    match Tmy2Summary::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            println!("\nTo use this configuration:");
            println!("  tmy2summary --config {}", config_path);
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn handle_dry_run(summary: &Tmy2Summary) -> i32 {
    let formatter = summary.output_formatter();
    let config = summary.config();

    formatter.warning("DRY RUN MODE - no CSV will be written");

    let files = match summary.scan_station_files(&config.scan.directory) {
        Ok(files) => files,
        Err(e) => {
            summary.handle_error(&e);
            return exit_code_for(&e);
        }
    };

    if formatter.mode() != OutputMode::Json {
        println!("  Directory: {}", config.scan.directory.display());
        println!("  Output file: {}", config.output.file.display());
        println!(
            "  On error: {}",
            if config.skip_invalid() { "skip" } else { "abort" }
        );
        println!("  Files ({}):", files.len());
        for file in &files {
            println!("    {}", file.filename);
        }
    }

    formatter.success("Dry run completed successfully");
    0
}

fn print_startup_error(error: &Tmy2Error) {
    let formatter = OutputFormatter::new(OutputMode::Human, 0, false);
    formatter.print_user_friendly_error(error);
}
