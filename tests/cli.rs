use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const NORMAN: &str = " 13967 NORMAN                 OK  -6 N 35 13 W  97 14   357";
const SAN_JUAN: &str = " 11641 SAN_JUAN               PR  -4 N 18 26 W  66  0    19";
const PERTH: &str = " 94610 PERTH                  WA   8 S 31 56 E 115 57    20";

fn write_station(dir: &Path, name: &str, header: &str) {
    let body = format!("{}\n 85010101 0 0 0 ?0 ?0 ?0\n", header);
    fs::write(dir.join(name), body).unwrap();
}

fn tmy2summary(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("tmy2summary").unwrap();
    cmd.current_dir(dir);
    cmd
}

fn read_rows(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn no_arguments_summarizes_working_directory() {
    let temp_dir = TempDir::new().unwrap();
    write_station(temp_dir.path(), "13967.tm2", NORMAN);
    write_station(temp_dir.path(), "11641.tm2", SAN_JUAN);
    write_station(temp_dir.path(), "94610.tm2", PERTH);

    tmy2summary(temp_dir.path()).assert().success();

    let mut rows = read_rows(&temp_dir.path().join("tmy2_data.csv"));
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0], "file_id,lat,lon");

    // Directory order is unspecified.
    rows[1..].sort();
    assert_eq!(
        rows[1..],
        [
            "11641.tm2,18.43,-66.00".to_string(),
            "13967.tm2,35.22,-97.23".to_string(),
            "94610.tm2,-31.93,115.95".to_string(),
        ]
    );
}

#[test]
fn empty_directory_writes_header_only() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("readme.txt"), "not weather").unwrap();

    tmy2summary(temp_dir.path()).assert().success();

    let content = fs::read_to_string(temp_dir.path().join("tmy2_data.csv")).unwrap();
    assert_eq!(content, "file_id,lat,lon\r\n");
}

#[test]
fn short_file_fails_the_run() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("00001.tm2"), " 00001 TOO SHORT").unwrap();

    tmy2summary(temp_dir.path())
        .assert()
        .code(4)
        .stderr(predicate::str::contains("00001.tm2"));

    let rows = read_rows(&temp_dir.path().join("tmy2_data.csv"));
    assert_eq!(rows, vec!["file_id,lat,lon".to_string()]);
}

#[test]
fn skip_invalid_keeps_going() {
    let temp_dir = TempDir::new().unwrap();
    write_station(temp_dir.path(), "13967.tm2", NORMAN);
    fs::write(temp_dir.path().join("00001.tm2"), " 00001 TOO SHORT").unwrap();

    tmy2summary(temp_dir.path())
        .args(["--skip-invalid", "--output-format", "plain"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("SKIPPED: 00001.tm2"));

    let rows = read_rows(&temp_dir.path().join("tmy2_data.csv"));
    assert_eq!(rows, vec!["file_id,lat,lon", "13967.tm2,35.22,-97.23"]);
}

#[test]
fn explicit_directory_and_output() {
    let temp_dir = TempDir::new().unwrap();
    let weather = temp_dir.path().join("weather");
    fs::create_dir(&weather).unwrap();
    write_station(&weather, "13967.tm2", NORMAN);
    write_station(&weather, "11641.tm2", SAN_JUAN);

    tmy2summary(temp_dir.path())
        .args(["--dir", "weather", "--output", "stations.csv", "--sort", "-q"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let rows = read_rows(&temp_dir.path().join("stations.csv"));
    assert_eq!(
        rows,
        vec![
            "file_id,lat,lon",
            "11641.tm2,18.43,-66.00",
            "13967.tm2,35.22,-97.23"
        ]
    );
    assert!(!temp_dir.path().join("tmy2_data.csv").exists());
}

#[test]
fn json_report() {
    let temp_dir = TempDir::new().unwrap();
    write_station(temp_dir.path(), "13967.tm2", NORMAN);

    tmy2summary(temp_dir.path())
        .args(["--output-format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"rows_written\": 1"));
}

#[test]
fn nearest_station_lookup() {
    let temp_dir = TempDir::new().unwrap();
    write_station(temp_dir.path(), "13967.tm2", NORMAN);
    write_station(temp_dir.path(), "11641.tm2", SAN_JUAN);

    tmy2summary(temp_dir.path())
        .args(["--output-format", "plain", "--near", "35.3,-97.3", "--radius", "25"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nearest station to 35.30,-97.30: 13967.tm2"));

    tmy2summary(temp_dir.path())
        .args(["--output-format", "plain", "--near", "60,10", "--radius", "25"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No station found"));
}

#[test]
fn negative_radius_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    write_station(temp_dir.path(), "13967.tm2", NORMAN);

    for radius in ["--radius=-5", "--radius=NaN"] {
        tmy2summary(temp_dir.path())
            .args(["--near", "40,-100", radius])
            .assert()
            .failure()
            .stderr(predicate::str::contains("radius"));
    }
    assert!(!temp_dir.path().join("tmy2_data.csv").exists());

    fs::write(
        temp_dir.path().join("tmy2summary.toml"),
        "[locator]\nradius_miles = -5.0\n",
    )
    .unwrap();

    tmy2summary(temp_dir.path())
        .args(["--near", "40,-100"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("radius"));
    assert!(!temp_dir.path().join("tmy2_data.csv").exists());
}

#[test]
fn invalid_station_id_bytes_fail_the_run() {
    let temp_dir = TempDir::new().unwrap();
    let mut header = NORMAN.as_bytes().to_vec();
    header[2] = 0xFF;
    header.extend_from_slice(b"\n");
    fs::write(temp_dir.path().join("13967.tm2"), header).unwrap();

    tmy2summary(temp_dir.path())
        .assert()
        .code(4)
        .stderr(predicate::str::contains("station_id"));

    let rows = read_rows(&temp_dir.path().join("tmy2_data.csv"));
    assert_eq!(rows, vec!["file_id,lat,lon".to_string()]);
}

#[test]
fn dry_run_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    write_station(temp_dir.path(), "13967.tm2", NORMAN);

    tmy2summary(temp_dir.path())
        .args(["--dry-run", "--output-format", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("13967.tm2"));

    assert!(!temp_dir.path().join("tmy2_data.csv").exists());
}

#[test]
fn config_file_in_working_directory_is_used() {
    let temp_dir = TempDir::new().unwrap();
    write_station(temp_dir.path(), "13967.tm2", NORMAN);
    fs::write(temp_dir.path().join("00001.tm2"), "short").unwrap();
    fs::write(
        temp_dir.path().join("tmy2summary.toml"),
        "[output]\nfile = \"from_config.csv\"\n\n[processing]\non_error = \"skip\"\n",
    )
    .unwrap();

    tmy2summary(temp_dir.path()).assert().code(2);

    let rows = read_rows(&temp_dir.path().join("from_config.csv"));
    assert_eq!(rows.len(), 2);
}

#[test]
fn missing_directory_is_reported() {
    let temp_dir = TempDir::new().unwrap();

    tmy2summary(temp_dir.path())
        .args(["--dir", "nowhere"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("nowhere"));
}
