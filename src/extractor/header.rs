//! Fixed-offset reader for the station header of a TMY2 file.
//!
//! Layout follows the TMY2 header record (NREL, table 3-1). Only the station
//! number and the two coordinates are read; the rest of the file is ignored.

use crate::error::{Result, Tmy2Error};
use crate::extractor::coordinate::{format_coord, get_coord};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Suffix appended to the station number to form the file id.
pub const FILE_ID_SUFFIX: &str = ".tm2";

/// A byte range of the header line, 0-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderField {
    pub name: &'static str,
    pub start: usize,
    pub len: usize,
}

impl HeaderField {
    pub const fn end(&self) -> usize {
        self.start + self.len
    }
}

pub const STATION_ID: HeaderField = HeaderField { name: "station_id", start: 1, len: 5 };
pub const LAT_HEMISPHERE: HeaderField = HeaderField { name: "lat_hemisphere", start: 37, len: 1 };
pub const LAT_DEGREES: HeaderField = HeaderField { name: "lat_degrees", start: 39, len: 2 };
pub const LAT_MINUTES: HeaderField = HeaderField { name: "lat_minutes", start: 42, len: 2 };
pub const LON_HEMISPHERE: HeaderField = HeaderField { name: "lon_hemisphere", start: 45, len: 1 };
pub const LON_DEGREES: HeaderField = HeaderField { name: "lon_degrees", start: 47, len: 3 };
pub const LON_MINUTES: HeaderField = HeaderField { name: "lon_minutes", start: 51, len: 2 };

pub const HEADER_FIELDS: &[HeaderField] = &[
    STATION_ID,
    LAT_HEMISPHERE,
    LAT_DEGREES,
    LAT_MINUTES,
    LON_HEMISPHERE,
    LON_DEGREES,
    LON_MINUTES,
];

/// Number of header bytes needed to read every field.
pub const HEADER_LEN: usize = max_field_end(HEADER_FIELDS);

const fn max_field_end(fields: &[HeaderField]) -> usize {
    let mut end = 0;
    let mut i = 0;
    while i < fields.len() {
        if fields[i].end() > end {
            end = fields[i].end();
        }
        i += 1;
    }
    end
}

/// The three fields making up one coordinate.
#[derive(Debug, Clone, Copy)]
pub struct AxisFields {
    pub hemisphere: HeaderField,
    pub degrees: HeaderField,
    pub minutes: HeaderField,
}

pub const LATITUDE: AxisFields = AxisFields {
    hemisphere: LAT_HEMISPHERE,
    degrees: LAT_DEGREES,
    minutes: LAT_MINUTES,
};

pub const LONGITUDE: AxisFields = AxisFields {
    hemisphere: LON_HEMISPHERE,
    degrees: LON_DEGREES,
    minutes: LON_MINUTES,
};

/// Parsed station location in decimal degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationSummary {
    pub station_id: String,
    pub lat: f64,
    pub lon: f64,
}

impl StationSummary {
    pub fn file_id(&self) -> String {
        format!("{}{}", self.station_id, FILE_ID_SUFFIX)
    }

    pub fn to_record(&self) -> StationRecord {
        StationRecord {
            file_id: self.file_id(),
            lat: format_coord(self.lat),
            lon: format_coord(self.lon),
        }
    }
}

/// One row of the summary CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationRecord {
    pub file_id: String,
    pub lat: String,
    pub lon: String,
}

impl From<&StationSummary> for StationRecord {
    fn from(summary: &StationSummary) -> Self {
        summary.to_record()
    }
}

/// Read the text of `field` out of a header buffer. Bytes that are not UTF-8
/// are rejected rather than replaced.
pub fn read_field<'a>(header: &'a [u8], field: &HeaderField) -> Result<&'a str> {
    let bytes = header
        .get(field.start..field.end())
        .ok_or_else(|| Tmy2Error::Truncated {
            path: String::new(),
            needed: field.end(),
            found: header.len(),
        })?;

    std::str::from_utf8(bytes).map_err(|_| Tmy2Error::InvalidText {
        path: String::new(),
        field: field.name,
    })
}

/// Read an integer field. TMY2 right-aligns numbers with spaces, so the text is
/// trimmed before parsing.
pub fn read_int(header: &[u8], field: &HeaderField) -> Result<i32> {
    let text = read_field(header, field)?;

    text.trim().parse().map_err(|_| Tmy2Error::InvalidNumber {
        path: String::new(),
        field: field.name,
        value: text.to_string(),
    })
}

/// Read one coordinate as signed decimal degrees.
pub fn read_coord(header: &[u8], axis: &AxisFields) -> Result<f64> {
    let direction = read_field(header, &axis.hemisphere)?;
    let degrees = read_int(header, &axis.degrees)?;
    let minutes = read_int(header, &axis.minutes)?;

    Ok(get_coord(direction, degrees, minutes))
}

/// Read the leading header bytes of a stream.
pub fn read_header<R: Read>(reader: R) -> Result<Vec<u8>> {
    let mut header = Vec::with_capacity(HEADER_LEN);
    reader.take(HEADER_LEN as u64).read_to_end(&mut header)?;

    if header.len() < HEADER_LEN {
        return Err(Tmy2Error::Truncated {
            path: String::new(),
            needed: HEADER_LEN,
            found: header.len(),
        });
    }

    Ok(header)
}

/// Parse a stream positioned at the start of a TMY2 header.
pub fn extract_summary<R: Read>(reader: R) -> Result<StationSummary> {
    let header = read_header(reader)?;

    Ok(StationSummary {
        station_id: read_field(&header, &STATION_ID)?.to_string(),
        lat: read_coord(&header, &LATITUDE)?,
        lon: read_coord(&header, &LONGITUDE)?,
    })
}

/// Parse a stream into the CSV row for it.
pub fn extract<R: Read>(reader: R) -> Result<StationRecord> {
    extract_summary(reader).map(|summary| summary.to_record())
}

/// Open, parse and close one file. Every error carries the file's path.
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<StationSummary> {
    let path = path.as_ref();

    File::open(path)
        .map_err(Tmy2Error::from)
        .and_then(|file| extract_summary(BufReader::new(file)))
        .map_err(|e| e.with_path(path.display().to_string()))
}
