/// Convert a sexagesimal coordinate to signed decimal degrees.
///
/// Southern and western hemispheres are negative. Both letters are honoured
/// for either axis, so a latitude tagged `W` is negated as well.
pub fn get_coord(direction: &str, degrees: i32, minutes: i32) -> f64 {
    let coord = f64::from(degrees) + f64::from(minutes) / 60.0;

    if direction == "W" || direction == "S" {
        -coord
    } else {
        coord
    }
}

/// Two decimal places, as written to the summary CSV.
pub fn format_coord(coord: f64) -> String {
    format!("{:.2}", coord)
}
