//! Unit conversions shared by the calculators.

/// Converts energy in kilowatt-hours to megajoules.
pub fn kwh_to_mj(kwh: f64) -> f64 {
    kwh * 3.6
}

/// Converts power in kilowatts to BTU per hour.
pub fn kw_to_btu_hr(kw: f64) -> f64 {
    kw * 3412.142
}

/// Converts a temperature (or temperature difference) from Celsius to Fahrenheit.
pub fn celsius_to_fahrenheit(c: f64) -> f64 {
    c * 9.0 / 5.0 + 32.0
}
