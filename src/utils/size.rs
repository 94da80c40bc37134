//! Size formatting and parsing utilities.
//!
//! This module turns byte counts into the short labels shown in every report
//! line (`"1.5 KB"`, `"512  B"`), and parses human-readable sizes such as
//! `"4KiB"` given on the command line or in the config file.

use anyhow::{Result, anyhow, bail};

/// Binary units considered by [`format_size`], largest first.
const DISPLAY_UNITS: &[(&str, u64)] = &[
    ("GB", 1024 * 1024 * 1024),
    ("MB", 1024 * 1024),
    ("KB", 1024),
];

/// Suffixes accepted by [`parse_size`]. Longer suffixes come first so `KIB`
/// is not mistaken for a number ending in `B`.
const PARSE_UNITS: &[(&str, u64)] = &[
    ("GIB", 1_073_741_824),
    ("MIB", 1_048_576),
    ("KIB", 1_024),
    ("GB", 1_000_000_000),
    ("MB", 1_000_000),
    ("KB", 1_000),
    ("B", 1),
];

/// Format a byte count as a magnitude and a unit.
///
/// The largest unit (GB, MB, KB, all powers of 1024) that does not exceed
/// `bytes` is chosen, and the magnitude is rounded half-up to two decimal
/// places and printed without trailing zeros. Sizes below 1024 are printed
/// as plain bytes with two spaces before the `B`, which keeps the unit column
/// aligned with the two-letter units.
///
/// # Examples
///
/// ```
/// # use scandisk::utils::format_size;
/// assert_eq!(format_size(0), "0  B");
/// assert_eq!(format_size(1536), "1.5 KB");
/// assert_eq!(format_size(1_073_741_824), "1 GB");
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_size(bytes: u64) -> String {
    DISPLAY_UNITS
        .iter()
        .find(|(_, multiplier)| *multiplier <= bytes)
        .map_or_else(
            || format!("{bytes}  B"),
            |(symbol, multiplier)| {
                let magnitude = round_half_up(bytes as f64 / *multiplier as f64, 2);
                format!("{magnitude} {symbol}")
            },
        )
}

/// Round `value` to `places` decimal places, sending exact halves away from zero.
fn round_half_up(value: f64, places: i32) -> f64 {
    let pow = 10_f64.powi(places);
    let scaled = value * pow;

    let rounded = if scaled.fract() >= 0.5 {
        scaled.ceil()
    } else {
        scaled.floor()
    };

    rounded / pow
}

/// Parse a human-readable size string into bytes.
///
/// Accepts plain numbers (`"4096"`), decimal units (`KB`, `MB`, `GB`, powers
/// of 1000), binary units (`KiB`, `MiB`, `GiB`, powers of 1024) and a bare
/// `B` suffix. Units are case-insensitive and a fractional part of up to nine
/// digits is allowed (`"1.5KiB"`).
///
/// # Errors
///
/// Returns an error if the string is empty, is not a number followed by a
/// known unit, has more than nine fractional digits, or overflows `u64`.
///
/// # Examples
///
/// ```
/// # use scandisk::utils::parse_size;
/// assert_eq!(parse_size("4KiB").unwrap(), 4096);
/// assert_eq!(parse_size("512").unwrap(), 512);
/// ```
pub fn parse_size(size_str: &str) -> Result<u64> {
    let upper = size_str.trim().to_uppercase();
    let (number, multiplier) = split_unit(&upper);

    if number.is_empty() {
        bail!("Missing number in size: {size_str:?}");
    }

    let (integer, fraction) = number.split_once('.').unwrap_or((number, ""));
    if fraction.contains('.') {
        bail!("Invalid decimal format: {size_str:?}");
    }

    let integer: u64 = if integer.is_empty() {
        0
    } else {
        integer
            .parse()
            .map_err(|e| anyhow!("Invalid size {size_str:?}: {e}"))?
    };

    let whole = integer
        .checked_mul(multiplier)
        .ok_or_else(|| anyhow!("Size value overflow: {size_str:?}"))?;

    whole
        .checked_add(fractional_bytes(fraction, multiplier)?)
        .ok_or_else(|| anyhow!("Size value overflow: {size_str:?}"))
}

/// Split a trailing unit off an upper-cased size string.
fn split_unit(size_str: &str) -> (&str, u64) {
    PARSE_UNITS
        .iter()
        .find_map(|(suffix, multiplier)| {
            size_str
                .strip_suffix(suffix)
                .map(|number| (number.trim_end(), *multiplier))
        })
        .unwrap_or((size_str, 1))
}

/// Convert a fractional digit string into bytes for the given multiplier,
/// truncating anything below one byte.
fn fractional_bytes(fraction: &str, multiplier: u64) -> Result<u64> {
    if fraction.is_empty() {
        return Ok(0);
    }
    if fraction.len() > 9 {
        bail!("Too many decimal places: {fraction}");
    }
    if !fraction.bytes().all(|b| b.is_ascii_digit()) {
        bail!("Invalid fractional part: {fraction}");
    }

    let digits: u64 = fraction.parse()?;
    let scale = 10_u64.pow(9 - u32::try_from(fraction.len())?);

    // Scale to nanounits first so the division happens once.
    let nanos = u128::from(digits * scale) * u128::from(multiplier);
    u64::try_from(nanos / 1_000_000_000).map_err(|_| anyhow!("Size value overflow"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size_bytes_keep_double_space() {
        assert_eq!(format_size(0), "0  B");
        assert_eq!(format_size(1), "1  B");
        assert_eq!(format_size(1023), "1023  B");
    }

    #[test]
    fn test_format_size_unit_boundaries() {
        assert_eq!(format_size(1024), "1 KB");
        assert_eq!(format_size(1_048_576), "1 MB");
        assert_eq!(format_size(1_073_741_824), "1 GB");
        assert_eq!(format_size(1_048_575), "1024 KB");
    }

    #[test]
    fn test_format_size_fractions() {
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(8192), "8 KB");
        assert_eq!(format_size(1_288_490_189), "1.2 GB");
        // 1100 / 1024 = 1.07421875
        assert_eq!(format_size(1100), "1.07 KB");
    }

    #[test]
    fn test_format_size_rounds_half_up() {
        // 1034 / 1024 = 1.009765625, so the third decimal pushes it up
        assert_eq!(format_size(1034), "1.01 KB");
        // 5125 / 1024 = 5.0048828125
        assert_eq!(format_size(5125), "5 KB");
        // 1.125 KB is an exact half at the second decimal
        assert_eq!(format_size(1152), "1.13 KB");
    }

    #[test]
    fn test_round_half_up() {
        assert!((round_half_up(0.125, 2) - 0.13).abs() < f64::EPSILON);
        assert!((round_half_up(2.5, 0) - 3.0).abs() < f64::EPSILON);
        assert!((round_half_up(2.4999, 0) - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_size_plain_and_units() {
        assert_eq!(parse_size("0").unwrap(), 0);
        assert_eq!(parse_size("4096").unwrap(), 4096);
        assert_eq!(parse_size("512B").unwrap(), 512);
        assert_eq!(parse_size("4KiB").unwrap(), 4096);
        assert_eq!(parse_size("4kib").unwrap(), 4096);
        assert_eq!(parse_size("4KB").unwrap(), 4000);
        assert_eq!(parse_size("1MiB").unwrap(), 1_048_576);
        assert_eq!(parse_size("1GB").unwrap(), 1_000_000_000);
        assert_eq!(parse_size(" 64 KiB ").unwrap(), 65_536);
    }

    #[test]
    fn test_parse_size_decimals() {
        assert_eq!(parse_size("1.5KiB").unwrap(), 1536);
        assert_eq!(parse_size("0.5MB").unwrap(), 500_000);
        assert_eq!(parse_size("3.14159KB").unwrap(), 3141);
    }

    #[test]
    fn test_parse_size_invalid() {
        assert!(parse_size("").is_err());
        assert!(parse_size("KiB").is_err());
        assert!(parse_size("abc").is_err());
        assert!(parse_size("1.2.3KB").is_err());
        assert!(parse_size("-1KB").is_err());
        assert!(parse_size("1.1234567890KB").is_err());
        assert!(parse_size("99999999999999999999GB").is_err());
    }
}
