//! Sexagesimal string parsing and formatting.
//!
//! Positions and LST bounds travel as colon-separated strings (`H:M:S` for
//! right ascension and sidereal time, `D:M:S` for declination). The leading
//! sign applies to the whole value, so `-00:30:00` is half a degree south.

use qtty::{Degrees, HourAngles};

use crate::error::{AstroError, AstroResult};

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Slack absorbed before truncating to whole minutes, in minutes.
///
/// Hour values that went through degree conversions land a few ulps below
/// the intended minute; without this `01:40` would format as `01:39`.
const MINUTE_TOLERANCE: f64 = 1e-6;

/// Sign and up to three numeric components of a sexagesimal string.
struct Components {
    sign: f64,
    values: [f64; 3],
}

impl Components {
    fn total(&self) -> f64 {
        let [units, minutes, seconds] = self.values;
        self.sign * (units + minutes / 60.0 + seconds / 3600.0)
    }
}

fn split_components(input: &str) -> AstroResult<Components> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AstroError::invalid_sexagesimal(input, "empty value"));
    }

    let (sign, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1.0, rest),
        None => (1.0, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let parts: Vec<&str> = body.split(':').collect();
    if parts.len() > 3 {
        return Err(AstroError::invalid_sexagesimal(
            input,
            format!("expected at most 3 components, found {}", parts.len()),
        ));
    }

    let mut values = [0.0; 3];
    for (position, part) in parts.iter().enumerate() {
        let part = part.trim();
        if part.starts_with('-') || part.starts_with('+') {
            return Err(AstroError::invalid_sexagesimal(
                input,
                "sign is only allowed on the leading component",
            ));
        }
        let value: f64 = part.parse().map_err(|_| {
            AstroError::invalid_sexagesimal(input, format!("'{}' is not a number", part))
        })?;
        if !value.is_finite() {
            return Err(AstroError::invalid_sexagesimal(input, "component is not finite"));
        }
        if position > 0 && !(0.0..60.0).contains(&value) {
            return Err(AstroError::invalid_sexagesimal(
                input,
                format!("minutes and seconds must lie in [0, 60), got {}", value),
            ));
        }
        values[position] = value;
    }

    Ok(Components { sign, values })
}

/// Parse an `H[:M[:S]]` string (right ascension, LST) into hour angles.
///
/// # Examples
///
/// ```
/// use atsched::astro::sexagesimal::parse_hours;
///
/// let ra = parse_hours("05:30").unwrap();
/// assert_eq!(ra.value(), 5.5);
/// ```
pub fn parse_hours(input: &str) -> AstroResult<HourAngles> {
    split_components(input).map(|c| HourAngles::new(c.total()))
}

/// Parse a `D[:M[:S]]` string (declination, latitude) into degrees.
///
/// # Examples
///
/// ```
/// use atsched::astro::sexagesimal::parse_degrees;
///
/// let dec = parse_degrees("-00:30:00").unwrap();
/// assert_eq!(dec.value(), -0.5);
/// ```
pub fn parse_degrees(input: &str) -> AstroResult<Degrees> {
    split_components(input).map(|c| Degrees::new(c.total()))
}

/// Format an hour value as `HH:MM`, wrapped into `[0, 24)`.
///
/// Minutes are truncated, never rounded up, so `23.9999` formats as `23:59`.
/// Non-finite input is an `InvalidAstronomicalInput` error.
pub fn format_hours_minutes(hours: f64) -> AstroResult<String> {
    if !hours.is_finite() {
        return Err(AstroError::invalid_input(format!(
            "cannot format non-finite hour value {}",
            hours
        )));
    }
    let wrapped = hours.rem_euclid(24.0);
    // rem_euclid can return exactly 24.0 for tiny negative inputs
    let total_minutes = ((wrapped * 60.0 + MINUTE_TOLERANCE).floor() as u32) % MINUTES_PER_DAY;
    Ok(format!("{:02}:{:02}", total_minutes / 60, total_minutes % 60))
}
