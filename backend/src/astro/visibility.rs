//! Rise/set hour angles and default LST observing windows.
//!
//! The hour angle at which a target crosses a given elevation follows from the
//! altitude formula of the astronomical triangle:
//!
//! ```text
//! cos(H) = (sin(el) − sin(φ)·sin(δ)) / (cos(δ)·cos(φ))
//! ```
//!
//! where `δ` is the declination, `φ` the observer latitude and `el` the
//! elevation limit. Targets that never reach the limit saturate at `H = 0°`,
//! targets that never drop below it saturate at `H = 180°`.

use qtty::{Degree, Degrees, HourAngle, Radians};
use serde::{Deserialize, Serialize};

use super::sexagesimal::{format_hours_minutes, parse_degrees, parse_hours};
use crate::error::{AstroError, AstroResult};
use crate::models::Observatory;

/// Below this magnitude `cos(δ)·cos(φ)` is treated as zero.
const SINGULARITY_EPSILON: f64 = 1e-12;

/// Default LST observing window derived from a target's rise and set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LstWindow {
    /// Window start, `HH:MM`
    pub lst_start: String,
    /// Window end, `HH:MM`
    pub lst_end: String,
    /// Half-width of the window
    pub hour_angle: Degrees,
}

impl LstWindow {
    /// True when the target never reaches the elevation limit.
    pub fn never_rises(&self) -> bool {
        self.hour_angle.value() == 0.0
    }

    /// True when the target stays above the elevation limit all day.
    pub fn always_up(&self) -> bool {
        self.hour_angle.value() == 180.0
    }
}

fn check_angle(name: &str, angle: Degrees) -> AstroResult<()> {
    let value = angle.value();
    if !value.is_finite() {
        return Err(AstroError::invalid_input(format!(
            "{} must be finite, got {}",
            name, value
        )));
    }
    if value.abs() > 90.0 {
        return Err(AstroError::invalid_input(format!(
            "{} must lie in [-90, 90] degrees, got {}",
            name, value
        )));
    }
    Ok(())
}

/// Hour angle at which a target crosses `elevation_limit`.
///
/// Returns `0°` when the target never rises to the limit and `180°` when it
/// never sets below it. A target on the celestial pole seen from the equator
/// (or any target seen from a geographic pole) makes the formula degenerate;
/// that case is reported as [`AstroError::InvalidAstronomicalInput`].
///
/// # Examples
///
/// ```
/// use atsched::astro::visibility::hour_angle_at_elevation;
/// use qtty::Degrees;
///
/// let h = hour_angle_at_elevation(
///     Degrees::new(-30.0),
///     Degrees::new(-33.0),
///     Degrees::new(12.0),
/// ).unwrap();
/// assert!(h.value() > 90.0 && h.value() < 180.0);
/// ```
pub fn hour_angle_at_elevation(
    declination: Degrees,
    latitude: Degrees,
    elevation_limit: Degrees,
) -> AstroResult<Degrees> {
    check_angle("declination", declination)?;
    check_angle("latitude", latitude)?;
    check_angle("elevation limit", elevation_limit)?;

    let denominator = declination.cos() * latitude.cos();
    if denominator.abs() < SINGULARITY_EPSILON {
        return Err(AstroError::invalid_input(format!(
            "hour angle is undefined for declination {} at latitude {}",
            declination.value(),
            latitude.value()
        )));
    }

    // cos(90° - el) == sin(el)
    let cos_h = (elevation_limit.sin() - latitude.sin() * declination.sin()) / denominator;

    if cos_h > 1.0 {
        return Ok(Degrees::new(0.0));
    }
    if cos_h < -1.0 {
        return Ok(Degrees::new(180.0));
    }
    Ok(Radians::new(cos_h.acos()).to::<Degree>())
}

/// Default LST window for a target at (`ra`, `dec`) observed from `observatory`.
///
/// The window is centred on the target's transit (`LST == RA`) and spans the
/// hour angle at which it crosses the observatory's elevation limit. Bounds are
/// formatted as `HH:MM` with the minutes truncated. When the target never
/// rises, or never sets, both bounds coincide.
pub fn compute_default_window(
    ra: &str,
    dec: &str,
    observatory: &Observatory,
) -> AstroResult<LstWindow> {
    let ra = parse_hours(ra)?.to::<Degree>();
    let dec = parse_degrees(dec)?;
    let hour_angle =
        hour_angle_at_elevation(dec, observatory.latitude, observatory.elevation_limit)?;

    let start = (ra - hour_angle).wrap_pos();
    let end = (ra + hour_angle).wrap_pos();

    log::debug!(
        "default LST window at {}: ra={:.4}° dec={:.4}° H={:.4}°",
        observatory.name,
        ra.value(),
        dec.value(),
        hour_angle.value()
    );

    Ok(LstWindow {
        lst_start: format_hours_minutes(start.to::<HourAngle>().value())?,
        lst_end: format_hours_minutes(end.to::<HourAngle>().value())?,
        hour_angle,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Telescope;
    use proptest::prelude::*;

    fn deg(v: f64) -> Degrees {
        Degrees::new(v)
    }

    fn test_site() -> Observatory {
        Observatory::new("test", deg(-33.0), deg(149.0), deg(12.0))
    }

    #[test]
    fn test_rise_and_set_near_culmination() {
        let h = hour_angle_at_elevation(deg(-30.0), deg(-33.0), deg(12.0)).unwrap();
        assert!(h.value() > 90.0 && h.value() < 180.0, "got {}", h.value());
        assert!((h.value() - 95.09).abs() < 0.05);
    }

    #[test]
    fn test_never_rises_returns_zero() {
        // Peak elevation is 90 - |(-33) - 40| = 17 degrees
        let h = hour_angle_at_elevation(deg(40.0), deg(-33.0), deg(20.0)).unwrap();
        assert_eq!(h.value(), 0.0);
    }

    #[test]
    fn test_circumpolar_returns_180() {
        // Lowest elevation is |(-33) + (-80)| - 90 = 23 degrees
        let h = hour_angle_at_elevation(deg(-80.0), deg(-33.0), deg(12.0)).unwrap();
        assert_eq!(h.value(), 180.0);
    }

    #[test]
    fn test_zero_elevation_equator_is_six_hours() {
        let h = hour_angle_at_elevation(deg(0.0), deg(0.0), deg(0.0)).unwrap();
        assert!((h.value() - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_pole_at_equator_is_an_error() {
        let result = hour_angle_at_elevation(deg(90.0), deg(0.0), deg(12.0));
        assert!(matches!(
            result,
            Err(AstroError::InvalidAstronomicalInput { .. })
        ));
        assert!(hour_angle_at_elevation(deg(-90.0), deg(0.0), deg(12.0)).is_err());
    }

    #[test]
    fn test_observer_at_pole_is_an_error() {
        assert!(hour_angle_at_elevation(deg(10.0), deg(-90.0), deg(12.0)).is_err());
    }

    #[test]
    fn test_non_finite_input_is_an_error() {
        assert!(hour_angle_at_elevation(deg(f64::NAN), deg(-33.0), deg(12.0)).is_err());
        assert!(hour_angle_at_elevation(deg(0.0), deg(f64::INFINITY), deg(12.0)).is_err());
        assert!(hour_angle_at_elevation(deg(0.0), deg(-33.0), deg(f64::NAN)).is_err());
    }

    #[test]
    fn test_out_of_range_declination_is_an_error() {
        assert!(hour_angle_at_elevation(deg(91.0), deg(-33.0), deg(12.0)).is_err());
    }

    #[test]
    fn test_default_window_crab() {
        let window = compute_default_window("05:34:32", "+22:00:48", &test_site()).unwrap();
        assert_eq!(window.lst_start, "01:42");
        assert_eq!(window.lst_end, "09:26");
        assert_ne!(window.lst_start, window.lst_end);
    }

    #[test]
    fn test_default_window_wraps_through_midnight() {
        let window = compute_default_window("00:30", "-30:00", &test_site()).unwrap();
        // H is about 95 degrees (6h20m), so the start wraps to the previous day
        assert!(window.lst_start.as_str() > "17:00");
        assert!(window.lst_end.as_str() < "07:00");
    }

    #[test]
    fn test_default_window_circumpolar_target() {
        let window = compute_default_window("12:00", "-80:00", &test_site()).unwrap();
        assert!(window.always_up());
        assert_eq!(window.lst_start, window.lst_end);
        assert_eq!(window.lst_start, "00:00");
    }

    #[test]
    fn test_default_window_never_rises() {
        let parkes = Telescope::Parkes.observatory();
        let window = compute_default_window("03:00", "+60:00", &parkes).unwrap();
        assert!(window.never_rises());
        assert_eq!(window.lst_start, "03:00");
        assert_eq!(window.lst_end, "03:00");
    }

    #[test]
    fn test_never_rising_window_is_centred_on_every_ra() {
        let parkes = Telescope::Parkes.observatory();
        for minute in 0..24 * 60 {
            let ra = format!("{:02}:{:02}", minute / 60, minute % 60);
            let window = compute_default_window(&ra, "+60:00", &parkes).unwrap();
            assert!(window.never_rises());
            assert_eq!(window.lst_start, ra);
            assert_eq!(window.lst_end, ra);
        }
    }

    #[test]
    fn test_default_window_rejects_bad_coordinates() {
        assert!(matches!(
            compute_default_window("xx", "-30", &test_site()),
            Err(AstroError::InvalidSexagesimal { .. })
        ));
        assert!(compute_default_window("10:00", "-95:00", &test_site()).is_err());
    }

    proptest! {
        #[test]
        fn prop_mirror_symmetry(dec in -89.0f64..89.0, lat in -89.0f64..89.0, el in -10.0f64..60.0) {
            let a = hour_angle_at_elevation(deg(dec), deg(lat), deg(el)).unwrap();
            let b = hour_angle_at_elevation(deg(-dec), deg(-lat), deg(el)).unwrap();
            prop_assert!((a.value() - b.value()).abs() < 1e-6);
        }

        #[test]
        fn prop_saturates_at_zero_above_peak(dec in -80.0f64..80.0, lat in -80.0f64..80.0, delta in 0.01f64..5.0) {
            let peak = 90.0 - (lat - dec).abs();
            let el = peak + delta;
            prop_assume!(el <= 90.0);
            let h = hour_angle_at_elevation(deg(dec), deg(lat), deg(el)).unwrap();
            prop_assert_eq!(h.value(), 0.0);
        }

        #[test]
        fn prop_saturates_at_180_below_minimum(dec in -80.0f64..80.0, lat in -80.0f64..80.0, delta in 0.01f64..5.0) {
            let lowest = (lat + dec).abs() - 90.0;
            let el = lowest - delta;
            prop_assume!(el >= -90.0);
            let h = hour_angle_at_elevation(deg(dec), deg(lat), deg(el)).unwrap();
            prop_assert_eq!(h.value(), 180.0);
        }

        #[test]
        fn prop_hour_angle_in_range(dec in -89.0f64..89.0, lat in -89.0f64..89.0, el in -90.0f64..90.0) {
            let h = hour_angle_at_elevation(deg(dec), deg(lat), deg(el)).unwrap();
            prop_assert!((0.0..=180.0).contains(&h.value()));
        }

        #[test]
        fn prop_default_window_is_well_formed(h in 0u32..24, m in 0u32..60, d in -85i32..85) {
            let ra = format!("{:02}:{:02}:00", h, m);
            let dec = format!("{}:00:00", d);
            let window = compute_default_window(&ra, &dec, &test_site()).unwrap();
            for bound in [&window.lst_start, &window.lst_end] {
                prop_assert_eq!(bound.len(), 5);
                let hours: u32 = bound[..2].parse().unwrap();
                let minutes: u32 = bound[3..].parse().unwrap();
                prop_assert!(hours < 24 && minutes < 60);
            }
        }
    }
}
