//! Solar position.
//!
//! Subsolar point from the Astronomical Almanac low-precision solar
//! ephemeris (mean longitude and mean anomaly polynomials, two-term equation
//! of center, equation of time), good to a few hundredths of a degree over
//! 1601 to 2100. That is the accuracy class the conductance
//! parameterizations are defined against; a full ephemeris would add
//! nothing here.

use chrono::{DateTime, Datelike, Timelike, Utc};

/// Geographic latitude and longitude of the subsolar point, in degrees.
///
/// The subsolar latitude is the solar declination; the longitude follows
/// from UT and the equation of time (the Earth rotates one degree every
/// 240 s). Longitude is returned in (-180, 180].
///
/// # Panics
/// Panics if the year is outside 1601..=2100, the validity range of the
/// series.
pub fn subsolar_point(time: DateTime<Utc>) -> (f64, f64) {
    let year = time.year();
    assert!(
        (1601..=2100).contains(&year),
        "subsolar point series is only valid for years 1601..=2100, got {}",
        year
    );
    let doy = f64::from(time.ordinal());
    let ut = f64::from(time.num_seconds_from_midnight());

    let yr = f64::from(year - 2000);
    // Leap years since 1601; Gregorian century years up to 1900 were skipped
    let mut nleap = (year - 1601) / 4 - 99;
    if year <= 1900 {
        nleap += 3 - (year - 1601) / 100;
    }
    let nleap = f64::from(nleap);

    // Mean longitude and mean anomaly at 12 UT on Jan 1 (degrees)
    let l0 = -79.549 + (-0.238699 * (yr - 4.0 * nleap) + 3.08514e-2 * nleap);
    let g0 = -2.472 + (-0.2558905 * (yr - 4.0 * nleap) - 3.79617e-2 * nleap);

    // Days since 12 UT on Jan 1, including fraction
    let df = (ut / 86400.0 - 1.5) + doy;

    let lmean = l0 + 0.9856474 * df;
    let grad = (g0 + 0.9856003 * df).to_radians();

    // Ecliptic longitude with the two-term equation of center
    let lmrad = (lmean + 1.915 * grad.sin() + 0.020 * (2.0 * grad).sin()).to_radians();
    let sinlm = lmrad.sin();

    // Obliquity of the ecliptic
    let n = df + 365.0 * yr + nleap;
    let epsrad = (23.439 - 4e-7 * n).to_radians();

    let alpha = (epsrad.cos() * sinlm).atan2(lmrad.cos()).to_degrees();
    let sslat = (epsrad.sin() * sinlm).asin().to_degrees();

    // Equation of time (degrees), wrapped to +/- 180
    let mut etdeg = lmean - alpha;
    etdeg -= 360.0 * (etdeg / 360.0).round();

    let mut sslon = 180.0 - (ut / 240.0 + etdeg);
    sslon -= 360.0 * (sslon / 360.0).round();
    (sslat, sslon)
}

/// Solar zenith angle in degrees at a geographic location.
///
/// Spherical-triangle angle between the local vertical and the direction to
/// the Sun:
/// `cos(sza) = sin(lat)sin(sslat) + cos(lat)cos(sslat)cos(lon - sslon)`.
pub fn solar_zenith_angle(lat: f64, lon: f64, time: DateTime<Utc>) -> f64 {
    zenith_angle(lat, lon, subsolar_point(time))
}

/// Zenith angle against an already-computed subsolar point, so grid
/// evaluations solve the ephemeris once.
pub(crate) fn zenith_angle(lat: f64, lon: f64, (sslat, sslon): (f64, f64)) -> f64 {
    let cos_sza = lat.to_radians().sin() * sslat.to_radians().sin()
        + lat.to_radians().cos() * sslat.to_radians().cos() * (lon - sslon).to_radians().cos();
    cos_sza.clamp(-1.0, 1.0).acos().to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn test_j2000_noon() {
        let (sslat, sslon) = subsolar_point(utc(2000, 1, 1, 12, 0));
        assert!(
            (sslat - (-23.0341)).abs() < 1e-3,
            "declination on 2000-01-01 should be near -23.03, got {}",
            sslat
        );
        // Early-January equation of time puts the Sun slightly east of
        // Greenwich at 12 UT
        assert!(
            (sslon - 0.8251).abs() < 1e-3,
            "subsolar longitude should be near +0.83, got {}",
            sslon
        );
    }

    #[test]
    fn test_equinox_declination_is_zero() {
        let (sslat, _) = subsolar_point(utc(2015, 3, 20, 22, 45));
        assert!(
            sslat.abs() < 0.05,
            "declination at the March equinox should vanish, got {}",
            sslat
        );
    }

    #[test]
    fn test_solstice_declinations() {
        let (june, _) = subsolar_point(utc(2015, 6, 21, 16, 38));
        assert!(
            (june - 23.4367).abs() < 0.01,
            "June solstice declination should reach +23.44, got {}",
            june
        );
        let (december, _) = subsolar_point(utc(2015, 12, 22, 4, 48));
        assert!(
            (december - (-23.4367)).abs() < 0.01,
            "December solstice declination should reach -23.44, got {}",
            december
        );
    }

    #[test]
    fn test_pre_1900_leap_year_handling() {
        // 1700, 1800 and 1900 were not leap years; the series accounts for
        // that below 1900
        let (sslat, sslon) = subsolar_point(utc(1859, 9, 2, 0, 0));
        assert!(
            (sslat - 8.2179).abs() < 0.01,
            "early-September declination should be near +8.2, got {}",
            sslat
        );
        assert!(
            (sslon - 179.9611).abs() < 0.05,
            "at 00 UT the subsolar point sits near the date line, got {}",
            sslon
        );
    }

    #[test]
    fn test_sza_at_subsolar_point_is_zero() {
        let time = utc(2015, 3, 17, 12, 0);
        let (sslat, sslon) = subsolar_point(time);
        let sza = solar_zenith_angle(sslat, sslon, time);
        assert!(sza < 1e-6, "sza at the subsolar point should be 0, got {}", sza);

        let antipode = solar_zenith_angle(-sslat, sslon + 180.0, time);
        assert!(
            (antipode - 180.0).abs() < 1e-6,
            "sza at the antipode should be 180, got {}",
            antipode
        );
    }

    #[test]
    fn test_sza_high_latitude_noon() {
        // Mid-March, lat 70: solar elevation is sza = lat - declination at
        // local noon (the subsolar longitude, ~2 degrees east)
        let sza = solar_zenith_angle(70.0, 2.1114, utc(2015, 3, 17, 12, 0));
        assert!(
            (sza - (70.0 + 1.3654)).abs() < 0.01,
            "noon sza should be lat - declination, got {}",
            sza
        );
    }

    #[test]
    fn test_sza_longitude_symmetry() {
        let time = utc(2015, 3, 17, 12, 0);
        let (_, sslon) = subsolar_point(time);
        let east = solar_zenith_angle(45.0, sslon + 30.0, time);
        let west = solar_zenith_angle(45.0, sslon - 30.0, time);
        assert!(
            (east - west).abs() < 1e-9,
            "sza should be symmetric about the subsolar meridian: {} vs {}",
            east,
            west
        );
    }

    #[test]
    #[should_panic(expected = "1601..=2100")]
    fn test_year_out_of_range_panics() {
        let _ = subsolar_point(utc(1500, 6, 1, 0, 0));
    }
}
