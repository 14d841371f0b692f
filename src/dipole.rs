//! Centered-dipole coordinates.
//!
//! The auroral model is parameterized in magnetic latitude and magnetic
//! local time, while callers and the solar position work in geographic
//! coordinates. This module provides the bridge: a centered-dipole frame
//! whose axis follows the degree-1 IGRF Gauss coefficients for the chosen
//! epoch. Higher-degree field structure is deliberately ignored; the Hardy
//! patterns are statistical ovals, not field-line traces.

use chrono::{DateTime, Utc};

use crate::interpolate::Interp1d;
use crate::sunlight;

// Degree-1 IGRF Gauss coefficients (nT) at 5-year epochs, 1900-2025.
const IGRF_EPOCHS: [f64; 26] = [
    1900.0, 1905.0, 1910.0, 1915.0, 1920.0, 1925.0, 1930.0, 1935.0, 1940.0, 1945.0, 1950.0,
    1955.0, 1960.0, 1965.0, 1970.0, 1975.0, 1980.0, 1985.0, 1990.0, 1995.0, 2000.0, 2005.0,
    2010.0, 2015.0, 2020.0, 2025.0,
];
const IGRF_G10: [f64; 26] = [
    -31543.0, -31464.0, -31354.0, -31212.0, -31060.0, -30926.0, -30805.0, -30715.0, -30654.0,
    -30594.0, -30554.0, -30500.0, -30421.0, -30334.0, -30220.0, -30100.0, -29992.0, -29873.0,
    -29775.0, -29692.0, -29619.4, -29554.63, -29496.57, -29441.46, -29404.8, -29376.3,
];
const IGRF_G11: [f64; 26] = [
    -2298.0, -2298.0, -2297.0, -2306.0, -2317.0, -2318.0, -2316.0, -2306.0, -2292.0, -2285.0,
    -2250.0, -2215.0, -2169.0, -2119.0, -2068.0, -2013.0, -1956.0, -1905.0, -1848.0, -1784.0,
    -1728.2, -1669.05, -1586.42, -1501.77, -1450.9, -1413.9,
];
const IGRF_H11: [f64; 26] = [
    5922.0, 5909.0, 5898.0, 5875.0, 5845.0, 5817.0, 5808.0, 5812.0, 5821.0, 5810.0, 5815.0,
    5820.0, 5791.0, 5776.0, 5737.0, 5675.0, 5604.0, 5500.0, 5406.0, 5306.0, 5186.1, 5077.99,
    4944.26, 4795.99, 4652.5, 4523.0,
];

/// Degree-1 Gauss coefficients at an epoch, linearly interpolated between
/// the IGRF generations (end segments extended outside 1900-2025).
fn gauss_coefficients(epoch: f64) -> (f64, f64, f64) {
    let eval = |values: &[f64]| Interp1d::new(IGRF_EPOCHS.to_vec(), values.to_vec()).eval(epoch);
    (eval(&IGRF_G10), eval(&IGRF_G11), eval(&IGRF_H11))
}

/// Centered-dipole coordinate transform for one epoch.
///
/// The dipole axis unit vector is `-(g11, h11, g10) / B0` with
/// `B0 = sqrt(g10^2 + g11^2 + h11^2)`, pointing at the northern dipole
/// pole. An orthonormal basis is completed with the dipole-frame y axis
/// along geographic east of the pole meridian; magnetic latitude and
/// longitude are the spherical coordinates of a position in that basis.
#[derive(Debug, Clone)]
pub struct Dipole {
    epoch: f64,
    // Dipole basis vectors in geocentric cartesian coordinates
    // (x toward lat 0 lon 0, z toward geographic north)
    x_axis: [f64; 3],
    y_axis: [f64; 3],
    z_axis: [f64; 3],
}

impl Dipole {
    /// Build the transform for an epoch given in calendar years
    /// (e.g. `2015.0`).
    pub fn new(epoch: f64) -> Self {
        let (g10, g11, h11) = gauss_coefficients(epoch);
        let b0 = (g10 * g10 + g11 * g11 + h11 * h11).sqrt();
        let z_axis = [-g11 / b0, -h11 / b0, -g10 / b0];

        // y toward geographic east of the pole meridian, x completing the
        // right-handed frame
        let h = z_axis[0].hypot(z_axis[1]);
        let y_axis = [-z_axis[1] / h, z_axis[0] / h, 0.0];
        let x_axis = cross(&y_axis, &z_axis);

        Self {
            epoch,
            x_axis,
            y_axis,
            z_axis,
        }
    }

    /// The epoch this transform is bound to, in calendar years.
    pub fn epoch(&self) -> f64 {
        self.epoch
    }

    /// Geographic coordinates of the northern dipole pole, in degrees.
    pub fn pole(&self) -> (f64, f64) {
        (
            self.z_axis[2].asin().to_degrees(),
            self.z_axis[1].atan2(self.z_axis[0]).to_degrees(),
        )
    }

    /// Geographic to centered-dipole coordinates, degrees in and out.
    pub fn geo2mag(&self, lat: f64, lon: f64) -> (f64, f64) {
        let r = unit_vector(lat, lon);
        let x = dot(&r, &self.x_axis);
        let y = dot(&r, &self.y_axis);
        let z = dot(&r, &self.z_axis);
        (z.clamp(-1.0, 1.0).asin().to_degrees(), y.atan2(x).to_degrees())
    }

    /// Centered-dipole to geographic coordinates, degrees in and out.
    pub fn mag2geo(&self, mlat: f64, mlon: f64) -> (f64, f64) {
        let m = unit_vector(mlat, mlon);
        let r = [
            self.x_axis[0] * m[0] + self.y_axis[0] * m[1] + self.z_axis[0] * m[2],
            self.x_axis[1] * m[0] + self.y_axis[1] * m[1] + self.z_axis[1] * m[2],
            self.x_axis[2] * m[0] + self.y_axis[2] * m[1] + self.z_axis[2] * m[2],
        ];
        (
            r[2].clamp(-1.0, 1.0).asin().to_degrees(),
            r[1].atan2(r[0]).to_degrees(),
        )
    }

    /// Magnetic local time in hours [0, 24) for a dipole longitude.
    ///
    /// Midnight/noon are defined by the dipole longitude of the subsolar
    /// point: `mlt = ((mlon - mlon_subsolar) / 15 + 12) mod 24`.
    pub fn mlon2mlt(&self, mlon: f64, time: DateTime<Utc>) -> f64 {
        let (sslat, sslon) = sunlight::subsolar_point(time);
        let (_, ss_mlon) = self.geo2mag(sslat, sslon);
        mlt_from_subsolar(mlon, ss_mlon)
    }
}

/// Magnetic local time for a dipole longitude, given the precomputed dipole
/// longitude of the subsolar point.
pub(crate) fn mlt_from_subsolar(mlon: f64, subsolar_mlon: f64) -> f64 {
    ((mlon - subsolar_mlon) / 15.0 + 12.0).rem_euclid(24.0)
}

fn unit_vector(lat: f64, lon: f64) -> [f64; 3] {
    let (la, lo) = (lat.to_radians(), lon.to_radians());
    [la.cos() * lo.cos(), la.cos() * lo.sin(), la.sin()]
}

fn dot(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn cross(a: &[f64; 3], b: &[f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}
