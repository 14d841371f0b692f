//! Combined auroral and solar conductance.
//!
//! The top-level model: Hall and Pedersen conductance on geographic or
//! magnetic coordinates at a given time, combining the Hardy auroral oval
//! with the solar EUV contribution and an optional uniform starlight
//! background.

use chrono::{DateTime, Datelike, Utc};
use ndarray::{Array1, ArrayD};
use serde::{Deserialize, Serialize};

use crate::channel::{Channel, ConductanceField};
use crate::dipole::{self, Dipole};
use crate::errors::ConductanceResult;
use crate::euv::{self, Calibration};
use crate::hardy::{self, validate_kp};
use crate::sunlight;
use crate::utils;

/// Which frame the coordinate inputs of the combined model are given in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CoordinateFrame {
    /// Geographic latitude and longitude.
    #[default]
    Geographic,
    /// Centered-dipole latitude and longitude.
    Magnetic,
}

/// Parameters of the combined conductance model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HardyEuvParameters {
    /// Uniform background conductance added to every sample (mho).
    ///
    /// Stands in for stellar and galactic illumination of the night-side
    /// ionosphere. Default: 0.0 mho
    pub starlight: f64,

    /// F10.7 solar radio flux (solar flux units).
    ///
    /// Default: 100.0 sfu
    pub f107: f64,

    /// Frame of the coordinate inputs.
    ///
    /// Default: Geographic
    pub frame: CoordinateFrame,

    /// EUV calibration profile.
    ///
    /// Default: MoenBrekke1993
    pub calibration: Calibration,
}

impl Default for HardyEuvParameters {
    fn default() -> Self {
        Self {
            starlight: 0.0,                            // mho
            f107: 100.0,                               // sfu
            frame: CoordinateFrame::Geographic,
            calibration: Calibration::MoenBrekke1993,
        }
    }
}

/// Combined Hall and/or Pedersen conductance from auroral precipitation,
/// solar EUV ionization and the starlight background, in mho.
///
/// `lon` and `lat` are in degrees in the frame named by `parameters.frame`;
/// they are broadcast against each other and the output carries the
/// broadcast shape. `time` fixes both the solar position and the dipole
/// epoch (the calendar year). Each requested channel is evaluated per
/// sample as `auroral + EUV + starlight`.
///
/// # Errors
/// [`InvalidKp`](crate::ConductanceError::InvalidKp) if `kp` is outside
/// 0..=6, [`ShapeMismatch`](crate::ConductanceError::ShapeMismatch) if the
/// coordinate shapes cannot be broadcast together.
pub fn hardy_euv(
    lon: &ArrayD<f64>,
    lat: &ArrayD<f64>,
    kp: i32,
    time: DateTime<Utc>,
    channel: Channel,
    parameters: &HardyEuvParameters,
) -> ConductanceResult<ConductanceField> {
    let kp = validate_kp(kp)?;
    let shape = utils::broadcast_shape(lon.shape(), lat.shape())?;
    let lon = utils::broadcast_flatten(lon, &shape)?;
    let lat = utils::broadcast_flatten(lat, &shape)?;

    let dipole = Dipole::new(f64::from(time.year()));
    let subsolar = sunlight::subsolar_point(time);
    let (_, subsolar_mlon) = dipole.geo2mag(subsolar.0, subsolar.1);

    // Each sample needs both frames: the auroral oval is drawn in magnetic
    // latitude and local time, the EUV term in the geographic position
    // relative to the Sun
    let n = lon.len();
    let mut mlat = Vec::with_capacity(n);
    let mut mlt = Vec::with_capacity(n);
    let mut sza = Vec::with_capacity(n);
    for (&sample_lat, &sample_lon) in lat.iter().zip(lon.iter()) {
        let (glat, glon, sample_mlat, sample_mlon) = match parameters.frame {
            CoordinateFrame::Geographic => {
                let (m_lat, m_lon) = dipole.geo2mag(sample_lat, sample_lon);
                (sample_lat, sample_lon, m_lat, m_lon)
            }
            CoordinateFrame::Magnetic => {
                let (g_lat, g_lon) = dipole.mag2geo(sample_lat, sample_lon);
                (g_lat, g_lon, sample_lat, sample_lon)
            }
        };
        mlat.push(sample_mlat);
        mlt.push(dipole::mlt_from_subsolar(sample_mlon, subsolar_mlon));
        sza.push(sunlight::zenith_angle(glat, glon, subsolar));
    }
    let mlat = Array1::from(mlat);
    let mlt = Array1::from(mlt);
    let sza = Array1::from(sza).into_dyn();

    log::debug!(
        "evaluating combined conductance for {} samples (kp {}, {:?} frame, {} calibration)",
        n,
        kp,
        parameters.frame,
        parameters.calibration.name()
    );

    Ok(ConductanceField::from_eval(channel, |kind| {
        let auroral = hardy::channel_conductance(kind, kp, &mlat, &mlt);
        let solar = euv::channel_conductance(kind, &sza, parameters.f107, parameters.calibration);
        utils::into_shape(auroral.into_dyn() + solar + parameters.starlight, &shape)
    }))
}
