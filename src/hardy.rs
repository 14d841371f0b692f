//! Auroral precipitation conductance.
//!
//! Statistical Hall and Pedersen conductance produced by auroral electron
//! precipitation, after Hardy et al. (1987). For each integer Kp activity
//! level the auroral oval is described by an Epstein transition function in
//! magnetic latitude whose four parameters vary with magnetic local time
//! through a low-order Fourier expansion. The coefficient tables are
//! embedded in the library and parsed once on first use.

use ndarray::{Array1, ArrayD, Zip};

use crate::channel::{Channel, ChannelKind, ConductanceField};
use crate::errors::{ConductanceError, ConductanceResult};
use crate::tables::{self, HardyTerm, TrigKind};
use crate::utils;

/// Poleward of the oval peak the model never drops below this value (mho).
const POLEWARD_FLOOR: f64 = 0.55;

/// Epstein transition-function parameters at one magnetic local time.
///
/// The conductance profile in magnetic latitude peaks at `max_value` when
/// the latitude equals `max_latitude`, approaches slope `up_slope` on the
/// equatorward side and `down_slope` on the poleward side. The tabulated
/// coefficients keep `up_slope` positive and `down_slope` negative, which
/// also keeps the transition function defined for every latitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct EpsteinParameters {
    /// Peak conductance (mho).
    pub max_value: f64,
    /// Magnetic latitude of the peak (degrees).
    pub max_latitude: f64,
    /// Equatorward slope (mho/degree).
    pub up_slope: f64,
    /// Poleward slope (mho/degree).
    pub down_slope: f64,
}

impl EpsteinParameters {
    /// Sum the Fourier rows of one Kp level at a magnetic local time.
    pub(crate) fn reconstruct(terms: &[HardyTerm], mlt: f64) -> Self {
        let mut parameters = EpsteinParameters {
            max_value: 0.0,
            max_latitude: 0.0,
            up_slope: 0.0,
            down_slope: 0.0,
        };
        for term in terms {
            let arg = f64::from(term.order) * mlt / 12.0 * std::f64::consts::PI;
            let basis = match term.kind {
                TrigKind::Cosine => arg.cos(),
                TrigKind::Sine => arg.sin(),
            };
            parameters.max_value += term.max_value * basis;
            parameters.max_latitude += term.max_latitude * basis;
            parameters.up_slope += term.up_slope * basis;
            parameters.down_slope += term.down_slope * basis;
        }
        parameters
    }

    /// Conductance at a magnetic latitude, floors applied.
    ///
    /// Southern-hemisphere latitudes mirror the northern oval. Equatorward
    /// of the peak a negative transition value clamps to zero; poleward it
    /// clamps to [`POLEWARD_FLOOR`].
    pub(crate) fn conductance(&self, mlat: f64) -> f64 {
        let mlat = mlat.abs();
        let x = mlat - self.max_latitude;
        let (s1, s2) = (self.up_slope, self.down_slope);
        let raw = self.max_value
            + s1 * x
            + (s2 - s1) * ((1.0 - (s1 / s2) * x.exp()) / (1.0 - s1 / s2)).ln();

        if mlat < self.max_latitude {
            raw.max(0.0)
        } else if raw < POLEWARD_FLOOR {
            POLEWARD_FLOOR
        } else {
            raw
        }
    }
}

/// Check a Kp activity index against the tabulated range 0..=6.
pub(crate) fn validate_kp(kp: i32) -> ConductanceResult<usize> {
    if (0..=6).contains(&kp) {
        Ok(kp as usize)
    } else {
        Err(ConductanceError::InvalidKp(kp))
    }
}

/// Auroral conductance for a single physical channel over flattened,
/// equal-length coordinate samples.
pub(crate) fn channel_conductance(
    kind: ChannelKind,
    kp: usize,
    mlat: &Array1<f64>,
    mlt: &Array1<f64>,
) -> Array1<f64> {
    let terms = tables::hardy_table(kind).terms(kp);
    Zip::from(mlat)
        .and(mlt)
        .map_collect(|&mlat, &mlt| EpsteinParameters::reconstruct(terms, mlt).conductance(mlat))
}

/// Hall and/or Pedersen auroral conductance, in mho.
///
/// `mlat` is magnetic latitude in degrees (southern latitudes mirror the
/// northern oval), `mlt` magnetic local time in hours; the two arrays are
/// broadcast against each other and the output carries the broadcast
/// shape. `kp` is the integer Kp activity index.
///
/// # Errors
/// [`InvalidKp`](ConductanceError::InvalidKp) if `kp` is outside 0..=6,
/// [`ShapeMismatch`](ConductanceError::ShapeMismatch) if the coordinate
/// shapes cannot be broadcast together.
pub fn hardy(
    mlat: &ArrayD<f64>,
    mlt: &ArrayD<f64>,
    kp: i32,
    channel: Channel,
) -> ConductanceResult<ConductanceField> {
    let kp = validate_kp(kp)?;
    let shape = utils::broadcast_shape(mlat.shape(), mlt.shape())?;
    let mlat = utils::broadcast_flatten(mlat, &shape)?;
    let mlt = utils::broadcast_flatten(mlt, &shape)?;

    Ok(ConductanceField::from_eval(channel, |kind| {
        utils::into_shape(channel_conductance(kind, kp, &mlat, &mlt), &shape)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr0, array};

    fn eval(mlat: f64, mlt: f64, kp: i32, channel: Channel) -> ConductanceField {
        hardy(
            &arr0(mlat).into_dyn(),
            &arr0(mlt).into_dyn(),
            kp,
            channel,
        )
        .unwrap()
    }

    fn eval_hall(mlat: f64, mlt: f64, kp: i32) -> f64 {
        *eval(mlat, mlt, kp, Channel::Hall).hall().unwrap().first().unwrap()
    }

    fn eval_pedersen(mlat: f64, mlt: f64, kp: i32) -> f64 {
        *eval(mlat, mlt, kp, Channel::Pedersen)
            .pedersen()
            .unwrap()
            .first()
            .unwrap()
    }

    // ===== Validation Tests =====

    #[test]
    fn test_kp_outside_tabulated_range() {
        for kp in [-3, -1, 7, 12] {
            let result = hardy(
                &arr0(65.0).into_dyn(),
                &arr0(12.0).into_dyn(),
                kp,
                Channel::Hall,
            );
            assert!(
                matches!(result, Err(ConductanceError::InvalidKp(k)) if k == kp),
                "kp {} should be rejected, got {:?}",
                kp,
                result
            );
        }
    }

    #[test]
    fn test_incompatible_shapes() {
        let result = hardy(
            &array![60.0, 65.0].into_dyn(),
            &array![0.0, 8.0, 16.0].into_dyn(),
            3,
            Channel::Hall,
        );
        assert!(matches!(
            result,
            Err(ConductanceError::ShapeMismatch(_, _))
        ));
    }

    // ===== Value Tests =====

    #[test]
    fn test_reference_values() {
        // (mlat, mlt, kp) -> (hall, pedersen), evaluated independently
        // from the coefficient tables
        let cases = [
            (70.0, 12.0, 3, 8.012966, 5.295511),
            (65.0, 22.0, 5, 9.285398, 4.238631),
            (68.0, 2.0, 0, 7.113024, 4.871140),
            (62.0, 6.0, 6, 22.012070, 15.500426),
        ];
        for (mlat, mlt, kp, hall, pedersen) in cases {
            let got = eval_hall(mlat, mlt, kp);
            assert!(
                (got - hall).abs() < 1e-4,
                "hall at ({}, {}, kp {}) should be {}, got {}",
                mlat,
                mlt,
                kp,
                hall,
                got
            );
            let got = eval_pedersen(mlat, mlt, kp);
            assert!(
                (got - pedersen).abs() < 1e-4,
                "pedersen at ({}, {}, kp {}) should be {}, got {}",
                mlat,
                mlt,
                kp,
                pedersen,
                got
            );
        }
    }

    #[test]
    fn test_conductance_peaks_at_oval_center() {
        // At Kp 3, MLT 22 the Hall oval peaks at mlat 62.842 with 11.796 mho
        let peak = eval_hall(62.842, 22.0, 3);
        assert!((peak - 11.796).abs() < 1e-3, "got {}", peak);
        assert!(eval_hall(60.0, 22.0, 3) < peak);
        assert!(eval_hall(66.0, 22.0, 3) < peak);
    }

    #[test]
    fn test_southern_hemisphere_mirrors_northern() {
        for (mlat, mlt, kp) in [(65.0, 22.0, 5), (70.0, 12.0, 3), (62.0, 6.0, 6)] {
            assert_eq!(
                eval_hall(-mlat, mlt, kp),
                eval_hall(mlat, mlt, kp),
                "oval should be hemisphere-symmetric at ({}, {}, kp {})",
                mlat,
                mlt,
                kp
            );
        }
    }

    #[test]
    fn test_peak_conductance_grows_with_kp() {
        // The oval both intensifies and moves equatorward with activity, so
        // compare the maximum over a latitude scan rather than a fixed site
        let mlat = Array1::from_iter((0..=100).map(|i| 55.0 + 0.25 * f64::from(i))).into_dyn();
        let mlt = arr0(22.0).into_dyn();

        let mut previous = 0.0;
        for kp in 0..=6 {
            let field = hardy(&mlat, &mlt, kp, Channel::Hall).unwrap();
            let peak = field
                .hall()
                .unwrap()
                .iter()
                .copied()
                .fold(f64::NEG_INFINITY, f64::max);
            assert!(
                peak > previous,
                "peak Hall conductance should grow from Kp {} ({}) to Kp {} ({})",
                kp - 1,
                previous,
                kp,
                peak
            );
            previous = peak;
        }
    }

    #[test]
    fn test_reconstructed_slopes_keep_expected_signs() {
        // The transition function is only defined while the equatorward
        // slope stays positive and the poleward slope negative
        for kind in [ChannelKind::Hall, ChannelKind::Pedersen] {
            for kp in 0..=6 {
                let terms = tables::hardy_table(kind).terms(kp);
                for step in 0..=480 {
                    let mlt = 0.05 * f64::from(step);
                    let parameters = EpsteinParameters::reconstruct(terms, mlt);
                    assert!(
                        parameters.up_slope > 0.0,
                        "{:?} kp {} mlt {}: up_slope {}",
                        kind,
                        kp,
                        mlt,
                        parameters.up_slope
                    );
                    assert!(
                        parameters.down_slope < 0.0,
                        "{:?} kp {} mlt {}: down_slope {}",
                        kind,
                        kp,
                        mlt,
                        parameters.down_slope
                    );
                }
            }
        }
    }

    // ===== Floor Tests =====

    #[test]
    fn test_equatorward_floor_is_zero() {
        // Far equatorward of the oval the transition function is deeply
        // negative and clamps to zero
        assert_eq!(eval_hall(30.0, 6.0, 0), 0.0);
        assert_eq!(eval_pedersen(20.0, 18.0, 2), 0.0);
    }

    #[test]
    fn test_poleward_floor() {
        assert_eq!(eval_hall(89.0, 6.0, 6), POLEWARD_FLOOR);
        assert_eq!(eval_pedersen(88.0, 11.0, 2), POLEWARD_FLOOR);
    }

    #[test]
    fn test_no_negative_conductance_anywhere() {
        for kp in [0, 3, 6] {
            for mlat_i in 0..=18 {
                for mlt_i in 0..24 {
                    let value = eval_hall(f64::from(mlat_i) * 5.0, f64::from(mlt_i), kp);
                    assert!(
                        value >= 0.0,
                        "negative conductance at mlat {} mlt {} kp {}: {}",
                        mlat_i * 5,
                        mlt_i,
                        kp,
                        value
                    );
                }
            }
        }
    }

    // ===== Shape Tests =====

    #[test]
    fn test_coordinates_broadcast() {
        let mlat = array![[60.0], [65.0], [70.0]].into_dyn();
        let mlt = array![0.0, 6.0, 12.0, 18.0].into_dyn();
        let field = hardy(&mlat, &mlt, 3, Channel::HallAndPedersen).unwrap();

        let hall = field.hall().unwrap();
        assert_eq!(hall.shape(), &[3, 4]);
        // Row 1 repeats mlat 65 across the four local times
        for (j, &mlt_value) in [0.0, 6.0, 12.0, 18.0].iter().enumerate() {
            assert_eq!(hall[[1, j]], eval_hall(65.0, mlt_value, 3));
        }
    }

    #[test]
    fn test_scalar_inputs_give_scalar_output() {
        let field = eval(70.0, 12.0, 3, Channel::Hall);
        let hall = field.hall().unwrap();
        assert_eq!(hall.ndim(), 0);
        assert!((*hall.first().unwrap() - 8.012966).abs() < 1e-4);
    }

    #[test]
    fn test_hall_and_pedersen_matches_individual_channels() {
        let mlat = array![62.0, 66.0, 70.0].into_dyn();
        let mlt = array![4.0, 12.0, 20.0].into_dyn();

        let both = hardy(&mlat, &mlt, 4, Channel::HallAndPedersen).unwrap();
        let hall = hardy(&mlat, &mlt, 4, Channel::Hall).unwrap();
        let pedersen = hardy(&mlat, &mlt, 4, Channel::Pedersen).unwrap();

        assert_eq!(both.hall(), hall.hall());
        assert_eq!(both.pedersen(), pedersen.pedersen());
    }
}
