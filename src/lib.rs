//! Ionospheric conductance models.
//!
//! Height-integrated Hall and Pedersen conductance of the high-latitude
//! ionosphere, combining the Hardy et al. (1987) statistical auroral
//! precipitation model with solar EUV ionization and a uniform starlight
//! background.
//!
//! # Module Organisation
//!
//! - `hardy`: auroral conductance from the Kp-binned Hardy oval
//! - `euv`: solar EUV conductance under the published calibrations
//! - `conductance`: the combined model on geographic or magnetic grids
//! - `dipole`: centered-dipole coordinate transforms
//! - `sunlight`: subsolar point and solar zenith angle
//! - `channel`: channel selection and the evaluated conductance container
//! - `interpolate`: piecewise-linear interpolation with end extrapolation
//!
//! # Quick Start
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use ionocond::{hardy_euv, Channel, HardyEuvParameters};
//! use ndarray::array;
//!
//! let time = Utc.with_ymd_and_hms(2015, 3, 17, 12, 0, 0).unwrap();
//! let lon = array![0.0, 90.0, 180.0, 270.0].into_dyn();
//! let lat = array![[60.0], [70.0], [80.0]].into_dyn();
//!
//! let field = hardy_euv(
//!     &lon,
//!     &lat,
//!     3,
//!     time,
//!     Channel::HallAndPedersen,
//!     &HardyEuvParameters::default(),
//! )
//! .unwrap();
//! assert_eq!(field.hall().unwrap().shape(), &[3, 4]);
//! ```

pub mod channel;
pub mod conductance;
pub mod dipole;
pub mod errors;
pub mod euv;
pub mod hardy;
pub mod interpolate;
pub mod sunlight;

mod tables;
mod utils;

pub use channel::{Channel, ConductanceField};
pub use conductance::{hardy_euv, CoordinateFrame, HardyEuvParameters};
pub use errors::{ConductanceError, ConductanceResult};
pub use euv::{euv_conductance, Calibration};
pub use hardy::hardy;
