//! Embedded coefficient tables.
//!
//! The three data assets live under `data/` and are compiled into the
//! library with `include_str!`. They are parsed once, on first use, into
//! process-wide read-only singletons; nothing ever mutates them afterwards,
//! so sharing across threads is safe.

use std::sync::OnceLock;

use crate::channel::ChannelKind;
use crate::errors::{ConductanceError, ConductanceResult};

const CHAPMAN_PRODUCTION: &str = include_str!("../data/chapman_euv_production.txt");
const HARDY_HALL: &str = include_str!("../data/hardy_hall_coefficients.txt");
const HARDY_PEDERSEN: &str = include_str!("../data/hardy_pedersen_coefficients.txt");

/// Solar-zenith-angle grid of the production table: 0 to 120 degrees in 0.1
/// degree steps. The stored samples are defined on exactly this grid; it
/// must never change independently of the data file.
pub(crate) const SZA_GRID_START: f64 = 0.0;
pub(crate) const SZA_GRID_STEP: f64 = 0.1;
pub(crate) const SZA_GRID_SAMPLES: usize = 1201;

/// Relative EUV ionization production vs solar zenith angle on the fixed
/// grid, normalized to 1 at zenith.
#[derive(Debug, Clone)]
pub(crate) struct ProductionTable {
    values: Vec<f64>,
}

impl ProductionTable {
    /// Parse the plain-text column format.
    ///
    /// `#` comment lines and blank lines are ignored; every other line is
    /// one sample. Exactly [`SZA_GRID_SAMPLES`] samples are required.
    pub(crate) fn parse(text: &str) -> ConductanceResult<Self> {
        let mut values = Vec::with_capacity(SZA_GRID_SAMPLES);
        for (lineno, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let value: f64 = line.parse().map_err(|_| {
                ConductanceError::TableParse(format!(
                    "production table line {}: {:?} is not a number",
                    lineno + 1,
                    line
                ))
            })?;
            values.push(value);
        }
        if values.len() != SZA_GRID_SAMPLES {
            return Err(ConductanceError::TableParse(format!(
                "production table has {} samples, expected {}",
                values.len(),
                SZA_GRID_SAMPLES
            )));
        }
        Ok(Self { values })
    }

    /// Sample values, index i corresponding to sza = 0.1 * i degrees.
    pub(crate) fn values(&self) -> &[f64] {
        &self.values
    }

    /// The solar-zenith-angle axis (degrees).
    pub(crate) fn grid(&self) -> Vec<f64> {
        (0..SZA_GRID_SAMPLES)
            .map(|i| SZA_GRID_START + SZA_GRID_STEP * i as f64)
            .collect()
    }
}

/// Sine/cosine tag of a Fourier coefficient row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TrigKind {
    Sine,
    Cosine,
}

/// One Fourier term of the Hardy expansion: the four coefficient columns of
/// a table row, with the term label already resolved to (trig, order).
#[derive(Debug, Clone, Copy)]
pub(crate) struct HardyTerm {
    pub kind: TrigKind,
    /// Harmonic order n; the Fourier argument is `n * mlt / 12 * pi`.
    /// The constant term is a cosine of order 0.
    pub order: u8,
    /// Contribution to the Epstein peak conductance `r` (mho).
    pub max_value: f64,
    /// Contribution to the peak latitude `h0` (degrees).
    pub max_latitude: f64,
    /// Contribution to the equatorward slope `S1` (mho/degree).
    pub up_slope: f64,
    /// Contribution to the poleward slope `S2` (mho/degree).
    pub down_slope: f64,
}

/// Hardy coefficient rows for one channel, grouped by Kp level at parse
/// time so evaluation never touches label strings.
#[derive(Debug, Clone)]
pub(crate) struct HardyTable {
    terms: [Vec<HardyTerm>; 7],
}

impl HardyTable {
    /// Parse the delimited table format: a free-text title line, a header
    /// line naming the six columns, then one row per (Kp, term).
    pub(crate) fn parse(text: &str) -> ConductanceResult<Self> {
        const HEADER: [&str; 6] = [
            "Kp",
            "term",
            "maxvalue",
            "maxlatitude",
            "up-slope",
            "down-slope",
        ];

        let mut lines = text.lines().enumerate();
        lines
            .next()
            .ok_or_else(|| ConductanceError::TableParse("coefficient table is empty".into()))?;
        let (_, header) = lines.next().ok_or_else(|| {
            ConductanceError::TableParse("coefficient table has no header line".into())
        })?;
        let columns: Vec<&str> = header.split(',').map(str::trim).collect();
        if columns != HEADER {
            return Err(ConductanceError::TableParse(format!(
                "unexpected coefficient table header {:?}",
                header
            )));
        }

        let mut terms: [Vec<HardyTerm>; 7] = std::array::from_fn(|_| Vec::new());
        for (lineno, line) in lines {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            if fields.len() != HEADER.len() {
                return Err(ConductanceError::TableParse(format!(
                    "line {}: expected {} fields, got {}",
                    lineno + 1,
                    HEADER.len(),
                    fields.len()
                )));
            }
            let kp = parse_kp_label(fields[0], lineno)?;
            let (kind, order) = parse_term_label(fields[1], lineno)?;
            let mut row = [0.0; 4];
            for (slot, field) in row.iter_mut().zip(&fields[2..]) {
                *slot = field.parse().map_err(|_| {
                    ConductanceError::TableParse(format!(
                        "line {}: {:?} is not a number",
                        lineno + 1,
                        field
                    ))
                })?;
            }
            terms[kp].push(HardyTerm {
                kind,
                order,
                max_value: row[0],
                max_latitude: row[1],
                up_slope: row[2],
                down_slope: row[3],
            });
        }

        for (kp, rows) in terms.iter().enumerate() {
            if rows.is_empty() {
                return Err(ConductanceError::TableParse(format!(
                    "coefficient table has no rows for Kp = {}",
                    kp
                )));
            }
        }
        Ok(Self { terms })
    }

    /// Coefficient rows for one Kp level. `kp` must already be validated to
    /// lie in 0..=6.
    pub(crate) fn terms(&self, kp: usize) -> &[HardyTerm] {
        &self.terms[kp]
    }
}

fn parse_kp_label(label: &str, lineno: usize) -> ConductanceResult<usize> {
    let err = || {
        ConductanceError::TableParse(format!(
            "line {}: {:?} is not a Kp label (K0..K6)",
            lineno + 1,
            label
        ))
    };
    let kp: usize = label.strip_prefix('K').ok_or_else(err)?.parse().map_err(|_| err())?;
    if kp > 6 {
        return Err(err());
    }
    Ok(kp)
}

fn parse_term_label(label: &str, lineno: usize) -> ConductanceResult<(TrigKind, u8)> {
    if label == "Const" {
        return Ok((TrigKind::Cosine, 0));
    }
    let err = || {
        ConductanceError::TableParse(format!(
            "line {}: {:?} is not a term label (Const, Cos n or Sin n)",
            lineno + 1,
            label
        ))
    };
    let (kind, rest) = if let Some(rest) = label.strip_prefix("Cos") {
        (TrigKind::Cosine, rest)
    } else if let Some(rest) = label.strip_prefix("Sin") {
        (TrigKind::Sine, rest)
    } else {
        return Err(err());
    };
    let order: u8 = rest.trim().parse().map_err(|_| err())?;
    if order == 0 {
        return Err(err());
    }
    Ok((kind, order))
}

/// Process-wide production table, parsed from the embedded asset on first
/// use. A parse failure here is a defect in the shipped data file.
pub(crate) fn production_table() -> &'static ProductionTable {
    static TABLE: OnceLock<ProductionTable> = OnceLock::new();
    TABLE.get_or_init(|| {
        ProductionTable::parse(CHAPMAN_PRODUCTION)
            .expect("embedded Chapman production table is malformed")
    })
}

/// Process-wide Hardy coefficient table for one channel.
pub(crate) fn hardy_table(channel: ChannelKind) -> &'static HardyTable {
    static HALL: OnceLock<HardyTable> = OnceLock::new();
    static PEDERSEN: OnceLock<HardyTable> = OnceLock::new();
    match channel {
        ChannelKind::Hall => HALL.get_or_init(|| {
            HardyTable::parse(HARDY_HALL).expect("embedded Hardy Hall table is malformed")
        }),
        ChannelKind::Pedersen => PEDERSEN.get_or_init(|| {
            HardyTable::parse(HARDY_PEDERSEN).expect("embedded Hardy Pedersen table is malformed")
        }),
    }
}
