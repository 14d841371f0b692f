//! One-dimensional linear interpolation.

/// Piecewise-linear interpolant over a strictly increasing sample axis.
///
/// Inside the sampled range, values are interpolated linearly between the
/// bracketing samples. Outside the range, the first or last segment is
/// extended linearly, so the interpolant is defined and continuous on the
/// whole real line (the same convention as scipy's `interp1d` with
/// `fill_value="extrapolate"`).
///
/// # Example
/// ```
/// use ionocond::interpolate::Interp1d;
///
/// let f = Interp1d::new(vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 4.0]);
/// assert!((f.eval(0.5) - 0.5).abs() < 1e-12);
/// assert!((f.eval(1.5) - 2.5).abs() < 1e-12);
/// // Beyond the axis the last segment (slope 3) continues
/// assert!((f.eval(3.0) - 7.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct Interp1d {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl Interp1d {
    /// Construct an interpolant from samples `(x[i], y[i])`.
    ///
    /// # Panics
    /// Panics if the lengths differ, fewer than two samples are given, or
    /// `x` is not strictly increasing.
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Self {
        assert_eq!(x.len(), y.len(), "x and y must have the same length");
        assert!(x.len() >= 2, "need at least two samples");
        assert!(
            x.windows(2).all(|w| w[0] < w[1]),
            "sample axis must be strictly increasing"
        );
        Self { x, y }
    }

    /// Value of the interpolant at `x`, extrapolating beyond the axis.
    pub fn eval(&self, x: f64) -> f64 {
        let n = self.x.len();
        // Index of the segment [x[i], x[i+1]] to evaluate on. Queries left
        // of the axis use the first segment, right of it the last.
        let i = match self.x.partition_point(|&v| v < x) {
            0 => 0,
            k if k >= n => n - 2,
            k => k - 1,
        };
        let (x0, x1) = (self.x[i], self.x[i + 1]);
        let (y0, y1) = (self.y[i], self.y[i + 1]);
        y0 + (y1 - y0) * (x - x0) / (x1 - x0)
    }

    /// The sample axis.
    pub fn x(&self) -> &[f64] {
        &self.x
    }
}
