//! Geometric Brownian motion path generation.
//!
//! Both schemes consume shocks already scaled by `√dt`:
//! ```text
//! ln S(t+dt) = ln S(t) + (r − σ²/2)dt + σ·ΔW
//! ```
//! The terminal scheme accumulates the log increments per path and keeps only
//! `S_T`; the full-path scheme steps multiplicatively and stores every node.
//!
//! Paths are stored row-major: `paths[path * (n_steps + 1) + step]`, with
//! `step = 0` holding the initial spot.

/// Risk-neutral GBM inputs after the underlying adjustment.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::GbmParams;
///
/// let params = GbmParams::new(100.0, 0.03, 0.2, 0.5);
/// assert!(params.is_valid());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GbmParams {
    /// Initial spot price (S₀).
    pub spot: f64,
    /// Drift rate (r), annualised.
    pub rate: f64,
    /// Volatility (σ), annualised.
    pub volatility: f64,
    /// Time to maturity (T), in years.
    pub maturity: f64,
}

impl GbmParams {
    /// Creates new GBM parameters.
    #[inline]
    pub fn new(spot: f64, rate: f64, volatility: f64, maturity: f64) -> Self {
        Self {
            spot,
            rate,
            volatility,
            maturity,
        }
    }

    /// True when all parameters are finite, spot and maturity positive, volatility non-negative.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.spot > 0.0
            && self.spot.is_finite()
            && self.rate.is_finite()
            && self.volatility >= 0.0
            && self.volatility.is_finite()
            && self.maturity > 0.0
            && self.maturity.is_finite()
    }

    #[inline]
    fn drift_dt(&self, dt: f64) -> f64 {
        (self.rate - 0.5 * self.volatility * self.volatility) * dt
    }
}

/// Terminal spot of every path, written into `terminals`.
///
/// `shocks` holds `terminals.len() × n_steps` increments.
pub fn generate_terminal_values(
    terminals: &mut [f64],
    shocks: &[f64],
    params: GbmParams,
    n_steps: usize,
) {
    debug_assert_eq!(shocks.len(), terminals.len() * n_steps);

    let dt = params.maturity / n_steps as f64;
    let drift_dt = params.drift_dt(dt);
    let log_spot = params.spot.ln();

    for (terminal, row) in terminals.iter_mut().zip(shocks.chunks_exact(n_steps)) {
        let log_st = row
            .iter()
            .fold(log_spot, |acc, &dw| acc + drift_dt + params.volatility * dw);
        *terminal = log_st.exp();
    }
}

/// Full paths by exponential-Euler stepping, written into `paths`.
///
/// `paths` holds `n_paths × (n_steps + 1)` nodes, `shocks` `n_paths × n_steps`.
pub fn generate_gbm_paths(paths: &mut [f64], shocks: &[f64], params: GbmParams, n_steps: usize) {
    let row_len = n_steps + 1;
    debug_assert_eq!(paths.len() / row_len * n_steps, shocks.len());

    let dt = params.maturity / n_steps as f64;
    let drift_dt = params.drift_dt(dt);

    for (path, row) in paths.chunks_exact_mut(row_len).zip(shocks.chunks_exact(n_steps)) {
        path[0] = params.spot;
        for (step, &dw) in row.iter().enumerate() {
            path[step + 1] = path[step] * (drift_dt + params.volatility * dw).exp();
        }
    }
}

/// Read-only view of a simulated path matrix.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::PathMatrix;
///
/// let data = [100.0, 101.0, 102.0, 100.0, 99.0, 98.0];
/// let matrix = PathMatrix::new(&data, 2);
/// assert_eq!(matrix.n_paths(), 2);
/// assert_eq!(matrix.path(1), &[100.0, 99.0, 98.0]);
/// assert_eq!(matrix.terminal(0), 102.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathMatrix<'a> {
    data: &'a [f64],
    n_steps: usize,
}

impl<'a> PathMatrix<'a> {
    /// Wraps row-major data with `n_steps + 1` nodes per path.
    #[inline]
    pub fn new(data: &'a [f64], n_steps: usize) -> Self {
        Self { data, n_steps }
    }

    /// Number of paths.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.data.len() / (self.n_steps + 1)
    }

    /// Number of steps per path.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Nodes of one path, initial spot first.
    #[inline]
    pub fn path(&self, index: usize) -> &'a [f64] {
        let row_len = self.n_steps + 1;
        &self.data[index * row_len..(index + 1) * row_len]
    }

    /// Final node of one path.
    #[inline]
    pub fn terminal(&self, index: usize) -> f64 {
        self.data[(index + 1) * (self.n_steps + 1) - 1]
    }

    /// Iterates over paths.
    pub fn iter(&self) -> impl Iterator<Item = &'a [f64]> {
        self.data.chunks_exact(self.n_steps + 1)
    }

    /// Raw row-major data.
    #[inline]
    pub fn as_slice(&self) -> &'a [f64] {
        self.data
    }
}
