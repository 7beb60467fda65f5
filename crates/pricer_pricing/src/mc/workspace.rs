//! Simulation buffers owned by one engine.
//!
//! Row-major layout:
//! - `shocks`: n_paths × n_steps (Brownian increments, already scaled by √dt)
//! - `paths`: n_paths × (n_steps + 1) (full-path mode only, initial spot first)
//! - `payoffs`: n_paths

use crate::rng::PricerRng;

/// Pre-allocated buffers reused across pricing calls.
///
/// Shocks are drawn lazily and stay cached until [`PathWorkspace::clear_shocks`];
/// the path matrix survives until the next full-path simulation.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::PathWorkspace;
/// use pricer_pricing::rng::PricerRng;
///
/// let mut workspace = PathWorkspace::new(100, 10);
/// assert!(!workspace.has_shocks());
///
/// workspace.ensure_shocks(&mut PricerRng::from_seed(1), 0.1);
/// assert_eq!(workspace.shocks().len(), 1000);
/// ```
#[derive(Debug, Clone)]
pub struct PathWorkspace {
    shocks: Vec<f64>,
    paths: Vec<f64>,
    payoffs: Vec<f64>,
    n_paths: usize,
    n_steps: usize,
    has_shocks: bool,
    has_paths: bool,
}

impl PathWorkspace {
    /// Creates an empty workspace sized for `n_paths × n_steps`.
    ///
    /// Nothing is allocated until shocks are drawn.
    pub fn new(n_paths: usize, n_steps: usize) -> Self {
        Self {
            shocks: Vec::new(),
            paths: Vec::new(),
            payoffs: Vec::new(),
            n_paths,
            n_steps,
            has_shocks: false,
            has_paths: false,
        }
    }

    /// Draws the shock matrix from `rng` unless it is already cached.
    pub fn ensure_shocks(&mut self, rng: &mut PricerRng, sqrt_dt: f64) {
        if self.has_shocks {
            return;
        }
        self.shocks.resize(self.n_paths * self.n_steps, 0.0);
        rng.fill_normal_scaled(&mut self.shocks, sqrt_dt);
        self.has_shocks = true;
    }

    /// Drops the cached shocks, keeping the allocation.
    #[inline]
    pub fn clear_shocks(&mut self) {
        self.has_shocks = false;
    }

    /// Whether shocks are cached.
    #[inline]
    pub fn has_shocks(&self) -> bool {
        self.has_shocks
    }

    /// Whether a full-path matrix is available.
    #[inline]
    pub fn has_paths(&self) -> bool {
        self.has_paths
    }

    /// Cached shocks (empty when none are drawn).
    #[inline]
    pub fn shocks(&self) -> &[f64] {
        if self.has_shocks {
            &self.shocks
        } else {
            &[]
        }
    }

    /// Full-path matrix (empty until a full-path simulation ran).
    #[inline]
    pub fn paths(&self) -> &[f64] {
        if self.has_paths {
            &self.paths
        } else {
            &[]
        }
    }

    /// Shocks (read) and path matrix (write) together, sized for this workspace.
    pub(crate) fn paths_mut_and_shocks(&mut self) -> (&mut [f64], &[f64]) {
        self.paths.resize(self.n_paths * (self.n_steps + 1), 0.0);
        self.has_paths = true;
        (&mut self.paths, &self.shocks)
    }

    /// Payoff buffer sized to `n_paths`.
    pub(crate) fn payoffs_mut(&mut self) -> &mut [f64] {
        self.payoffs.resize(self.n_paths, 0.0);
        &mut self.payoffs
    }

    /// Payoff buffer.
    #[inline]
    pub fn payoffs(&self) -> &[f64] {
        &self.payoffs
    }

    /// Number of paths.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Number of steps per path.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_lazy() {
        let workspace = PathWorkspace::new(1000, 100);
        assert!(workspace.shocks().is_empty());
        assert!(workspace.paths().is_empty());
    }

    #[test]
    fn test_shocks_cached_until_cleared() {
        let mut workspace = PathWorkspace::new(4, 3);
        workspace.ensure_shocks(&mut PricerRng::from_seed(1), 1.0);
        let first = workspace.shocks().to_vec();

        // cached: a different generator is ignored
        workspace.ensure_shocks(&mut PricerRng::from_seed(2), 1.0);
        assert_eq!(workspace.shocks(), first.as_slice());

        workspace.clear_shocks();
        assert!(!workspace.has_shocks());
        workspace.ensure_shocks(&mut PricerRng::from_seed(2), 1.0);
        assert_ne!(workspace.shocks(), first.as_slice());
    }

    #[test]
    fn test_path_buffer_dimensions() {
        let mut workspace = PathWorkspace::new(2, 3);
        workspace.ensure_shocks(&mut PricerRng::from_seed(5), 1.0);
        let (paths, shocks) = workspace.paths_mut_and_shocks();
        assert_eq!(paths.len(), 8);
        assert_eq!(shocks.len(), 6);
        assert!(workspace.has_paths());
        assert_eq!(workspace.payoffs_mut().len(), 2);
    }
}
