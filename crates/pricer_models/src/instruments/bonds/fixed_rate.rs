//! Fixed-rate coupon bond.

use std::sync::OnceLock;

use pricer_core::market_data::Rate;
use pricer_core::math::solvers::TargetSolver;
use pricer_core::types::{ConfigurationError, DomainError, Maturity, PricingError, SolverError};
use tracing::debug;

use super::zero_coupon::ZeroCouponBond;

/// One leg of the coupon schedule.
#[derive(Debug, Clone)]
pub struct BondCashflow {
    offset: f64,
    amount: f64,
    zc: ZeroCouponBond,
}

impl BondCashflow {
    /// Time from today to payment, in years.
    #[inline]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Amount paid at `offset`.
    #[inline]
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Zero-coupon bond discounting this leg.
    #[inline]
    pub fn zero_coupon(&self) -> &ZeroCouponBond {
        &self.zc
    }
}

/// Bond paying `coupon_rate / N × nominal` on N dates and the nominal at maturity.
///
/// The market price is computed at construction; [`FixedRateBond::price_at`]
/// reprices under a flat override rate without touching it.
///
/// # Examples
/// ```
/// use pricer_core::market_data::Rate;
/// use pricer_core::types::Maturity;
/// use pricer_models::instruments::bonds::FixedRateBond;
///
/// let bond = FixedRateBond::new(
///     0.05,
///     Maturity::from_years(2.0).unwrap(),
///     100.0,
///     2,
///     Rate::flat(0.03),
/// )
/// .unwrap();
///
/// let ytm = bond.ytm().unwrap();
/// assert!((bond.price_at(Some(ytm)) - bond.price()).abs() < 1e-3);
/// ```
#[derive(Debug, Clone)]
pub struct FixedRateBond {
    coupon_rate: f64,
    maturity: Maturity,
    nominal: f64,
    nb_coupon: usize,
    rate: Rate,
    cashflows: Vec<BondCashflow>,
    price: f64,
    ytm: OnceLock<f64>,
}

impl FixedRateBond {
    /// Builds the coupon schedule and prices it.
    ///
    /// # Errors
    /// - `DomainError::NonPositiveMaturity` if `maturity.years() <= 0`
    /// - `ConfigurationError::InvalidParameter` if `nb_coupon == 0`
    pub fn new(
        coupon_rate: f64,
        maturity: Maturity,
        nominal: f64,
        nb_coupon: usize,
        rate: Rate,
    ) -> Result<Self, PricingError> {
        if !maturity.is_positive() {
            return Err(DomainError::NonPositiveMaturity {
                years: maturity.years(),
            }
            .into());
        }
        if nb_coupon == 0 {
            return Err(ConfigurationError::InvalidParameter {
                name: "nb_coupon",
                value: "0".to_string(),
            }
            .into());
        }

        let cashflows = schedule(coupon_rate, &maturity, nominal, nb_coupon, &rate)?;
        let price = cashflows.iter().map(|cf| cf.zc.price(None)).sum();

        Ok(Self {
            coupon_rate,
            maturity,
            nominal,
            nb_coupon,
            rate,
            cashflows,
            price,
            ytm: OnceLock::new(),
        })
    }

    /// Market price: sum of the leg prices on the curve.
    #[inline]
    pub fn price(&self) -> f64 {
        self.price
    }

    /// Sum of the leg prices, every leg discounted at `force_rate` when given.
    pub fn price_at(&self, force_rate: Option<f64>) -> f64 {
        self.cashflows.iter().map(|cf| cf.zc.price(force_rate)).sum()
    }

    /// Flat rate at which [`FixedRateBond::price_at`] matches the market price.
    ///
    /// Solved once and memoised.
    ///
    /// # Errors
    /// `SolverError::NotConverged` ("YTM not found") when no rate matches
    /// within the solver tolerance.
    pub fn ytm(&self) -> Result<f64, SolverError> {
        if let Some(&ytm) = self.ytm.get() {
            return Ok(ytm);
        }
        let ytm = TargetSolver::for_quantity("YTM").solve(self.price, |r| self.price_at(Some(r)))?;
        debug!(ytm, price = self.price, "bond yield solved");
        Ok(*self.ytm.get_or_init(|| ytm))
    }

    /// Coupon period `T / N`, in years.
    #[inline]
    pub fn period(&self) -> f64 {
        self.maturity.years() / self.nb_coupon as f64
    }

    /// Schedule legs in ascending offset order, ending with the zero-amount today leg.
    #[inline]
    pub fn cashflows(&self) -> &[BondCashflow] {
        &self.cashflows
    }

    /// Returns the coupon rate.
    #[inline]
    pub fn coupon_rate(&self) -> f64 {
        self.coupon_rate
    }

    /// Returns the maturity.
    #[inline]
    pub fn maturity(&self) -> &Maturity {
        &self.maturity
    }

    /// Returns the nominal.
    #[inline]
    pub fn nominal(&self) -> f64 {
        self.nominal
    }

    /// Returns the number of coupons.
    #[inline]
    pub fn nb_coupon(&self) -> usize {
        self.nb_coupon
    }

    /// Returns the discounting rate.
    #[inline]
    pub fn rate(&self) -> &Rate {
        &self.rate
    }
}

fn schedule(
    coupon_rate: f64,
    maturity: &Maturity,
    nominal: f64,
    nb_coupon: usize,
    rate: &Rate,
) -> Result<Vec<BondCashflow>, ConfigurationError> {
    let t = maturity.years();
    let step = t / nb_coupon as f64;
    let coupon = coupon_rate / nb_coupon as f64 * nominal;

    let mut offsets: Vec<f64> = (0..nb_coupon).map(|i| (t - i as f64 * step).abs()).collect();
    offsets.sort_by(|a, b| a.total_cmp(b));

    let last = offsets.len() - 1;
    let mut legs = Vec::with_capacity(nb_coupon + 1);
    for (i, &offset) in offsets.iter().enumerate() {
        let amount = if i == last { coupon + nominal } else { coupon };
        legs.push(leg(offset, amount, maturity, rate)?);
    }
    // today
    legs.push(leg(0.0, 0.0, maturity, rate)?);
    Ok(legs)
}

fn leg(
    offset: f64,
    amount: f64,
    maturity: &Maturity,
    rate: &Rate,
) -> Result<BondCashflow, ConfigurationError> {
    let leg_maturity = Maturity::with_convention(offset, maturity.convention())?;
    Ok(BondCashflow {
        offset,
        amount,
        zc: ZeroCouponBond::new(rate.clone(), leg_maturity, amount),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use pricer_core::market_data::InterpolationMethod;

    fn bond(coupon_rate: f64, years: f64, nb_coupon: usize, rate: Rate) -> FixedRateBond {
        FixedRateBond::new(
            coupon_rate,
            Maturity::from_years(years).unwrap(),
            100.0,
            nb_coupon,
            rate,
        )
        .unwrap()
    }

    // ========================================
    // Schedule Tests
    // ========================================

    #[test]
    fn test_schedule_offsets_and_amounts() {
        let b = bond(0.04, 2.0, 4, Rate::flat(0.03));
        let offsets: Vec<f64> = b.cashflows().iter().map(|cf| cf.offset()).collect();
        let amounts: Vec<f64> = b.cashflows().iter().map(|cf| cf.amount()).collect();
        assert_eq!(offsets, vec![0.5, 1.0, 1.5, 2.0, 0.0]);
        assert_eq!(amounts, vec![1.0, 1.0, 1.0, 101.0, 0.0]);
        assert_relative_eq!(b.period(), 0.5);
    }

    #[test]
    fn test_single_coupon() {
        let b = bond(0.05, 1.0, 1, Rate::flat(0.0));
        assert_eq!(b.cashflows().len(), 2);
        assert_relative_eq!(b.price(), 105.0, epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_construction() {
        let zero = FixedRateBond::new(0.05, Maturity::from_years(0.0).unwrap(), 100.0, 2, Rate::flat(0.03));
        assert!(matches!(zero, Err(PricingError::Domain(_))));

        let no_coupon = FixedRateBond::new(0.05, Maturity::from_years(1.0).unwrap(), 100.0, 0, Rate::flat(0.03));
        assert!(matches!(no_coupon, Err(PricingError::Configuration(_))));
    }

    // ========================================
    // Pricing Tests
    // ========================================

    #[test]
    fn test_price_is_sum_of_legs() {
        let rate = Rate::from_curve(&[0.5, 1.0, 2.0], &[0.02, 0.025, 0.03], InterpolationMethod::Linear).unwrap();
        let b = bond(0.05, 2.0, 2, rate);
        let sum: f64 = b.cashflows().iter().map(|cf| cf.zero_coupon().price(None)).sum();
        assert_relative_eq!(b.price(), sum, epsilon = 1e-12);
    }

    #[test]
    fn test_flat_rate_closed_form() {
        let b = bond(0.06, 3.0, 3, Rate::flat(0.04));
        let expected = 6.0 * (-0.04f64).exp() + 6.0 * (-0.08f64).exp() + 106.0 * (-0.12f64).exp();
        assert_relative_eq!(b.price(), expected, epsilon = 1e-10);
    }

    #[test]
    fn test_price_at_does_not_alter_market_price() {
        let b = bond(0.05, 2.0, 2, Rate::flat(0.03));
        let before = b.price();
        let repriced = b.price_at(Some(0.10));
        assert!(repriced < before);
        assert_eq!(b.price(), before);
        assert_relative_eq!(b.price_at(None), before, epsilon = 1e-12);
    }

    // ========================================
    // Yield Tests
    // ========================================

    #[test]
    fn test_ytm_reprices_bond() {
        let rate = Rate::from_curve(&[1.0, 3.0, 5.0], &[0.02, 0.03, 0.035], InterpolationMethod::Linear).unwrap();
        let b = bond(0.04, 5.0, 5, rate);
        let ytm = b.ytm().unwrap();
        assert_abs_diff_eq!(b.price_at(Some(ytm)), b.price(), epsilon = 1e-3);
    }

    #[test]
    fn test_ytm_of_flat_curve_is_the_flat_rate() {
        let b = bond(0.05, 2.0, 2, Rate::flat(0.03));
        assert_abs_diff_eq!(b.ytm().unwrap(), 0.03, epsilon = 1e-4);
    }

    #[test]
    fn test_ytm_is_memoised() {
        let b = bond(0.05, 2.0, 2, Rate::flat(0.03));
        let first = b.ytm().unwrap();
        assert_eq!(b.ytm().unwrap(), first);
    }
}
