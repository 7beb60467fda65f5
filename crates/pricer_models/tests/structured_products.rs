//! End-to-end checks for bonds and structured products priced off
//! Black-Scholes leg prices.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use pricer_core::market_data::{InterpolationMethod, Rate};
use pricer_core::types::Maturity;
use pricer_models::analytical::BlackScholes;
use pricer_models::instruments::bonds::{FixedRateBond, InterestRateSwap};
use pricer_models::instruments::{
    CertificatOutperformance, OptionType, Priced, Product, ReverseConvertible, UnderlyingClass,
    VanillaOption,
};

const U: UnderlyingClass = UnderlyingClass::NoDividendShare;

fn priced(bs: &BlackScholes<f64>, option_type: OptionType, strike: f64, t: f64) -> Priced<VanillaOption> {
    let option = VanillaOption::new(option_type, U, strike).unwrap();
    Priced::new(option, bs.price(option_type, strike, t))
}

#[test]
fn test_reverse_convertible_on_curve() {
    let rate = Rate::from_curve(
        &[0.25, 0.5, 1.0, 2.0],
        &[0.030, 0.032, 0.035, 0.037],
        InterpolationMethod::CubicSpline,
    )
    .unwrap();
    let t = Maturity::from_years(1.0).unwrap();
    let bs = BlackScholes::new(100.0, rate.rate(&t), 0.25).unwrap();

    let bond = FixedRateBond::new(0.09, t, 100.0, 4, rate).unwrap();
    let bond_price = bond.price();
    let put = priced(&bs, OptionType::Put, 100.0, 1.0);
    let put_price = put.price;

    let product = Product::from(ReverseConvertible::new(put, bond).unwrap());
    assert_relative_eq!(product.leg_price().unwrap(), put_price - bond_price, epsilon = 1e-12);
    assert_eq!(product.payoff_terminal(120.0).unwrap(), 100.0);
    assert_eq!(product.payoff_terminal(70.0).unwrap(), 70.0);
}

#[test]
fn test_certificate_participation_above_one() {
    let bs = BlackScholes::new(100.0, 0.03, 0.2).unwrap();
    let zs = priced(&bs, OptionType::Call, 0.0, 1.0);
    let atm = priced(&bs, OptionType::Call, 100.0, 1.0);

    // zero-strike call is worth the spot
    assert_relative_eq!(zs.price, 100.0, epsilon = 1e-12);

    let cert = CertificatOutperformance::new(zs, atm).unwrap();
    assert!(cert.participation() > 1.0);
    assert_relative_eq!(
        cert.price(),
        zs.price + (cert.participation() - 1.0) * atm.price,
        epsilon = 1e-12
    );
}

#[test]
fn test_bond_yield_round_trip_on_curve() {
    let rate = Rate::from_curve(
        &[1.0, 2.0, 5.0, 10.0],
        &[0.02, 0.025, 0.03, 0.035],
        InterpolationMethod::Linear,
    )
    .unwrap();
    let bond = FixedRateBond::new(0.045, Maturity::from_years(10.0).unwrap(), 1000.0, 10, rate).unwrap();
    let ytm = bond.ytm().unwrap();
    assert!(ytm > 0.02 && ytm < 0.04);
    assert_abs_diff_eq!(bond.price_at(Some(ytm)), bond.price(), epsilon = 1e-3);
}

#[test]
fn test_par_swap_is_worthless() {
    let t = Maturity::from_years(3.0).unwrap();
    let swap = InterestRateSwap::new(0.02, 0.02, t, 100.0, 6, Rate::flat(0.03), false).unwrap();
    assert_abs_diff_eq!(swap.price(), 0.0, epsilon = 1e-12);
}
