//! Criterion benchmarks for pricer_risk.
//!
//! Benchmarks cover:
//! - Closed-form vanilla Greeks
//! - Composite product Greeks (butterfly)
//! - Bond duration and convexity, including the yield solve

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_core::market_data::Rate;
use pricer_core::types::Maturity;
use pricer_models::instruments::bonds::FixedRateBond;
use pricer_models::instruments::{
    ButterflySpread, OptionType, Priced, Spread, SpreadKind, UnderlyingClass, VanillaOption,
};
use pricer_pricing::context::MarketContext;
use pricer_risk::{BondRisk, ButterflySpreadRisk, OptionRisk};

fn market() -> MarketContext {
    MarketContext::new(100.0, Rate::flat(0.03), 0.2, Maturity::from_years(1.0).unwrap())
}

fn leg(option_type: OptionType, strike: f64) -> Priced<VanillaOption> {
    Priced::new(
        VanillaOption::new(option_type, UnderlyingClass::NoDividendShare, strike).unwrap(),
        0.0,
    )
}

/// Benchmark vanilla Greeks across moneyness.
fn bench_vanilla_greeks(c: &mut Criterion) {
    let mut group = c.benchmark_group("vanilla_greeks");
    let m = market();

    for strike in [80.0, 100.0, 120.0] {
        let call = VanillaOption::new(OptionType::Call, UnderlyingClass::NoDividendShare, strike).unwrap();
        group.bench_with_input(BenchmarkId::new("call", strike as u32), &call, |b, call| {
            b.iter(|| OptionRisk::new(black_box(call), &m).greeks());
        });
    }

    group.finish();
}

/// Benchmark butterfly Greeks (four vanilla legs).
fn bench_butterfly_greeks(c: &mut Criterion) {
    let m = market();
    let puts = Spread::new(SpreadKind::PutSpread, leg(OptionType::Put, 110.0), leg(OptionType::Put, 100.0)).unwrap();
    let calls = Spread::new(SpreadKind::CallSpread, leg(OptionType::Call, 90.0), leg(OptionType::Call, 100.0)).unwrap();
    let fly = ButterflySpread::new(puts, calls).unwrap();

    c.bench_function("butterfly_greeks", |b| {
        b.iter(|| ButterflySpreadRisk::new(black_box(&fly), &m).greeks());
    });
}

/// Benchmark duration and convexity; the yield is solved on every fresh bond.
fn bench_bond_risk(c: &mut Criterion) {
    let mut group = c.benchmark_group("bond_risk");

    for nb_coupon in [2usize, 10, 40] {
        group.bench_with_input(BenchmarkId::new("duration_convexity", nb_coupon), &nb_coupon, |b, &n| {
            b.iter(|| {
                let bond = FixedRateBond::new(0.05, Maturity::from_years(10.0).unwrap(), 100.0, n, Rate::flat(0.03)).unwrap();
                let risk = BondRisk::new(&bond);
                (risk.duration(), risk.convexity())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_vanilla_greeks, bench_butterfly_greeks, bench_bond_risk);
criterion_main!(benches);
