use assert_approx_eq::assert_approx_eq;

use pricing::analytic::{BlackScholesMerton, FairValue, OptionPrice};
use pricing::common::{OptionContract, OptionStyle, OptionType};
use pricing::simulation::{MonteCarloSimulation, RunState, SimulationConfig, SimulationScheme};

fn contract(option_type: OptionType, style: OptionStyle) -> OptionContract {
    OptionContract::new(50.0, 1.0, 0.05, 0.25, 0.01, option_type, style).unwrap()
}

fn run(
    contract: OptionContract,
    (s_min, s_max, ds): (f64, f64, f64),
    nr_steps: usize,
    nr_paths: usize,
    scheme: SimulationScheme,
    seed_nr: u64,
) -> MonteCarloSimulation {
    let config = SimulationConfig::builder()
        .grid(s_min, s_max, ds)
        .nr_steps(nr_steps)
        .nr_paths(nr_paths)
        .scheme(scheme)
        .seed(seed_nr)
        .build()
        .unwrap();
    let mut sim = MonteCarloSimulation::new(contract, config);
    sim.run().unwrap();
    sim
}

#[test]
fn european_call_near_the_money() {
    let call = contract(OptionType::Call, OptionStyle::European);
    let bsm = BlackScholesMerton::from_contract(&call);

    for scheme in [SimulationScheme::Euler, SimulationScheme::Exact] {
        let sim = run(call, (49.0, 51.0, 0.5), 100, 100_000, scheme, 20_220_101);

        assert_approx_eq!(sim.price_at(50.0).unwrap(), bsm.price(50.0), 0.5);
        assert_approx_eq!(sim.deltas().get(50.0).unwrap(), bsm.delta(50.0), 0.05);
        assert_approx_eq!(sim.gammas().get(50.0).unwrap(), bsm.gamma(50.0), 0.01);
        assert!(sim.max_standard_error() < 0.05);
    }
}

/// The full grid 10..100 of the accuracy study; takes a while in debug builds.
#[test]
#[ignore]
fn european_call_full_grid() {
    let call = contract(OptionType::Call, OptionStyle::European);
    let sim = run(call, (10.0, 100.0, 0.5), 100, 100_000, SimulationScheme::Euler, 1);
    let fair_value = FairValue::generate(&call, sim.config().grid());

    assert_eq!(sim.prices().len(), 180);
    assert_approx_eq!(
        sim.price_at(50.0).unwrap(),
        fair_value.prices.get(50.0).unwrap(),
        0.5
    );
    let stats = sim.statistics(&fair_value.prices).unwrap();
    assert!(stats.max_pricing_error < 0.5);
    assert!(stats.minimum_simulations > 0);
}

#[test]
fn error_shrinks_with_more_paths() {
    let call = contract(OptionType::Call, OptionStyle::European);
    let fair_value = |sim: &MonteCarloSimulation| FairValue::generate(&call, sim.config().grid()).prices;

    let few = run(call, (45.0, 55.0, 1.0), 20, 1_000, SimulationScheme::Exact, 3);
    let many = run(call, (45.0, 55.0, 1.0), 20, 64_000, SimulationScheme::Exact, 3);

    // the standard error falls with 1 / sqrt(M), a factor 8 here
    assert!(many.max_standard_error() < few.max_standard_error() / 4.0);
    assert!(many.max_pricing_error(&fair_value(&many)).unwrap() < 0.2);
    assert!(many.minimum_simulations_needed().unwrap() > 0);
}

#[test]
fn put_call_parity_on_shared_increments() {
    let call = run(
        contract(OptionType::Call, OptionStyle::European),
        (45.0, 55.0, 1.0),
        50,
        20_000,
        SimulationScheme::Exact,
        11,
    );
    let put = run(
        contract(OptionType::Put, OptionStyle::European),
        (45.0, 55.0, 1.0),
        50,
        20_000,
        SimulationScheme::Exact,
        11,
    );
    for s in [45.0, 50.0, 54.0] {
        let parity = s * (-0.01_f64).exp() - 50.0 * (-0.05_f64).exp();
        assert_approx_eq!(call.price_at(s).unwrap() - put.price_at(s).unwrap(), parity, 0.05);
    }
}

#[test]
fn asian_options_match_closed_forms() {
    for style in [OptionStyle::GeometricAsian, OptionStyle::ArithmeticAsian] {
        for option_type in [OptionType::Call, OptionType::Put] {
            let asian = contract(option_type, style);
            let sim = run(asian, (49.0, 51.5, 1.0), 100, 50_000, SimulationScheme::Exact, 5);
            let fair_value = FairValue::generate(&asian, sim.config().grid());

            assert_approx_eq!(
                sim.price_at(50.0).unwrap(),
                fair_value.prices.get(50.0).unwrap(),
                0.15
            );
        }
    }
}

#[test]
fn asian_prices_below_european() {
    let european = run(
        contract(OptionType::Call, OptionStyle::European),
        (45.0, 56.0, 5.0),
        50,
        10_000,
        SimulationScheme::Exact,
        9,
    );
    let asian = run(
        contract(OptionType::Call, OptionStyle::ArithmeticAsian),
        (45.0, 56.0, 5.0),
        50,
        10_000,
        SimulationScheme::Exact,
        9,
    );
    assert!(asian.price_at(50.0).unwrap() < european.price_at(50.0).unwrap());
    assert!(asian.max_standard_deviation() < european.max_standard_deviation());
}

#[test]
fn refresh_and_rerun() {
    let call = contract(OptionType::Call, OptionStyle::European);
    let mut twice = run(call, (45.0, 55.0, 1.0), 20, 2_000, SimulationScheme::Euler, 13);
    let mut once = run(call, (45.0, 55.0, 1.0), 20, 2_000, SimulationScheme::Euler, 29);
    assert_eq!(twice.state(), RunState::Completed);

    twice.refresh();
    twice.refresh();
    assert_eq!(twice.state(), RunState::Refreshed);
    assert!(twice.prices().is_empty());
    assert!(twice.gammas().is_empty());
    twice.run().unwrap();

    once.refresh();
    once.run().unwrap();

    assert_eq!(twice.state(), RunState::Completed);
    assert_eq!(twice.prices().len(), 10);
    assert!(twice.prices().same_domain(once.prices()));
    assert!(twice.deltas().same_domain(once.deltas()));
    assert!(twice.gammas().same_domain(once.gammas()));

    // new draws, so the prices agree only statistically
    let tolerance = 4.0 * (twice.max_standard_error() + once.max_standard_error());
    assert_approx_eq!(twice.price_at(50.0).unwrap(), once.price_at(50.0).unwrap(), tolerance);
    assert_ne!(twice.price_at(50.0), once.price_at(50.0));

    twice.rerun().unwrap();
    assert_eq!(twice.state(), RunState::Completed);
    assert_eq!(twice.prices().len(), 10);
}
