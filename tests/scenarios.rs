//! End-to-end scenarios
//!
//! Representations, adapters, controllers and algorithms working together
//! through the public API.

use approx::assert_relative_eq;
use bitevo::prelude::*;

fn bits(s: &str) -> BitString {
    s.parse().unwrap()
}

#[test]
fn dyadic_float_decodes_the_extremes() {
    let rep = DyadicFloat::new(-2.0, 2.0, 8).unwrap();
    assert_eq!(rep.decode(BitString::zeros(8).bits()).unwrap(), -2.0);
    assert_eq!(rep.decode(BitString::ones(8).bits()).unwrap(), 1.984375);
}

#[test]
fn linear_categorical_decodes_codes() {
    let rep = LinearCategorical::new(4).unwrap();
    assert_eq!(rep.decode(bits("11").bits()).unwrap(), 3);
    assert_eq!(rep.decode(bits("00").bits()).unwrap(), 0);
}

#[test]
fn adapter_decodes_a_config_read_from_json() {
    let json = r#"{
        "booleans": 1,
        "integers": [{ "lower": -1, "upper": 2 }],
        "floats": [{ "lower": -2.0, "upper": 2.0, "resolution": { "bits": 8 } }],
        "categoricals": [{ "num_categories": 4 }]
    }"#;
    let config: RepresentationSetConfig = serde_json::from_str(json).unwrap();
    let adapter = UniversalFunctionAdapter::from_config(
        |v: &Variables| v.floats[0] + v.integers[0] as f64,
        &config,
    )
    .unwrap();
    assert_eq!(Function::bv_size(&adapter), 1 + 2 + 8 + 2);

    let variables = adapter.decode(&bits("1111111111111")).unwrap();
    assert_eq!(variables.booleans, vec![true]);
    assert_eq!(variables.integers, vec![2]);
    assert_relative_eq!(variables.floats[0], 1.984375);
    assert_eq!(variables.categoricals, vec![3]);
}

#[test]
fn adapter_rejects_wrong_length() {
    let set = RepresentationSet::new(3, vec![], vec![], vec![], vec![], vec![]);
    let mut adapter = UniversalFunctionAdapter::new(|v: &Variables| v.booleans.len() as f64, set);
    assert_eq!(
        adapter.evaluate(&BitString::zeros(4)),
        Err(EvolutionError::SizeMismatch {
            expected: 3,
            actual: 4
        })
    );
}

#[test]
fn stop_on_maximum_carries_the_trigger() {
    let mut f = StopOnMaximum::new(OneMax::new(6)).unwrap();
    assert_eq!(f.evaluate(&bits("110111")).unwrap(), Evaluation::Value(5.0));

    let result = f.evaluate(&BitString::ones(6)).unwrap();
    let Evaluation::Terminated(termination) = result else {
        panic!("expected a termination signal");
    };
    assert_eq!(termination.reason, TerminationReason::TargetReached);
    let trigger = termination.trigger.unwrap();
    assert_eq!(trigger.solution, BitString::ones(6));
    assert_eq!(trigger.value, 6.0);
}

#[test]
fn budget_of_five_terminates_on_the_fifth_call() {
    let mut f = OnBudgetFunction::new(OneMax::new(4), 5);
    let bv = bits("1010");
    for _ in 0..4 {
        assert_eq!(f.evaluate(&bv).unwrap(), Evaluation::Value(2.0));
    }

    let fifth = f.evaluate(&bv).unwrap();
    let termination = fifth.into_result().unwrap_err();
    assert_eq!(termination.reason, TerminationReason::LastEvaluation);
    assert_eq!(termination.trigger.unwrap().value, 2.0);

    let sixth = f.evaluate(&bv).unwrap();
    assert!(sixth.is_terminated());
    assert_eq!(sixth.evaluated_value(), None);
    assert_eq!(f.num_calls(), 5);
}

#[test]
fn termination_travels_through_a_controller_stack() {
    let mut rng = Generator::seeded(17);
    let set = RepresentationSet::new(
        0,
        vec![DyadicInteger::exact(0, 255).unwrap()],
        vec![],
        vec![],
        vec![],
        vec![],
    );
    let adapter = UniversalFunctionAdapter::new(|v: &Variables| v.integers[0] as f64, set);
    let mut f = ProgressTracker::new(CallCounter::new(OnBudgetFunction::new(adapter, 40)))
        .with_log_improvement(true);

    let mut search = RandomSearch::new(RandomSearchConfig::default().with_num_iterations(0));
    let summary = search.maximize(&mut f, &mut rng).unwrap();

    assert_eq!(summary.termination, Some(TerminationReason::LastEvaluation));
    assert_eq!(f.inner().num_calls(), 40);
    assert_eq!(f.num_calls(), 40);
    let best = search.solution().unwrap();
    assert_eq!(f.best_value(), Some(best.value));
    assert_eq!(f.improvements().last().map(|e| e.value), Some(best.value));
}

#[test]
fn nsga2_finds_mutually_non_dominated_front() {
    let mut rng = Generator::seeded(99);
    let n = 8;
    let mut f = OneMinMax::new(n);
    let config = Nsga2Config::default()
        .with_population_size(30)
        .with_num_generations(40);
    let mut nsga2 = Nsga2::new(config).unwrap();
    nsga2.minimize(&mut f, &mut rng).unwrap();

    let solutions = nsga2.solutions();
    assert!(!solutions.is_empty());
    for a in solutions {
        assert_eq!(a.value.len(), 2);
        assert_eq!(a.value[0] + a.value[1], n as f64);
        for b in solutions {
            let dominates = a.value.iter().zip(&b.value).all(|(x, y)| x <= y)
                && a.value.iter().zip(&b.value).any(|(x, y)| x < y);
            assert!(!dominates);
        }
    }
}

#[test]
fn multiobjective_adapter_feeds_nsga2() {
    let mut rng = Generator::seeded(5);
    let set = RepresentationSet::new(
        0,
        vec![],
        vec![DyadicFloat::new(0.0, 1.0, 10).unwrap()],
        vec![],
        vec![],
        vec![],
    );
    let objective = MultiObjectiveUniversalFn::new(2, |v: &Variables, out: &mut Vec<f64>| {
        let x = v.floats[0];
        out.push(x * x);
        out.push((x - 1.0) * (x - 1.0));
    });
    let mut f = MultiObjectiveUniversalFunctionAdapter::new(objective, set);
    let config = Nsga2Config::default()
        .with_population_size(20)
        .with_num_generations(20);
    let mut nsga2 = Nsga2::new(config).unwrap();
    nsga2.minimize(&mut f, &mut rng).unwrap();

    for solution in nsga2.solutions() {
        let x = f.decode(&solution.bv).unwrap().floats[0];
        assert_relative_eq!(solution.value[0], x * x);
        assert!((0.0..1.0).contains(&x));
    }
}

fn record_pyramid(seed: u64) -> Vec<BitString> {
    let mut log = Vec::new();
    {
        let mut f = FnFunction::new(12, |bv: &BitString| {
            log.push(bv.clone());
            bv.count_ones() as f64
        });
        let mut rng = Generator::seeded(seed);
        ParameterlessPopulationPyramid::default()
            .maximize(&mut f, &mut rng)
            .unwrap();
    }
    log
}

fn record_one_plus_one(seed: u64) -> Vec<BitString> {
    let mut log = Vec::new();
    {
        let mut f = FnFunction::new(12, |bv: &BitString| {
            log.push(bv.clone());
            bv.count_ones() as f64
        });
        let mut rng = Generator::seeded(seed);
        let config = OnePlusOneConfig::default().with_num_iterations(50);
        OnePlusOneEa::new(config)
            .unwrap()
            .maximize(&mut f, &mut rng)
            .unwrap();
    }
    log
}

fn record_nsga2(seed: u64) -> Vec<BitString> {
    let mut log = Vec::new();
    {
        let mut f = FnMultiObjectiveFunction::new(10, 2, |bv: &BitString| {
            log.push(bv.clone());
            let ones = bv.count_ones() as f64;
            vec![ones, 10.0 - ones]
        });
        let mut rng = Generator::seeded(seed);
        let config = Nsga2Config::default()
            .with_population_size(8)
            .with_num_generations(5);
        Nsga2::new(config)
            .unwrap()
            .maximize(&mut f, &mut rng)
            .unwrap();
    }
    log
}

fn record_random_search(seed: u64) -> Vec<BitString> {
    let mut log = Vec::new();
    {
        let mut f = FnFunction::new(12, |bv: &BitString| {
            log.push(bv.clone());
            bv.count_ones() as f64
        });
        let mut rng = Generator::seeded(seed);
        RandomSearch::new(RandomSearchConfig::default().with_num_iterations(30))
            .maximize(&mut f, &mut rng)
            .unwrap();
    }
    log
}

#[test]
fn seeded_runs_are_reproducible() {
    assert_eq!(record_random_search(3), record_random_search(3));
    assert_eq!(record_pyramid(3), record_pyramid(3));
    assert_eq!(record_one_plus_one(3), record_one_plus_one(3));
    assert_eq!(record_nsga2(3), record_nsga2(3));
    assert_ne!(record_one_plus_one(3), record_one_plus_one(4));
    assert_ne!(record_random_search(3), record_random_search(4));
}

#[test]
fn reseeding_replays_the_same_stream() {
    let mut rng = Generator::seeded(7);
    let first = BitString::random(32, &mut rng);
    rng.set_seed(Some(7));
    assert_eq!(BitString::random(32, &mut rng), first);
}
