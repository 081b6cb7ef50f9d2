//! Universal Function Adapter
//!
//! This example optimizes a function written over typed variables. The
//! representations are read from a JSON configuration, and the population
//! pyramid searches the bit strings they decode.

use bitevo::prelude::*;
use num_complex::Complex64;

const CONFIG: &str = r#"{
    "booleans": 2,
    "integers": [
        { "lower": -10, "upper": 10 },
        { "lower": 0, "upper": 100, "num_bits": 5 }
    ],
    "floats": [
        { "lower": -2.0, "upper": 2.0, "resolution": { "precision": 0.001 } }
    ],
    "complexes": [
        {
            "real": { "lower": -1.0, "upper": 1.0, "resolution": { "bits": 8 } },
            "imaginary": { "lower": -1.0, "upper": 1.0, "resolution": { "bits": 8 } }
        }
    ],
    "categoricals": [{ "num_categories": 4 }, { "num_categories": 3 }],
    "permutations": [{ "length": 5, "extra_bits": 2 }]
}"#;

/// Rewards variables close to a fixed target
fn objective(v: &Variables) -> f64 {
    let booleans = v.booleans.iter().filter(|&&b| b).count() as f64;
    let integers = -((v.integers[0] - 3).abs() as f64) + v.integers[1] as f64 / 100.0;
    let real = -(v.floats[0] - 0.5).powi(2);
    let complex = -(v.complexes[0] - Complex64::new(0.25, -0.25)).norm();
    let categories = (v.categoricals[0] == 2) as u8 as f64 + (v.categoricals[1] == 1) as u8 as f64;
    let sorted = v.permutations[0]
        .as_slice()
        .iter()
        .enumerate()
        .filter(|&(i, &x)| i == x)
        .count() as f64;
    booleans + integers + real + complex + categories + sorted
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Universal Function Adapter ===\n");

    let config: RepresentationSetConfig = serde_json::from_str(CONFIG)?;
    let adapter = UniversalFunctionAdapter::from_config(objective, &config)?;
    println!("Representations:\n{}", adapter.representations());
    println!("Bit string size: {}\n", Function::bv_size(&adapter));

    let mut rng = Generator::seeded(42);
    let mut function = CallCounter::new(OnBudgetFunction::new(adapter, 20_000));
    let mut pyramid = ParameterlessPopulationPyramid::default();
    let summary = pyramid.maximize(&mut function, &mut rng)?;

    println!(
        "Passes: {}, evaluations: {}, levels: {}",
        summary.iterations,
        function.num_calls(),
        pyramid.levels().len()
    );
    if let Some(solution) = pyramid.solution() {
        println!("Value: {}", solution.value);
        println!("{}", function.describe(&solution.bv)?);
    }

    Ok(())
}
