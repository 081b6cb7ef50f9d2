//! Multiobjective Universal Function
//!
//! This example runs NSGA-II on Schaffer's bi-objective problem written over
//! one real variable, then prints the Pareto front it found.

use bitevo::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Multiobjective Universal Function ===\n");

    let representations = RepresentationSet::new(
        0,
        vec![],
        vec![DyadicFloat::new(-5.0, 5.0, 16)?],
        vec![],
        vec![],
        vec![],
    );
    let schaffer = MultiObjectiveUniversalFn::new(2, |v: &Variables, values: &mut Vec<f64>| {
        let x = v.floats[0];
        values.push(x * x);
        values.push((x - 2.0) * (x - 2.0));
    });
    let mut function = MultiObjectiveUniversalFunctionAdapter::new(schaffer, representations);

    let mut rng = Generator::seeded(7);
    let config = Nsga2Config::default()
        .with_population_size(40)
        .with_num_generations(100);
    let mut nsga2 = Nsga2::new(config)?;
    let summary = nsga2.minimize(&mut function, &mut rng)?;

    println!("Generations: {}", summary.iterations);
    println!("Pareto front ({} solutions):", nsga2.solutions().len());

    let mut front: Vec<_> = nsga2.solutions().to_vec();
    front.sort_by(|a, b| a.value[0].total_cmp(&b.value[0]));
    for solution in &front {
        let x = function.decode(&solution.bv)?.floats[0];
        println!(
            "  x = {:>8.4}  f1 = {:>8.4}  f2 = {:>8.4}",
            x, solution.value[0], solution.value[1]
        );
    }

    Ok(())
}
