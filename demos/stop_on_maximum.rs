//! Stopping on the Maximum
//!
//! This example runs a (1+1) EA on OneMax until the controller sees the known
//! maximum, then runs it again under an evaluation budget with a progress
//! tracker recording every improvement.

use bitevo::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Stop on Maximum ===\n");

    let mut rng = Generator::from_entropy();
    const BV_SIZE: usize = 50;

    let mut function = StopOnMaximum::new(OneMax::new(BV_SIZE))?;
    let config = OnePlusOneConfig::default().with_num_iterations(0);
    let mut ea = OnePlusOneEa::new(config.clone())?;
    let summary = ea.maximize(&mut function, &mut rng)?;

    if let Some(solution) = ea.solution() {
        println!("Solution: {}", solution.bv);
        println!("Value: {}", solution.value);
    }
    println!(
        "Stopped after {} iterations ({:?})",
        summary.iterations, summary.termination
    );

    println!("\n=== On Budget ===\n");

    let mut function = ProgressTracker::new(OnBudgetFunction::new(OneMax::new(BV_SIZE), 1000))
        .with_log_improvement(true);
    let mut ea = OnePlusOneEa::new(config)?;
    let summary = ea.maximize(&mut function, &mut rng)?;

    println!("Termination: {:?}", summary.termination);
    println!("Evaluations: {}", function.num_calls());
    for event in function.improvements() {
        println!("  {event}");
    }
    if let Some(solution) = ea.solution() {
        println!("Best: {solution}");
    }

    Ok(())
}
