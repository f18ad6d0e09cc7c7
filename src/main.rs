#[macro_use]
extern crate log;

use anyhow::Result;
use slingtune::{constants::VELOCITY_FLOOR, GridStyle, PlotReporter, Sweep};

fn main() -> Result<()> {
    slingtune::init_logging();

    let sweep = Sweep::default();
    info!(
        "simulating {} coefficients x {} speeds for {} steps",
        sweep.coefficients.len(),
        sweep.speeds.len(),
        sweep.timesteps
    );

    let mut reporter = PlotReporter::new();
    for run in sweep.runs() {
        let course = run.course();
        match course.settle_step(VELOCITY_FLOOR) {
            Some(t) => info!(
                "{}: {:.1} after {} steps, below the velocity floor at step {}",
                course.label,
                course.final_distance(),
                run.timesteps,
                t
            ),
            None => info!(
                "{}: {:.1} after {} steps, still moving",
                course.label,
                course.final_distance(),
                run.timesteps
            ),
        }
        reporter.plot(&course.samples, course.label);
    }

    reporter
        .grid(GridStyle::Dashed)
        .x_label("time")
        .y_label("distance")
        .legend();
    reporter.show()
}
