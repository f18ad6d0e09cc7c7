//! Developer tools for tuning slingshot chess: a friction sweep plotter and
//! the piece image encoder.

#[macro_use]
extern crate log;
#[macro_use]
extern crate derivative;

pub mod assets;
pub mod chart;
pub mod colors;
pub mod constants;
pub mod sim;
pub mod utils;
pub mod vec2;
pub mod window;

pub use chart::{Chart, ChartCanvas, GridStyle, PlotReporter};
pub use sim::{simulate, Course, Sample, SimulationRun, Sweep};

/// `Info` unless `RUST_LOG` says otherwise
pub fn init_logging() {
    let mut builder = pretty_env_logger::formatted_builder();
    builder.filter_level(log::LevelFilter::Info);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();
}
