//! Fixed timestep friction simulation.
//!
//! Pieces in the game slide with a velocity that decays by `DT * (1 - C)` of
//! itself every step. This module replays that decay for a single launch so
//! coefficients and launch speeds can be compared on a chart.

use crate::constants::*;

/// one integration step of a run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// 1-based step index
    pub t: u32,
    /// cumulative distance after this step's position update
    pub distance: f64,
    /// velocity after this step's decay, i.e. the one the next step moves with
    pub velocity: f64,
}

#[derive(Debug, Clone)]
pub struct FrictionBody {
    /// distance += vel * dt
    pub distance: f64,
    /// vel -= dt * (1 - coeff) * vel
    pub vel: f64,
    /// dimensionless, 1 means no decay at all
    pub coeff: f64,
    /// the game zeroes velocities that decay below this
    pub velocity_floor: Option<f64>,
}

impl FrictionBody {
    pub fn new(coeff: f64, v0: f64) -> Self {
        Self {
            distance: 0.0,
            vel: v0,
            coeff,
            velocity_floor: None,
        }
    }

    /// explicit euler: the position moves with the velocity from the start
    /// of the step, then the velocity decays
    pub fn step(&mut self, dt: f64) {
        self.distance += dt * self.vel;
        self.vel -= dt * (1.0 - self.coeff) * self.vel;

        if let Some(floor) = self.velocity_floor {
            if self.vel.abs() < floor {
                self.vel = 0.0;
            }
        }
        trace!("distance {} vel {}", self.distance, self.vel);
    }
}

/// a single launch to simulate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationRun {
    pub coeff: f64,
    pub v0: f64,
    pub timesteps: u32,
    pub velocity_floor: Option<f64>,
}

impl SimulationRun {
    pub fn new(coeff: f64, v0: f64, timesteps: u32) -> Self {
        Self {
            coeff,
            v0,
            timesteps,
            velocity_floor: None,
        }
    }

    /// snap velocity to zero below `floor`, the way the game does
    pub fn with_velocity_floor(mut self, floor: f64) -> Self {
        self.velocity_floor = Some(floor);
        self
    }

    /// `"<C>,<v0>"`
    pub fn label(&self) -> String {
        format!("{},{}", self.coeff, self.v0)
    }

    pub fn course(&self) -> Course {
        Course {
            label: self.label(),
            samples: simulate(self),
        }
    }
}

/// Integrates `run` for `run.timesteps` steps of [`DT`] and returns one sample
/// per step. Pure and deterministic; nothing is clamped, so `coeff > 1` makes
/// the velocity grow and a negative `v0` moves backwards.
pub fn simulate(run: &SimulationRun) -> Vec<Sample> {
    let mut body = FrictionBody::new(run.coeff, run.v0);
    body.velocity_floor = run.velocity_floor;

    (1..=run.timesteps)
        .map(|t| {
            body.step(DT);
            Sample {
                t,
                distance: body.distance,
                velocity: body.vel,
            }
        })
        .collect()
}

/// the simulated samples of one run, with the label it is plotted under
#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    pub label: String,
    pub samples: Vec<Sample>,
}

impl Course {
    pub fn final_distance(&self) -> f64 {
        self.samples.last().map(|s| s.distance).unwrap_or(0.0)
    }

    /// first step after which the speed is below `floor`
    pub fn settle_step(&self, floor: f64) -> Option<u32> {
        self.samples
            .iter()
            .find(|s| s.velocity.abs() < floor)
            .map(|s| s.t)
    }
}

/// every combination of coefficient and launch speed, coefficient-major
#[derive(Debug, Clone, PartialEq)]
pub struct Sweep {
    pub coefficients: Vec<f64>,
    pub speeds: Vec<f64>,
    pub timesteps: u32,
}

impl Default for Sweep {
    fn default() -> Self {
        Self {
            coefficients: FRICTION_COEFFS.to_vec(),
            speeds: LAUNCH_SPEEDS.to_vec(),
            timesteps: TIMESTEPS,
        }
    }
}

impl Sweep {
    pub fn runs(&self) -> impl Iterator<Item = SimulationRun> + '_ {
        self.coefficients.iter().flat_map(move |&coeff| {
            self.speeds
                .iter()
                .map(move |&v0| SimulationRun::new(coeff, v0, self.timesteps))
        })
    }
}
