//! Monte Carlo simulation of the 2D Ising model.
//!
//! A periodic square lattice of ±1 spins is evolved by Metropolis-weighted
//! single-spin flips (Glauber) or spin exchanges (Kawasaki). The sweep driver
//! scans a temperature range, samples energy and magnetisation after
//! equilibration, and derives heat capacity and susceptibility with bootstrap
//! errors.

pub mod config;
pub mod error;
pub mod geometry;
pub mod mcmc;
pub mod simulation;
pub mod spins;
pub mod statistics;

pub use config::{AnimationConfig, Dynamics, InitialState, SimConfig};
pub use error::{ConfigError, SimError, StatsError};
pub use geometry::Torus;
pub use simulation::{run_scan, run_temperature_point, temperature_grid, Animation};
pub use spins::IsingLattice;
pub use statistics::{Estimate, TemperaturePoint};
