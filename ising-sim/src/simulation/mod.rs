pub mod animation;

pub use animation::Animation;

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::config::{InitialState, SimConfig};
use crate::error::{Result, StatsError};
use crate::mcmc;
use crate::spins::IsingLattice;
use crate::statistics::{
    bootstrap_error, heat_capacity, magnetisation, sokal_tau, susceptibility, AutocorrAccum,
    Estimate, SampleSet, TemperaturePoint,
};

/// Temperatures `min + k * step` for `k = 0, 1, ...` up to and including the
/// first value within one step of `max`.
///
/// When `step` divides `max - min` the last value is `max` (up to rounding);
/// otherwise it overshoots `max` by less than one step.
pub fn temperature_grid(min: f64, max: f64, step: f64) -> Vec<f64> {
    if !(min.is_finite() && max.is_finite() && step.is_finite()) || step <= 0.0 || max < min {
        return vec![];
    }
    let n = ((max - min) / step + 1.0 - 1e-9).ceil() as usize;
    (0..n).map(|k| min + k as f64 * step).collect()
}

/// Run the full Monte Carlo loop (equilibration + sampling) at one temperature.
///
/// A fresh all-up `L x L` lattice is evolved for `config.sweeps` sweeps. After
/// sweep `s` (1-based), if `s >= eqm_sweeps` and `s % n == 0`, the energy is
/// recorded, and for Glauber dynamics also `|M|`. The bootstrap draws come
/// from the same `rng` after the last sweep.
///
/// `on_sweep` is called once per sweep (useful for progress bars).
pub fn run_temperature_point(
    config: &SimConfig,
    temperature: f64,
    rng: &mut Xoshiro256StarStar,
    on_sweep: &(dyn Fn() + Sync),
) -> std::result::Result<TemperaturePoint, StatsError> {
    let side = config.lattice_size;
    let dynamics = config.dynamics;
    let with_mag = dynamics.measures_magnetisation();

    debug!(temperature, dynamics = dynamics.name(), "starting temperature point");

    let mut lattice = IsingLattice::new(side, side, temperature, InitialState::Up, rng);

    let n_expected = config.n_recorded_sweeps();
    let mut energies = SampleSet::with_capacity(n_expected);
    let mut mags = SampleSet::with_capacity(if with_mag { n_expected } else { 0 });
    let mut energy_ac = config.autocorrelation_max_lag.map(AutocorrAccum::new);

    for s in 1..=config.sweeps {
        mcmc::sweep(&mut lattice, dynamics, rng);
        on_sweep();

        if config.records(s) {
            let e = lattice.total_energy();
            energies.push(e);
            if let Some(ref mut acc) = energy_ac {
                acc.push(e);
            }
            if with_mag {
                mags.push(magnetisation(&lattice));
            }
        }
    }

    let cv = |xs: &[f64]| heat_capacity(xs, side, side, temperature);
    let chi = |xs: &[f64]| susceptibility(xs, side, side, temperature);

    let cv_estimate = Estimate {
        value: cv(energies.as_slice())?,
        error: bootstrap_error(energies.as_slice(), cv, config.bootstrap_samples, rng)?,
    };

    let (mean_magnetisation, chi_estimate) = if with_mag {
        let estimate = Estimate {
            value: chi(mags.as_slice())?,
            error: bootstrap_error(mags.as_slice(), chi, config.bootstrap_samples, rng)?,
        };
        (Some(mags.mean()?), Some(estimate))
    } else {
        (None, None)
    };

    let energy_tau = energy_ac.map(|acc| sokal_tau(&acc.finish()));
    if let Some(tau) = energy_tau {
        // tau is measured in recorded samples; above ~1 they are not independent
        if tau > 1.0 {
            warn!(
                temperature,
                tau, "energy samples are correlated; consider a larger sampling stride"
            );
        }
    }

    let point = TemperaturePoint {
        temperature,
        dynamics,
        n_samples: energies.len(),
        mean_energy: energies.mean()?,
        mean_magnetisation,
        heat_capacity: cv_estimate,
        susceptibility: chi_estimate,
        energy_tau,
    };

    info!(
        temperature,
        mean_energy = point.mean_energy,
        heat_capacity = point.heat_capacity.value,
        samples = point.n_samples,
        energy_tau = ?point.energy_tau,
        "temperature point done"
    );

    Ok(point)
}

/// Run every temperature point of `config`, returned in increasing
/// temperature order.
///
/// Point `k` uses its own generator seeded with `config.seed + k`, so the
/// output does not depend on whether points run on the rayon pool or, with
/// `config.sequential`, on the current thread.
pub fn run_scan(
    config: &SimConfig,
    on_sweep: &(dyn Fn() + Sync),
) -> Result<Vec<TemperaturePoint>> {
    config.checked()?;

    let temps = temperature_grid(config.min_temp, config.max_temp, config.temp_step);
    info!(
        n_temps = temps.len(),
        size = config.lattice_size,
        dynamics = config.dynamics.name(),
        sweeps = config.sweeps,
        "starting scan"
    );

    let work = |(k, &temperature): (usize, &f64)| {
        let mut rng = Xoshiro256StarStar::seed_from_u64(config.seed.wrapping_add(k as u64));
        run_temperature_point(config, temperature, &mut rng, on_sweep)
    };

    let points: std::result::Result<Vec<TemperaturePoint>, StatsError> = if config.sequential {
        temps.iter().enumerate().map(work).collect()
    } else {
        temps.par_iter().enumerate().map(work).collect()
    };

    Ok(points?)
}

/// Total number of sweeps a scan performs, across all temperature points.
pub fn total_sweeps(config: &SimConfig) -> usize {
    temperature_grid(config.min_temp, config.max_temp, config.temp_step).len() * config.sweeps
}
