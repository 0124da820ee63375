use std::time::Instant;

use ising_sim::{run_scan, Dynamics, SimConfig};

const L: usize = 64;
const N_SWEEPS: usize = 200;

fn main() {
    let config = SimConfig {
        min_temp: 1.5,
        max_temp: 3.0,
        temp_step: 0.1,
        sweeps: N_SWEEPS,
        eqm_sweeps: 50,
        sample_interval: 5,
        bootstrap_samples: 100,
        dynamics: Dynamics::Glauber,
        lattice_size: L,
        seed: SimConfig::DEFAULT_SEED,
        sequential: false,
        autocorrelation_max_lag: None,
    };
    let n_temps = ising_sim::temperature_grid(config.min_temp, config.max_temp, config.temp_step).len();

    println!(
        "Lattice: {}x{}  |  Temps: {}  |  Sweeps: {}  |  Dynamics: {}",
        L,
        L,
        n_temps,
        N_SWEEPS,
        config.dynamics.name()
    );
    println!("{}", "-".repeat(70));

    let t0 = Instant::now();
    let points = run_scan(&config, &|| {}).unwrap();
    let elapsed = t0.elapsed().as_secs_f64();

    let per_sweep = elapsed / (N_SWEEPS * n_temps) as f64 * 1000.0;
    println!("Total: {:.3} s  |  {:.3} ms/sweep", elapsed, per_sweep);
    for p in &points {
        println!("{}", p.to_record());
    }
}
