use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

use crate::config::{AnimationConfig, Dynamics};
use crate::mcmc;
use crate::spins::IsingLattice;

/// Frame-stepping driver for interactive display.
///
/// Each frame advances the lattice by a fixed number of single moves; the
/// caller renders [`Animation::lattice`] between frames.
pub struct Animation {
    lattice: IsingLattice,
    dynamics: Dynamics,
    steps_per_frame: usize,
    rng: Xoshiro256StarStar,
    frames: usize,
}

impl Animation {
    pub fn new(config: &AnimationConfig) -> Self {
        let mut rng = Xoshiro256StarStar::seed_from_u64(config.seed);
        let lattice = IsingLattice::new(
            config.rows,
            config.cols,
            config.temperature,
            config.initial,
            &mut rng,
        );
        Self {
            lattice,
            dynamics: config.dynamics,
            steps_per_frame: config.steps_per_frame,
            rng,
            frames: 0,
        }
    }

    /// Run one frame's worth of moves and return the updated lattice.
    pub fn advance_frame(&mut self) -> &IsingLattice {
        for _ in 0..self.steps_per_frame {
            self.dynamics.step(&mut self.lattice, &mut self.rng);
        }
        self.frames += 1;
        &self.lattice
    }

    /// Run whole sweeps instead of a fixed step count.
    pub fn advance_sweeps(&mut self, n_sweeps: usize) -> &IsingLattice {
        for _ in 0..n_sweeps {
            mcmc::sweep(&mut self.lattice, self.dynamics, &mut self.rng);
        }
        &self.lattice
    }

    pub fn lattice(&self) -> &IsingLattice {
        &self.lattice
    }

    pub fn dynamics(&self) -> Dynamics {
        self.dynamics
    }

    /// Frames advanced so far.
    pub fn frames(&self) -> usize {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InitialState;

    #[test]
    fn test_kawasaki_animation_conserves_magnetisation() {
        let cfg = AnimationConfig {
            rows: 10,
            cols: 10,
            ..AnimationConfig::default()
        };
        let mut anim = Animation::new(&cfg);
        let m0 = anim.lattice().spin_sum();
        for _ in 0..20 {
            let lat = anim.advance_frame();
            assert_eq!(lat.spin_sum(), m0);
            assert_eq!(lat.total_energy(), lat.compute_total_energy());
        }
        assert_eq!(anim.frames(), 20);
    }

    #[test]
    fn test_split_start_never_gains_energy_at_low_temperature() {
        let cfg = AnimationConfig {
            rows: 16,
            cols: 16,
            temperature: 0.1,
            initial: InitialState::Split { fraction: 0.25 },
            dynamics: Dynamics::Glauber,
            steps_per_frame: 256,
            seed: 8,
        };
        let mut anim = Animation::new(&cfg);
        let e0 = anim.lattice().total_energy();
        anim.advance_sweeps(50);
        // uphill moves are suppressed at T = 0.1; straight walls can only drift
        assert!(anim.lattice().total_energy() <= e0);
        assert_eq!(
            anim.lattice().total_energy(),
            anim.lattice().compute_total_energy()
        );
    }

    #[test]
    fn test_same_seed_same_frames() {
        let cfg = AnimationConfig {
            rows: 8,
            cols: 8,
            dynamics: Dynamics::Glauber,
            temperature: 2.0,
            ..AnimationConfig::default()
        };
        let mut a = Animation::new(&cfg);
        let mut b = Animation::new(&cfg);
        for _ in 0..5 {
            assert_eq!(a.advance_frame().spins(), b.advance_frame().spins());
        }
    }
}
