use rand_xoshiro::Xoshiro256StarStar;

use crate::config::Dynamics;
use crate::spins::IsingLattice;

/// One sweep: `rows * cols` independent proposals of `dynamics`.
///
/// Sites are drawn at random, so a sweep is one attempted update per site on
/// average rather than a deterministic pass. Returns the number of accepted
/// moves.
#[cfg_attr(feature = "profile", inline(never))]
pub fn sweep(
    lattice: &mut IsingLattice,
    dynamics: Dynamics,
    rng: &mut Xoshiro256StarStar,
) -> usize {
    let n_spins = lattice.n_spins();
    let mut accepted = 0;
    for _ in 0..n_spins {
        if dynamics.step(lattice, rng) {
            accepted += 1;
        }
    }
    accepted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InitialState;
    use rand::SeedableRng;

    #[test]
    fn test_sweep_makes_n_proposals() {
        // at infinite temperature every glauber proposal is accepted
        let mut rng = Xoshiro256StarStar::seed_from_u64(9);
        let mut lat = IsingLattice::new(4, 6, f64::INFINITY, InitialState::Up, &mut rng);
        assert_eq!(sweep(&mut lat, Dynamics::Glauber, &mut rng), 24);
        assert_eq!(lat.total_energy(), lat.compute_total_energy());
    }

    #[test]
    fn test_sweep_keeps_energy_in_lockstep() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(10);
        let mut lat = IsingLattice::new(12, 12, 2.3, InitialState::Random, &mut rng);
        for _ in 0..50 {
            sweep(&mut lat, Dynamics::Glauber, &mut rng);
            sweep(&mut lat, Dynamics::Kawasaki, &mut rng);
        }
        assert_eq!(lat.total_energy(), lat.compute_total_energy());
    }
}
