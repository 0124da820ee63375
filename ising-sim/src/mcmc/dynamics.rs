use rand::Rng;
use rand_xoshiro::Xoshiro256StarStar;

use super::acceptance::metropolis_accept;
use crate::config::Dynamics;
use crate::spins::IsingLattice;

impl Dynamics {
    /// Propose and accept/reject exactly one move of this kind.
    ///
    /// Returns whether the lattice changed.
    #[inline]
    pub fn step(&self, lattice: &mut IsingLattice, rng: &mut Xoshiro256StarStar) -> bool {
        match self {
            Self::Glauber => glauber_step(lattice, rng),
            Self::Kawasaki => kawasaki_step(lattice, rng),
        }
    }
}

#[inline]
fn random_site(lattice: &IsingLattice, rng: &mut Xoshiro256StarStar) -> usize {
    let row = rng.gen_range(0..lattice.rows());
    let col = rng.gen_range(0..lattice.cols());
    lattice.torus().index(row, col)
}

/// Single-spin-flip move on a uniformly chosen site.
pub fn glauber_step(lattice: &mut IsingLattice, rng: &mut Xoshiro256StarStar) -> bool {
    let site = random_site(lattice, rng);
    let delta = lattice.flip_delta_at(site);
    if metropolis_accept(delta, lattice.temperature(), rng) {
        lattice.apply_flip(site, delta);
        return true;
    }
    false
}

/// Energy change of flipping both `a` and `b` (which hold opposite spins).
///
/// `a` is flipped hypothetically, `b`'s delta is taken in that perturbed
/// state, then `a` is restored. When the sites are neighbors this picks up
/// the shared bond.
fn exchange_delta(lattice: &mut IsingLattice, a: usize, b: usize) -> f64 {
    let delta_a = lattice.flip_delta_at(a);
    lattice.toggle_spin(a);
    let delta_b = lattice.flip_delta_at(b);
    lattice.toggle_spin(a);
    delta_a + delta_b
}

/// Spin-exchange move between two uniformly chosen sites (with replacement).
///
/// Equal spins, including the same site drawn twice, are a no-op with no
/// Metropolis draw.
pub fn kawasaki_step(lattice: &mut IsingLattice, rng: &mut Xoshiro256StarStar) -> bool {
    let a = random_site(lattice, rng);
    let b = random_site(lattice, rng);
    if lattice.spin_at(a) == lattice.spin_at(b) {
        return false;
    }

    let delta = exchange_delta(lattice, a, b);
    if metropolis_accept(delta, lattice.temperature(), rng) {
        lattice.apply_flip(a, 0.0);
        lattice.apply_flip(b, delta);
        return true;
    }
    false
}
