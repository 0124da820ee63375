use rand::Rng;
use rand_xoshiro::Xoshiro256StarStar;

use crate::config::InitialState;
use crate::geometry::Torus;

use super::energy::compute_energy;

/// Spin grid at a fixed temperature with incrementally tracked energy.
///
/// `total_energy` always equals [`compute_energy`] of the current spins. It is
/// computed once at construction and afterwards only changed through
/// [`IsingLattice::flip`], which applies the exact single-site delta together
/// with the spin change.
#[derive(Debug, Clone)]
pub struct IsingLattice {
    torus: Torus,
    /// Row-major spins, each +1 or -1.
    spins: Vec<i8>,
    temperature: f64,
    total_energy: f64,
}

impl IsingLattice {
    /// Build a `rows x cols` lattice filled according to `initial`.
    ///
    /// `rng` is only drawn from for [`InitialState::Random`].
    pub fn new(
        rows: usize,
        cols: usize,
        temperature: f64,
        initial: InitialState,
        rng: &mut Xoshiro256StarStar,
    ) -> Self {
        let torus = Torus::new(rows, cols);
        let n_sites = torus.n_sites();

        let spins: Vec<i8> = match initial {
            InitialState::Up => vec![1; n_sites],
            InitialState::Random => (0..n_sites)
                .map(|_| if rng.gen::<bool>() { 1 } else { -1 })
                .collect(),
            InitialState::Split { fraction } => {
                let split = split_column(cols, fraction);
                (0..n_sites)
                    .map(|site| if site % cols < split { 1 } else { -1 })
                    .collect()
            }
        };

        Self::from_spins(torus, spins, temperature)
    }

    /// Wrap an explicit spin configuration (row-major, values +1/-1).
    pub fn from_spins(torus: Torus, spins: Vec<i8>, temperature: f64) -> Self {
        assert_eq!(
            spins.len(),
            torus.n_sites(),
            "spin count does not match lattice extent"
        );
        debug_assert!(spins.iter().all(|&s| s == 1 || s == -1));

        let total_energy = compute_energy(&torus, &spins);
        Self {
            torus,
            spins,
            temperature,
            total_energy,
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.torus.rows()
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.torus.cols()
    }

    #[inline]
    pub fn n_spins(&self) -> usize {
        self.spins.len()
    }

    #[inline]
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    #[inline]
    pub fn total_energy(&self) -> f64 {
        self.total_energy
    }

    pub fn torus(&self) -> &Torus {
        &self.torus
    }

    /// Row-major spin slice.
    pub fn spins(&self) -> &[i8] {
        &self.spins
    }

    #[inline]
    pub fn spin(&self, row: usize, col: usize) -> i8 {
        self.spins[self.torus.index(row, col)]
    }

    #[inline]
    pub fn spin_at(&self, site: usize) -> i8 {
        self.spins[site]
    }

    /// Sum of the four periodic neighbors of `(row, col)`.
    #[inline]
    pub fn neighbor_sum(&self, row: usize, col: usize) -> i32 {
        self.neighbor_sum_at(self.torus.index(row, col))
    }

    #[inline]
    pub fn neighbor_sum_at(&self, site: usize) -> i32 {
        self.torus
            .neighbors(site)
            .iter()
            .map(|&j| self.spins[j as usize] as i32)
            .sum()
    }

    /// Energy change if the spin at `(row, col)` were flipped.
    #[inline]
    pub fn local_flip_delta(&self, row: usize, col: usize) -> f64 {
        self.flip_delta_at(self.torus.index(row, col))
    }

    /// `2 * s_i * h_i`: flipping `s_i` negates its four bonds and nothing else.
    #[inline]
    pub fn flip_delta_at(&self, site: usize) -> f64 {
        (2 * self.spins[site] as i32 * self.neighbor_sum_at(site)) as f64
    }

    /// Flip `(row, col)` and apply the matching energy delta.
    pub fn flip(&mut self, row: usize, col: usize) {
        self.flip_at(self.torus.index(row, col));
    }

    #[inline]
    pub fn flip_at(&mut self, site: usize) {
        let delta = self.flip_delta_at(site);
        self.apply_flip(site, delta);
    }

    /// Flip `site` and add a delta the caller has already computed.
    #[inline]
    pub(crate) fn apply_flip(&mut self, site: usize, delta: f64) {
        self.spins[site] = -self.spins[site];
        self.total_energy += delta;
    }

    /// Negate a spin without touching the energy. Callers must restore it
    /// before the lattice is observed again.
    #[inline]
    pub(crate) fn toggle_spin(&mut self, site: usize) {
        self.spins[site] = -self.spins[site];
    }

    /// Signed sum of all spins.
    pub fn spin_sum(&self) -> i64 {
        self.spins.iter().map(|&s| s as i64).sum()
    }

    /// Absolute total magnetisation `|sum s|`.
    pub fn magnetisation(&self) -> f64 {
        self.spin_sum().unsigned_abs() as f64
    }

    /// Full recomputation of the energy from the current spins.
    pub fn compute_total_energy(&self) -> f64 {
        compute_energy(&self.torus, &self.spins)
    }
}

/// First down column of a split configuration.
fn split_column(cols: usize, fraction: f64) -> usize {
    ((cols as f64 * fraction.clamp(0.0, 1.0)).round() as usize).min(cols)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> Xoshiro256StarStar {
        Xoshiro256StarStar::seed_from_u64(7)
    }

    #[test]
    fn test_uniform_up_2x2_energy() {
        let lat = IsingLattice::new(2, 2, 1.0, InitialState::Up, &mut rng());
        assert_eq!(lat.total_energy(), -8.0);
        assert_eq!(lat.magnetisation(), 4.0);
    }

    #[test]
    fn test_uniform_up_energy_is_minus_two_per_site() {
        let lat = IsingLattice::new(6, 4, 1.0, InitialState::Up, &mut rng());
        assert_eq!(lat.total_energy(), -48.0);
    }

    #[test]
    fn test_split_initial_state() {
        let lat = IsingLattice::new(
            50,
            50,
            1.0,
            InitialState::Split { fraction: 0.5 },
            &mut rng(),
        );
        assert_eq!(lat.spin(0, 24), 1);
        assert_eq!(lat.spin(49, 25), -1);
        assert_eq!(lat.spin_sum(), 0);
        // two domain walls of 50 broken bonds each: -2N + 2 * 2 * 50
        assert_eq!(lat.total_energy(), -5000.0 + 200.0);
    }

    #[test]
    fn test_random_initial_state_matches_recomputation() {
        let lat = IsingLattice::new(9, 7, 2.0, InitialState::Random, &mut rng());
        assert!(lat.spins().iter().any(|&s| s == 1));
        assert!(lat.spins().iter().any(|&s| s == -1));
        assert_eq!(lat.total_energy(), lat.compute_total_energy());
    }

    #[test]
    fn test_neighbor_sum_wraps() {
        let torus = Torus::new(3, 3);
        let mut spins = vec![1i8; 9];
        // (2,0) is the up-neighbor of (0,0); (0,2) its left-neighbor
        spins[6] = -1;
        spins[2] = -1;
        let lat = IsingLattice::from_spins(torus, spins, 1.0);
        assert_eq!(lat.neighbor_sum(0, 0), 0);
        assert_eq!(lat.local_flip_delta(0, 0), 0.0);
        assert_eq!(lat.neighbor_sum(1, 1), 4);
    }

    #[test]
    fn test_double_flip_restores_state() {
        let mut lat = IsingLattice::new(5, 6, 1.5, InitialState::Random, &mut rng());
        let spins = lat.spins().to_vec();
        let energy = lat.total_energy();
        for row in 0..5 {
            for col in 0..6 {
                lat.flip(row, col);
                assert_eq!(lat.total_energy(), lat.compute_total_energy());
                lat.flip(row, col);
                assert_eq!(lat.total_energy(), energy);
                assert_eq!(lat.spins(), spins.as_slice());
            }
        }
    }

    #[test]
    fn test_flip_delta_matches_recomputation() {
        let lat = IsingLattice::new(4, 5, 1.0, InitialState::Random, &mut rng());
        for site in 0..lat.n_spins() {
            let mut probe = lat.clone();
            let before = probe.compute_total_energy();
            probe.toggle_spin(site);
            assert_eq!(probe.compute_total_energy() - before, lat.flip_delta_at(site));
        }
    }
}
