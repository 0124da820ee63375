use crate::geometry::Torus;

/// Total energy `E = -sum_<i,j> s_i s_j` of a spin configuration.
///
/// `spins`: flat row-major, values +1/-1, length `torus.n_sites()`.
///
/// Every site contributes `-s_i * (sum of its 4 neighbors)`, which counts each
/// bond once from each endpoint, so the grand total is halved.
pub fn compute_energy(torus: &Torus, spins: &[i8]) -> f64 {
    debug_assert_eq!(spins.len(), torus.n_sites());

    let mut total = 0i64;
    for (i, &si) in spins.iter().enumerate() {
        let h: i64 = torus
            .neighbors(i)
            .iter()
            .map(|&j| spins[j as usize] as i64)
            .sum();
        total -= si as i64 * h;
    }

    total as f64 / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_configurations() {
        let torus = Torus::new(2, 2);
        assert_eq!(compute_energy(&torus, &[1, 1, 1, 1]), -8.0);
        assert_eq!(compute_energy(&torus, &[-1, -1, -1, -1]), -8.0);
    }

    #[test]
    fn test_checkerboard_is_maximal() {
        let torus = Torus::new(4, 4);
        let spins: Vec<i8> = (0..16)
            .map(|site| if (site / 4 + site % 4) % 2 == 0 { 1 } else { -1 })
            .collect();
        assert_eq!(compute_energy(&torus, &spins), 32.0);
    }
}
