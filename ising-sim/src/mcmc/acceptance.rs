use rand::Rng;
use rand_xoshiro::Xoshiro256StarStar;

/// Metropolis acceptance probability `min(1, exp(-dE / T))`, clamped to `[0, 1]`.
///
/// For `dE >= 0` the exponent is non-positive, so `exp` cannot overflow; at
/// vanishing temperature it underflows to 0.
#[inline]
pub fn acceptance_probability(delta_energy: f64, temperature: f64) -> f64 {
    if delta_energy < 0.0 {
        return 1.0;
    }
    (-delta_energy / temperature).exp().clamp(0.0, 1.0)
}

/// Metropolis rule. Downhill moves are accepted without drawing; otherwise a
/// single fresh uniform `u` in `[0, 1)` is drawn and the move is accepted iff
/// `u <= p`.
#[inline]
pub fn metropolis_accept(
    delta_energy: f64,
    temperature: f64,
    rng: &mut Xoshiro256StarStar,
) -> bool {
    if delta_energy < 0.0 {
        return true;
    }
    let p = acceptance_probability(delta_energy, temperature);
    rng.gen::<f64>() <= p
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_downhill_always_accepted() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(1);
        for &de in &[-0.5, -4.0, -8.0] {
            for &t in &[1e-9, 0.5, 2.27, 100.0] {
                assert!(metropolis_accept(de, t, &mut rng));
            }
        }
    }

    #[test]
    fn test_downhill_consumes_no_randomness() {
        let mut a = Xoshiro256StarStar::seed_from_u64(3);
        let mut b = a.clone();
        assert!(metropolis_accept(-4.0, 1.0, &mut a));
        assert_eq!(a.gen::<u64>(), b.gen::<u64>());
    }

    #[test]
    fn test_probability_strictly_decreasing() {
        let t = 2.0;
        let deltas = [0.0, 2.0, 4.0, 6.0, 8.0];
        let probs: Vec<f64> = deltas
            .iter()
            .map(|&de| acceptance_probability(de, t))
            .collect();
        assert_eq!(probs[0], 1.0);
        for w in probs.windows(2) {
            assert!(w[1] < w[0]);
        }
    }

    #[test]
    fn test_probability_clamped_at_extremes() {
        assert_eq!(acceptance_probability(8.0, 1e-300), 0.0);
        assert_eq!(acceptance_probability(-1e300, 1e-300), 1.0);
        assert_eq!(acceptance_probability(0.0, 1e-300), 1.0);
        let p = acceptance_probability(4.0, 1e300);
        assert!(p > 0.0 && p <= 1.0);
    }

    #[test]
    fn test_acceptance_rate_matches_probability() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(11);
        let (de, t) = (4.0, 2.0);
        let n = 200_000;
        let accepted = (0..n).filter(|_| metropolis_accept(de, t, &mut rng)).count();
        let rate = accepted as f64 / n as f64;
        assert!((rate - (-2.0f64).exp()).abs() < 0.01, "rate = {rate}");
    }

    #[test]
    fn test_zero_temperature_rejects_uphill() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(5);
        for _ in 0..1000 {
            assert!(!metropolis_accept(4.0, 1e-12, &mut rng));
        }
    }
}
