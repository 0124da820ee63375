use crate::error::StatsError;
use crate::spins::IsingLattice;

/// Ordered measurements of one observable at one temperature point.
#[derive(Debug, Clone, Default)]
pub struct SampleSet {
    values: Vec<f64>,
}

impl SampleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, value: f64) {
        self.values.push(value);
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn mean(&self) -> Result<f64, StatsError> {
        mean(&self.values)
    }

    pub fn variance(&self) -> Result<f64, StatsError> {
        variance(&self.values)
    }
}

/// Arithmetic mean. Empty input violates the caller's precondition.
pub fn mean(samples: &[f64]) -> Result<f64, StatsError> {
    if samples.is_empty() {
        return Err(StatsError::EmptySamples);
    }
    Ok(samples.iter().sum::<f64>() / samples.len() as f64)
}

/// Population variance (divides by N).
///
/// Used for both the point estimates and their bootstrap errors.
pub fn variance(samples: &[f64]) -> Result<f64, StatsError> {
    let m = mean(samples)?;
    let ss: f64 = samples.iter().map(|&x| (x - m) * (x - m)).sum();
    Ok(ss / samples.len() as f64)
}

/// `Var(E) / (rows * cols * T^2)`.
pub fn heat_capacity(
    energies: &[f64],
    rows: usize,
    cols: usize,
    temperature: f64,
) -> Result<f64, StatsError> {
    let n = (rows * cols) as f64;
    Ok(variance(energies)? / (n * temperature * temperature))
}

/// `Var(|M|) / (rows * cols * T)`.
pub fn susceptibility(
    magnetisations: &[f64],
    rows: usize,
    cols: usize,
    temperature: f64,
) -> Result<f64, StatsError> {
    let n = (rows * cols) as f64;
    Ok(variance(magnetisations)? / (n * temperature))
}

/// Absolute total magnetisation `|sum s|` of the current configuration.
pub fn magnetisation(lattice: &IsingLattice) -> f64 {
    lattice.magnetisation()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_population_variance() {
        let xs = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(mean(&xs).unwrap(), 5.0);
        assert_eq!(variance(&xs).unwrap(), 4.0);
    }

    #[test]
    fn test_empty_samples_rejected() {
        assert_eq!(mean(&[]), Err(StatsError::EmptySamples));
        assert_eq!(variance(&[]), Err(StatsError::EmptySamples));
        assert_eq!(heat_capacity(&[], 4, 4, 1.0), Err(StatsError::EmptySamples));
        assert_eq!(susceptibility(&[], 4, 4, 1.0), Err(StatsError::EmptySamples));
        assert_eq!(SampleSet::new().mean(), Err(StatsError::EmptySamples));
    }

    #[test]
    fn test_heat_capacity_and_susceptibility() {
        let xs = [-10.0, -6.0]; // variance 4
        assert_eq!(heat_capacity(&xs, 2, 2, 2.0).unwrap(), 4.0 / 16.0);
        assert_eq!(susceptibility(&xs, 2, 2, 2.0).unwrap(), 4.0 / 8.0);
    }

    #[test]
    fn test_constant_samples_have_zero_fluctuation() {
        let xs = [-32.0; 10];
        assert_eq!(heat_capacity(&xs, 4, 4, 1.3).unwrap(), 0.0);
    }

    #[test]
    fn test_sample_set() {
        let mut s = SampleSet::with_capacity(3);
        s.push(1.0);
        s.push(3.0);
        assert_eq!(s.len(), 2);
        assert_eq!(s.mean().unwrap(), 2.0);
        assert_eq!(s.variance().unwrap(), 1.0);
        s.clear();
        assert!(s.is_empty());
    }
}
