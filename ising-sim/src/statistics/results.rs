use crate::config::Dynamics;

/// Error-bearing estimate of a derived observable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    pub value: f64,
    /// Bootstrap standard error.
    pub error: f64,
}

/// Finalised observables of one temperature point.
///
/// `mean_magnetisation` and `susceptibility` are `None` under Kawasaki
/// dynamics, which conserves the magnetisation.
#[derive(Debug, Clone, PartialEq)]
pub struct TemperaturePoint {
    pub temperature: f64,
    pub dynamics: Dynamics,
    /// Number of sweeps that contributed a sample.
    pub n_samples: usize,
    /// ⟨E⟩ — mean total energy.
    pub mean_energy: f64,
    /// ⟨|M|⟩ — mean absolute total magnetisation.
    pub mean_magnetisation: Option<f64>,
    pub heat_capacity: Estimate,
    pub susceptibility: Option<Estimate>,
    /// Integrated autocorrelation time of the recorded energy series, in
    /// units of recorded samples.
    pub energy_tau: Option<f64>,
}

impl TemperaturePoint {
    /// One output line, comma-separated with six decimals.
    ///
    /// Glauber: `T, E, |M|, C, dC, chi, dchi`. Kawasaki: `T, E, C, dC`.
    pub fn to_record(&self) -> String {
        let mut fields = vec![self.temperature, self.mean_energy];
        if let Some(m) = self.mean_magnetisation {
            fields.push(m);
        }
        fields.push(self.heat_capacity.value);
        fields.push(self.heat_capacity.error);
        if let Some(chi) = self.susceptibility {
            fields.push(chi.value);
            fields.push(chi.error);
        }
        fields
            .iter()
            .map(|v| format!("{v:.6}"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
