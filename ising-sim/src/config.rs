use std::str::FromStr;

use validator::{Validate, ValidationError};

use crate::error::ConfigError;

/// Local update move used to evolve the lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dynamics {
    /// Single-spin flip.
    Glauber,
    /// Spin exchange between two sites; conserves magnetisation.
    Kawasaki,
}

impl Dynamics {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Glauber => "glauber",
            Self::Kawasaki => "kawasaki",
        }
    }

    /// Whether magnetisation and susceptibility are meaningful observables.
    pub fn measures_magnetisation(&self) -> bool {
        matches!(self, Self::Glauber)
    }
}

impl TryFrom<&str> for Dynamics {
    type Error = ConfigError;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "glauber" => Ok(Self::Glauber),
            "kawasaki" => Ok(Self::Kawasaki),
            _ => Err(ConfigError::UnknownDynamics(s.to_string())),
        }
    }
}

/// Starting configuration of a freshly built lattice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InitialState {
    Up,
    Random,
    /// Columns left of `round(cols * fraction)` up, the rest down.
    Split { fraction: f64 },
}

impl TryFrom<&str> for InitialState {
    type Error = ConfigError;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "up" | "u" => Ok(Self::Up),
            "random" | "r" => Ok(Self::Random),
            "split" | "k" => Ok(Self::Split { fraction: 0.5 }),
            _ => Err(ConfigError::UnknownInitialState(s.to_string())),
        }
    }
}

/// Number of comma-separated fields in a parameter line.
pub const PARAM_FIELDS: usize = 9;

/// Upper bound on the number of temperature points in one scan.
pub const MAX_TEMPERATURE_POINTS: usize = 1_000_000;

fn validate_sim_config(cfg: &SimConfig) -> Result<(), ValidationError> {
    if !cfg.min_temp.is_finite() || !cfg.max_temp.is_finite() || !cfg.temp_step.is_finite() {
        return Err(ValidationError::new(
            "min_temp, max_temp and temp_step must be finite",
        ));
    }
    if cfg.min_temp <= 0.0 {
        return Err(ValidationError::new("min_temp must be > 0"));
    }
    if cfg.temp_step <= 0.0 {
        return Err(ValidationError::new("temp_step must be > 0"));
    }
    if cfg.min_temp > cfg.max_temp {
        return Err(ValidationError::new("min_temp must be <= max_temp"));
    }
    if (cfg.max_temp - cfg.min_temp) / cfg.temp_step >= MAX_TEMPERATURE_POINTS as f64 {
        return Err(ValidationError::new("too many temperature points"));
    }
    if cfg.sweeps < 1 {
        return Err(ValidationError::new("sweeps must be >= 1"));
    }
    if cfg.sample_interval < 1 {
        return Err(ValidationError::new("sample interval must be >= 1"));
    }
    if cfg.bootstrap_samples < 1 {
        return Err(ValidationError::new("bootstrap_samples must be >= 1"));
    }
    if cfg.lattice_size < 1 {
        return Err(ValidationError::new("lattice_size must be >= 1"));
    }
    if cfg.n_recorded_sweeps() == 0 {
        return Err(ValidationError::new(
            "no sweep is sampled: need some s in max(eqm_sweeps, 1)..=sweeps with s % n == 0",
        ));
    }
    if cfg.autocorrelation_max_lag == Some(0) {
        return Err(ValidationError::new("autocorrelation_max_lag must be >= 1"));
    }
    Ok(())
}

/// Parameters of one batch run. Fixed for the whole run.
#[derive(Debug, Clone, Validate)]
#[validate(schema(function = "validate_sim_config"))]
pub struct SimConfig {
    pub min_temp: f64,
    pub max_temp: f64,
    pub temp_step: f64,
    pub sweeps: usize,
    /// Sweeps before this index (1-based) are discarded as equilibration.
    pub eqm_sweeps: usize,
    /// Keep every `sample_interval`-th sweep after equilibration.
    pub sample_interval: usize,
    pub bootstrap_samples: usize,
    pub dynamics: Dynamics,
    /// Side length of the square lattice.
    pub lattice_size: usize,
    /// Temperature point `k` is seeded with `seed + k`.
    pub seed: u64,
    /// Run temperature points on the current thread instead of the rayon pool.
    pub sequential: bool,
    /// Estimate the integrated autocorrelation time of the recorded energy.
    pub autocorrelation_max_lag: Option<usize>,
}

impl SimConfig {
    pub const DEFAULT_SEED: u64 = 42;

    /// Parse the single-line parameter format:
    /// `min_temp, max_temp, temp_step, sweeps, eqm_sweeps, n, bootstrap_samples, dynamics, side`.
    ///
    /// The result is not validated; see [`SimConfig::checked`].
    pub fn from_param_line(line: &str) -> Result<Self, ConfigError> {
        let fields: Vec<&str> = line.trim().split(',').map(str::trim).collect();
        if fields.len() != PARAM_FIELDS {
            return Err(ConfigError::FieldCount {
                expected: PARAM_FIELDS,
                found: fields.len(),
            });
        }

        Ok(Self {
            min_temp: parse_field("min_temp", fields[0])?,
            max_temp: parse_field("max_temp", fields[1])?,
            temp_step: parse_field("temp_step", fields[2])?,
            sweeps: parse_field("sweeps", fields[3])?,
            eqm_sweeps: parse_field("eqm_sweeps", fields[4])?,
            sample_interval: parse_field("n", fields[5])?,
            bootstrap_samples: parse_field("bootstrap_samples", fields[6])?,
            dynamics: Dynamics::try_from(fields[7])?,
            lattice_size: parse_field("lattice_side_length", fields[8])?,
            seed: Self::DEFAULT_SEED,
            sequential: false,
            autocorrelation_max_lag: None,
        })
    }

    /// Run validation and convert the failure into a [`ConfigError`].
    pub fn checked(&self) -> Result<(), ConfigError> {
        self.validate()
            .map_err(|e| ConfigError::Invalid(format!("{e}")))
    }

    pub fn n_sites(&self) -> usize {
        self.lattice_size * self.lattice_size
    }

    /// Whether sweep `s` (1-based) contributes a sample.
    #[inline]
    pub fn records(&self, s: usize) -> bool {
        s >= self.eqm_sweeps && s % self.sample_interval == 0
    }

    /// Number of sweeps that contribute a sample at every temperature point.
    pub fn n_recorded_sweeps(&self) -> usize {
        if self.sample_interval == 0 || self.sweeps == 0 {
            return 0;
        }
        let first = self.eqm_sweeps.max(1);
        if first > self.sweeps {
            return 0;
        }
        self.sweeps / self.sample_interval - (first - 1) / self.sample_interval
    }
}

impl FromStr for SimConfig {
    type Err = ConfigError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_param_line(s)
    }
}

fn parse_field<T: FromStr>(field: &'static str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::Parse {
        field,
        value: value.to_string(),
    })
}

/// Parameters of the frame-stepping animation.
#[derive(Debug, Clone)]
pub struct AnimationConfig {
    pub rows: usize,
    pub cols: usize,
    pub temperature: f64,
    pub initial: InitialState,
    pub dynamics: Dynamics,
    pub steps_per_frame: usize,
    pub seed: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            rows: 50,
            cols: 50,
            temperature: 1.0,
            initial: InitialState::Random,
            dynamics: Dynamics::Kawasaki,
            steps_per_frame: 2500,
            seed: SimConfig::DEFAULT_SEED,
        }
    }
}
