pub mod autocorrelation;
pub mod bootstrap;
pub mod results;
pub mod stats;

pub use autocorrelation::{sokal_tau, AutocorrAccum};
pub use bootstrap::bootstrap_error;
pub use results::{Estimate, TemperaturePoint};
pub use stats::{heat_capacity, magnetisation, mean, susceptibility, variance, SampleSet};
