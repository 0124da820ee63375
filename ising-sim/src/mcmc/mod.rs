pub mod acceptance;
pub mod dynamics;
pub mod sweep;

pub use acceptance::{acceptance_probability, metropolis_accept};
pub use dynamics::{glauber_step, kawasaki_step};
pub use sweep::sweep;
