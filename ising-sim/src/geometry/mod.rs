pub mod torus;

pub use torus::Torus;
