pub mod energy;
pub mod lattice;

pub use energy::compute_energy;
pub use lattice::IsingLattice;
