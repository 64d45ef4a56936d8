//! Dynamics: contact resolution, friction, integration, and sleeping.

pub mod friction;
pub mod integrator;
pub mod sleep;
pub mod solver;

pub use integrator::Integrator;
pub use sleep::SleepPolicy;
pub use solver::ContactResolver;
