//! Backend-agnostic data model produced by the parsers.
//!
//! - [`units`] – Unit system and conversion factors of one backend.
//! - [`system`] – Atom count, masses and degrees-of-freedom reductions.
//! - [`trajectory`] – Per-frame particle positions and velocities.
//! - [`observables`] – Scalar time series such as kinetic or total energy.
//! - [`ensemble`] – Ensemble label and its defining constants.
//! - [`simulation`] – The [`SimulationData`] aggregate tying everything together.
//!
//! [`SimulationData`]: simulation::SimulationData

pub mod ensemble;
pub mod error;
pub mod observables;
pub mod simulation;
pub mod system;
pub mod trajectory;
pub mod units;
