//! Parsing and normalization of molecular-dynamics output for physical
//! validation.
//!
//! Simulation engines write their results in formats of their own. This crate
//! reads one engine's output files and turns them into a single, internally
//! consistent [`SimulationData`] aggregate: the unit convention, the system
//! description, the sampled ensemble, the thermodynamic time series and the
//! particle trajectory. Statistical validators (ensemble checks,
//! kinetic-energy distribution tests, integrator convergence) consume that
//! aggregate without caring where it came from.
//!
//! # Features
//!
//! - **Typed data model** with its invariants checked at construction time
//! - **Integrator classification** mapping the engine's integrator to an
//!   ensemble and its defining constants
//! - **Derived observables** such as total energy, temperature and the
//!   integrator's constant of motion
//! - **Native readers** for the GSD trajectory container, HOOMD metadata and
//!   HOOMD thermodynamic logs
//!
//! # Quick Start
//!
//! ```no_run
//! use physval::{EnsembleKind, HoomdFiles, HoomdParser, ObservableKind, Parser};
//!
//! let parser = HoomdParser::new();
//! let files = HoomdFiles::new("run.json", "run.gsd", "run.log");
//! let data = parser.get_simulation_data(&files)?;
//!
//! let ensemble = data.ensemble().expect("HOOMD runs always carry an ensemble");
//! if ensemble.kind() == EnsembleKind::Nvt {
//!     println!("target temperature: {:?} K", ensemble.temperature());
//! }
//! let total = &data.observables()[ObservableKind::TotalEnergy];
//! println!("{} samples of total energy", total.len());
//! # Ok::<(), physval::io::Error>(())
//! ```
//!
//! # Module Organization
//!
//! - [`io`] – Parser trait, backends and the file readers they rely on
//!
//! # Data Types
//!
//! - [`SimulationData`] – Aggregate of everything below, built once
//! - [`UnitData`] – Unit labels, conversion factors and Boltzmann constant
//! - [`SystemData`] – Atom count, masses and degree-of-freedom reductions
//! - [`EnsembleData`] – Ensemble label and defining constants
//! - [`ObservableData`] – Thermodynamic time series keyed by [`ObservableKind`]
//! - [`TrajectoryData`] – Per-frame positions and velocities

mod model;

pub mod io;

pub use model::ensemble::{EnsembleData, EnsembleKind, ParseEnsembleError};
pub use model::error::ModelError;
pub use model::observables::{ObservableData, ObservableKind, ParseObservableError};
pub use model::simulation::{SimulationData, SimulationDataBuilder};
pub use model::system::SystemData;
pub use model::trajectory::{TrajectoryData, Vec3};
pub use model::units::{KB_CANONICAL, Quantity, Unit, UnitData};

pub use io::capability::{Availability, gsd_support};
pub use io::hoomd::{HoomdConfig, HoomdFiles, HoomdMetadata, HoomdParser, Integrator};
pub use io::{Backend, Parser};
