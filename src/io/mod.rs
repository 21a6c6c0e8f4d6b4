//! Parsers turning engine output files into [`SimulationData`].
//!
//! Each supported engine is a [`Backend`] with its own [`Parser`]
//! implementation. The parser decides which files it needs through its
//! [`Parser::Source`] type and always answers with either a fully built
//! [`SimulationData`] or an [`Error`].

use std::fmt;

use crate::model::simulation::SimulationData;
use crate::model::trajectory::Vec3;
use crate::model::units::UnitData;

pub mod capability;
pub mod error;
#[cfg(feature = "gsd")]
pub mod gsd;
pub mod hoomd;
pub mod thermo;

pub use error::Error;

/// Input formats understood by the readers in this module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Gsd,
    HoomdLog,
    HoomdMetadata,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Gsd => write!(f, "GSD"),
            Format::HoomdLog => write!(f, "HOOMD log"),
            Format::HoomdMetadata => write!(f, "HOOMD metadata"),
        }
    }
}

/// Simulation engines with a parser implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    Hoomd,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Hoomd => write!(f, "HOOMD-blue"),
        }
    }
}

/// Conversion of one engine's output into [`SimulationData`].
pub trait Parser {
    /// Backend-specific description of the files to read.
    type Source;

    fn backend(&self) -> Backend;

    /// Unit system the backend's raw values are expressed in.
    fn units(&self) -> UnitData;

    fn get_simulation_data(&self, source: &Self::Source) -> Result<SimulationData, Error>;
}

/// One decoded trajectory frame, independent of the container format.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub step: u64,
    pub position: Vec<Vec3>,
    pub velocity: Vec<Vec3>,
    pub mass: Vec<f64>,
}

impl Frame {
    #[inline]
    pub fn natoms(&self) -> usize {
        self.position.len()
    }
}
