use super::ensemble::EnsembleKind;
use super::observables::ObservableKind;
use thiserror::Error;

/// Invariant violations detected while constructing data model values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("invalid {quantity} conversion factor {value}: must be positive and finite")]
    InvalidConversion { quantity: &'static str, value: f64 },

    #[error("the {0} unit name must not be empty")]
    EmptyUnitName(&'static str),

    #[error("invalid Boltzmann constant {0}: must be positive and finite")]
    InvalidBoltzmann(f64),

    #[error(
        "Boltzmann constant {kb} is inconsistent with the energy/temperature units \
         ({canonical} kJ/mol/K after conversion)"
    )]
    InconsistentBoltzmann { kb: f64, canonical: f64 },

    #[error("system must contain at least one atom")]
    EmptySystem,

    #[error("mass array has {got} entries but the system has {expected} atoms")]
    MassLength { expected: usize, got: usize },

    #[error("invalid mass {value} for atom {index}: must be positive and finite")]
    InvalidMass { index: usize, value: f64 },

    #[error("trajectory frame {frame} has {got} particles, expected {expected}")]
    FrameParticleCount {
        frame: usize,
        expected: usize,
        got: usize,
    },

    #[error("trajectory frame {frame} has {positions} positions but {velocities} velocities")]
    FrameVelocityCount {
        frame: usize,
        positions: usize,
        velocities: usize,
    },

    #[error("observable '{kind}' has {got} samples, expected {expected}")]
    ObservableLength {
        kind: ObservableKind,
        expected: usize,
        got: usize,
    },

    #[error("invalid timestep {0}: must be positive and finite")]
    InvalidTimestep(f64),

    #[error("{part} is required to build simulation data")]
    Incomplete { part: &'static str },

    #[error("{part} describes {got} atoms but the system has {expected}")]
    AtomCountMismatch {
        part: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("{ensemble} ensemble requires {constant} to be set")]
    MissingEnsembleConstant {
        ensemble: EnsembleKind,
        constant: &'static str,
    },

    #[error("{ensemble} ensemble does not define {constant}, but it is set")]
    UnexpectedEnsembleConstant {
        ensemble: EnsembleKind,
        constant: &'static str,
    },
}
