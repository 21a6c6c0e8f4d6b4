use super::error::ModelError;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown ensemble label: '{0}'")]
pub struct ParseEnsembleError(String);

/// Thermodynamic ensemble sampled by a simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnsembleKind {
    Nve,
    Nvt,
    Npt,
    Nph,
    MuVt,
}

impl EnsembleKind {
    pub fn label(self) -> &'static str {
        match self {
            EnsembleKind::Nve => "NVE",
            EnsembleKind::Nvt => "NVT",
            EnsembleKind::Npt => "NPT",
            EnsembleKind::Nph => "NPH",
            EnsembleKind::MuVt => "muVT",
        }
    }
}

impl fmt::Display for EnsembleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EnsembleKind {
    type Err = ParseEnsembleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "NVE" | "nve" => Ok(EnsembleKind::Nve),
            "NVT" | "nvt" => Ok(EnsembleKind::Nvt),
            "NPT" | "npt" => Ok(EnsembleKind::Npt),
            "NPH" | "nph" => Ok(EnsembleKind::Nph),
            "muVT" | "MUVT" | "muvt" => Ok(EnsembleKind::MuVt),
            other => Err(ParseEnsembleError(other.to_string())),
        }
    }
}

/// Whether an ensemble fixes a given constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Required,
    Forbidden,
    Free,
}

/// Ensemble label plus the constants that define it.
///
/// Only the constants an ensemble actually fixes are expected to be set:
/// an NPT simulation carries pressure and temperature but no volume.
/// [`EnsembleData::check_defining_constants`] verifies this.
#[derive(Debug, Clone, PartialEq)]
pub struct EnsembleData {
    kind: EnsembleKind,
    natoms: Option<usize>,
    volume: Option<f64>,
    pressure: Option<f64>,
    temperature: Option<f64>,
}

impl EnsembleData {
    pub fn new(kind: EnsembleKind) -> Self {
        Self {
            kind,
            natoms: None,
            volume: None,
            pressure: None,
            temperature: None,
        }
    }

    pub fn with_natoms(mut self, natoms: usize) -> Self {
        self.natoms = Some(natoms);
        self
    }

    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = Some(volume);
        self
    }

    pub fn with_pressure(mut self, pressure: f64) -> Self {
        self.pressure = Some(pressure);
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    #[inline]
    pub fn kind(&self) -> EnsembleKind {
        self.kind
    }

    #[inline]
    pub fn natoms(&self) -> Option<usize> {
        self.natoms
    }

    #[inline]
    pub fn volume(&self) -> Option<f64> {
        self.volume
    }

    #[inline]
    pub fn pressure(&self) -> Option<f64> {
        self.pressure
    }

    #[inline]
    pub fn temperature(&self) -> Option<f64> {
        self.temperature
    }

    pub fn check_defining_constants(&self) -> Result<(), ModelError> {
        use Role::*;

        let (natoms, volume, pressure, temperature) = match self.kind {
            EnsembleKind::Nve => (Required, Required, Forbidden, Free),
            EnsembleKind::Nvt => (Required, Required, Forbidden, Required),
            EnsembleKind::Npt => (Required, Forbidden, Required, Required),
            EnsembleKind::Nph => (Required, Forbidden, Required, Free),
            EnsembleKind::MuVt => (Free, Required, Forbidden, Required),
        };

        self.check(natoms, "natoms", self.natoms.is_some())?;
        self.check(volume, "volume", self.volume.is_some())?;
        self.check(pressure, "pressure", self.pressure.is_some())?;
        self.check(temperature, "temperature", self.temperature.is_some())
    }

    fn check(&self, role: Role, constant: &'static str, present: bool) -> Result<(), ModelError> {
        match (role, present) {
            (Role::Required, false) => Err(ModelError::MissingEnsembleConstant {
                ensemble: self.kind,
                constant,
            }),
            (Role::Forbidden, true) => Err(ModelError::UnexpectedEnsembleConstant {
                ensemble: self.kind,
                constant,
            }),
            _ => Ok(()),
        }
    }
}
