//! Typed view of the HOOMD metadata dump.
//!
//! The JSON document is keyed by fully qualified class names. Only the
//! timestep record and the integrator records matter here; everything else
//! is ignored. The document is validated once, in
//! [`HoomdMetadata::from_json_str`], so later stages never look up keys.

use crate::io::error::Error;
use crate::model::ensemble::EnsembleKind;
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::io::Read;

pub const KEY_MODE_STANDARD: &str = "hoomd.md.integrate.mode_standard";
pub const KEY_NVT: &str = "hoomd.md.integrate.nvt";
pub const KEY_BERENDSEN: &str = "hoomd.md.integrate.berendsen";
pub const KEY_LANGEVIN: &str = "hoomd.md.integrate.langevin";
pub const KEY_NPT: &str = "hoomd.md.integrate.npt";
pub const KEY_NVE: &str = "hoomd.md.integrate.nve";

/// A class entry is a single record or a list of records, one per instance.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    fn into_first(self, key: &str) -> Result<T, Error> {
        match self {
            OneOrMany::One(record) => Ok(record),
            OneOrMany::Many(records) => records
                .into_iter()
                .next()
                .ok_or_else(|| Error::missing_metadata(format!("{key}[0]"))),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ModeStandardRecord {
    dt: f64,
}

#[derive(Debug, Clone, Deserialize)]
struct ThermostatRecord {
    #[serde(rename = "kT")]
    kt: f64,
}

#[derive(Debug, Clone, Deserialize)]
struct NptRecord {
    #[serde(rename = "kT")]
    kt: f64,
    #[serde(rename = "S", default)]
    stress: Option<Vec<f64>>,
    #[serde(rename = "P", default)]
    pressure: Option<f64>,
}

/// Integrator keys count as present even when their value is `null`.
/// The outer `Option` records the key, the inner one its value.
type Entry<T> = Option<Option<OneOrMany<T>>>;

#[derive(Debug, Clone, Deserialize)]
struct RawMetadata {
    #[serde(rename = "hoomd.md.integrate.mode_standard", default)]
    mode_standard: Option<OneOrMany<ModeStandardRecord>>,
    #[serde(rename = "hoomd.md.integrate.nvt", default, deserialize_with = "present")]
    nvt: Entry<ThermostatRecord>,
    #[serde(rename = "hoomd.md.integrate.berendsen", default, deserialize_with = "present")]
    berendsen: Entry<ThermostatRecord>,
    #[serde(rename = "hoomd.md.integrate.langevin", default, deserialize_with = "present")]
    langevin: Entry<ThermostatRecord>,
    #[serde(rename = "hoomd.md.integrate.npt", default, deserialize_with = "present")]
    npt: Entry<NptRecord>,
    #[serde(rename = "hoomd.md.integrate.nve", default, deserialize_with = "present")]
    nve: Option<serde_json::Value>,
}

/// Only called for keys that exist, so any value, `null` included, is `Some`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

fn first_record<T>(entry: Option<OneOrMany<T>>, key: &str) -> Result<T, Error> {
    entry
        .ok_or_else(|| Error::missing_metadata(format!("{key}[0]")))?
        .into_first(key)
}

/// The integrator that determines the sampled ensemble.
///
/// `kt` values are as stored in the metadata, in energy units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Integrator {
    /// Nosé–Hoover thermostat; conserves energy plus reservoir energy.
    NoseHoover { kt: f64 },
    /// Weak-coupling thermostat, not conservative.
    Berendsen { kt: f64 },
    /// Stochastic thermostat, not conservative.
    Langevin { kt: f64 },
    /// Thermostat plus barostat.
    Npt { kt: f64, pressure: f64 },
    /// Plain velocity Verlet.
    Nve,
}

impl Integrator {
    pub fn key(&self) -> &'static str {
        match self {
            Integrator::NoseHoover { .. } => KEY_NVT,
            Integrator::Berendsen { .. } => KEY_BERENDSEN,
            Integrator::Langevin { .. } => KEY_LANGEVIN,
            Integrator::Npt { .. } => KEY_NPT,
            Integrator::Nve => KEY_NVE,
        }
    }

    pub fn ensemble(&self) -> EnsembleKind {
        match self {
            Integrator::NoseHoover { .. }
            | Integrator::Berendsen { .. }
            | Integrator::Langevin { .. } => EnsembleKind::Nvt,
            Integrator::Npt { .. } => EnsembleKind::Npt,
            Integrator::Nve => EnsembleKind::Nve,
        }
    }

    /// Target `kT`, if the integrator controls temperature.
    pub fn target_kt(&self) -> Option<f64> {
        match *self {
            Integrator::NoseHoover { kt }
            | Integrator::Berendsen { kt }
            | Integrator::Langevin { kt }
            | Integrator::Npt { kt, .. } => Some(kt),
            Integrator::Nve => None,
        }
    }
}

impl fmt::Display for Integrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HoomdMetadata {
    pub dt: f64,
    pub integrator: Integrator,
    /// Integrator keys present in the document but outranked by `integrator`.
    pub shadowed: Vec<&'static str>,
}

impl HoomdMetadata {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, Error> {
        let raw: RawMetadata = serde_json::from_reader(reader)?;
        Self::validate(raw)
    }

    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        let raw: RawMetadata = serde_json::from_str(json)?;
        Self::validate(raw)
    }

    fn validate(raw: RawMetadata) -> Result<Self, Error> {
        let dt = raw
            .mode_standard
            .ok_or_else(|| Error::missing_metadata(KEY_MODE_STANDARD))?
            .into_first(KEY_MODE_STANDARD)?
            .dt;

        let present: Vec<&'static str> = [
            (KEY_NVT, raw.nvt.is_some()),
            (KEY_BERENDSEN, raw.berendsen.is_some()),
            (KEY_LANGEVIN, raw.langevin.is_some()),
            (KEY_NPT, raw.npt.is_some()),
            (KEY_NVE, raw.nve.is_some()),
        ]
        .into_iter()
        .filter_map(|(key, found)| found.then_some(key))
        .collect();

        // thermostats first, then barostat, then plain NVE
        let integrator = if let Some(nvt) = raw.nvt {
            Integrator::NoseHoover {
                kt: first_record(nvt, KEY_NVT)?.kt,
            }
        } else if let Some(berendsen) = raw.berendsen {
            Integrator::Berendsen {
                kt: first_record(berendsen, KEY_BERENDSEN)?.kt,
            }
        } else if let Some(langevin) = raw.langevin {
            Integrator::Langevin {
                kt: first_record(langevin, KEY_LANGEVIN)?.kt,
            }
        } else if let Some(npt) = raw.npt {
            let record = first_record(npt, KEY_NPT)?;
            let pressure = record
                .stress
                .as_deref()
                .and_then(<[f64]>::first)
                .copied()
                .or(record.pressure)
                .ok_or_else(|| Error::missing_metadata(format!("{KEY_NPT}[0].S")))?;
            Integrator::Npt {
                kt: record.kt,
                pressure,
            }
        } else if raw.nve.is_some() {
            Integrator::Nve
        } else {
            return Err(Error::IntegratorNotFound);
        };

        let shadowed = present
            .into_iter()
            .filter(|key| *key != integrator.key())
            .collect();

        Ok(Self {
            dt,
            integrator,
            shadowed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_nve_metadata() {
        let meta = HoomdMetadata::from_json_str(
            r#"{
                "hoomd.md.integrate.mode_standard": {"dt": 0.001, "aniso": null},
                "hoomd.md.integrate.nve": [{"limit": null}],
                "hoomd.md.pair.lj": [{"r_cut": 2.5}]
            }"#,
        )
        .unwrap();
        assert_eq!(meta.dt, 0.001);
        assert_eq!(meta.integrator, Integrator::Nve);
        assert_eq!(meta.integrator.ensemble(), EnsembleKind::Nve);
        assert!(meta.shadowed.is_empty());
    }

    #[test]
    fn thermostats_outrank_other_integrators() {
        let meta = HoomdMetadata::from_json_str(
            r#"{
                "hoomd.md.integrate.mode_standard": {"dt": 0.005},
                "hoomd.md.integrate.langevin": [{"kT": 1.0, "seed": 4}],
                "hoomd.md.integrate.nvt": [{"kT": 1.03, "tau": 0.5}],
                "hoomd.md.integrate.nve": [{}]
            }"#,
        )
        .unwrap();
        assert_eq!(meta.integrator, Integrator::NoseHoover { kt: 1.03 });
        assert_eq!(meta.shadowed, vec![KEY_LANGEVIN, KEY_NVE]);
    }

    #[test]
    fn npt_pressure_is_first_stress_component() {
        let meta = HoomdMetadata::from_json_str(
            r#"{
                "hoomd.md.integrate.mode_standard": [{"dt": 0.002}],
                "hoomd.md.integrate.npt": [{"kT": 1.2, "S": [0.163, 0.163, 0.163, 0, 0, 0]}]
            }"#,
        )
        .unwrap();
        assert_eq!(
            meta.integrator,
            Integrator::Npt {
                kt: 1.2,
                pressure: 0.163
            }
        );
        assert_eq!(meta.integrator.target_kt(), Some(1.2));
    }

    #[test]
    fn npt_falls_back_to_scalar_pressure() {
        let meta = HoomdMetadata::from_json_str(
            r#"{
                "hoomd.md.integrate.mode_standard": {"dt": 0.002},
                "hoomd.md.integrate.npt": {"kT": 1.2, "P": 0.232}
            }"#,
        )
        .unwrap();
        assert!(matches!(meta.integrator, Integrator::Npt { pressure, .. } if pressure == 0.232));
    }

    #[test]
    fn missing_integrator_is_reported() {
        let err = HoomdMetadata::from_json_str(
            r#"{"hoomd.md.integrate.mode_standard": {"dt": 0.002}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::IntegratorNotFound));
        assert!(err.to_string().contains("Integrator not found."));
    }

    #[test]
    fn missing_timestep_is_reported() {
        let err = HoomdMetadata::from_json_str(r#"{"hoomd.md.integrate.nve": [{}]}"#)
            .unwrap_err();
        assert!(
            matches!(err, Error::MissingMetadata { ref key } if key == KEY_MODE_STANDARD)
        );
    }

    #[test]
    fn empty_record_list_is_reported() {
        let err = HoomdMetadata::from_json_str(
            r#"{
                "hoomd.md.integrate.mode_standard": {"dt": 0.002},
                "hoomd.md.integrate.berendsen": []
            }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("hoomd.md.integrate.berendsen[0]"));
    }

    #[test]
    fn malformed_json_is_a_metadata_error() {
        let err = HoomdMetadata::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, Error::Metadata(_)));
    }

    #[test]
    fn null_integrator_entries_still_count_as_present() {
        let meta = HoomdMetadata::from_json_str(
            r#"{
                "hoomd.md.integrate.mode_standard": {"dt": 0.001},
                "hoomd.md.integrate.nve": null
            }"#,
        )
        .unwrap();
        assert_eq!(meta.integrator, Integrator::Nve);

        let err = HoomdMetadata::from_json_str(
            r#"{
                "hoomd.md.integrate.mode_standard": {"dt": 0.001},
                "hoomd.md.integrate.nvt": null,
                "hoomd.md.integrate.nve": [{}]
            }"#,
        )
        .unwrap_err();
        assert!(
            matches!(err, Error::MissingMetadata { ref key } if key == "hoomd.md.integrate.nvt[0]")
        );
    }
}
