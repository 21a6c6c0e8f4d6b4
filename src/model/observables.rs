use super::error::ModelError;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Index;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown observable name: '{0}'")]
pub struct ParseObservableError(String);

/// Named scalar observables recognized by the data model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ObservableKind {
    KineticEnergy,
    PotentialEnergy,
    TotalEnergy,
    ConstantOfMotion,
    Volume,
    Pressure,
    Temperature,
}

impl ObservableKind {
    pub const ALL: [ObservableKind; 7] = [
        ObservableKind::KineticEnergy,
        ObservableKind::PotentialEnergy,
        ObservableKind::TotalEnergy,
        ObservableKind::ConstantOfMotion,
        ObservableKind::Volume,
        ObservableKind::Pressure,
        ObservableKind::Temperature,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ObservableKind::KineticEnergy => "kinetic_energy",
            ObservableKind::PotentialEnergy => "potential_energy",
            ObservableKind::TotalEnergy => "total_energy",
            ObservableKind::ConstantOfMotion => "constant_of_motion",
            ObservableKind::Volume => "volume",
            ObservableKind::Pressure => "pressure",
            ObservableKind::Temperature => "temperature",
        }
    }
}

impl fmt::Display for ObservableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObservableKind {
    type Err = ParseObservableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObservableKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ParseObservableError(s.to_string()))
    }
}

/// Scalar time series keyed by [`ObservableKind`], all of one length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservableData {
    series: BTreeMap<ObservableKind, Vec<f64>>,
}

impl ObservableData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `values` under `kind`, replacing any previous series.
    ///
    /// Fails if the series length differs from the series already stored.
    pub fn insert(&mut self, kind: ObservableKind, values: Vec<f64>) -> Result<(), ModelError> {
        let expected = self
            .series
            .iter()
            .find(|(k, _)| **k != kind)
            .map(|(_, v)| v.len());

        if let Some(expected) = expected {
            if values.len() != expected {
                return Err(ModelError::ObservableLength {
                    kind,
                    expected,
                    got: values.len(),
                });
            }
        }

        self.series.insert(kind, values);
        Ok(())
    }

    pub fn get(&self, kind: ObservableKind) -> Option<&[f64]> {
        self.series.get(&kind).map(Vec::as_slice)
    }

    pub fn contains(&self, kind: ObservableKind) -> bool {
        self.series.contains_key(&kind)
    }

    /// Number of samples per series, `None` when nothing is stored.
    pub fn nsamples(&self) -> Option<usize> {
        self.series.values().next().map(Vec::len)
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn kinds(&self) -> impl Iterator<Item = ObservableKind> + '_ {
        self.series.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObservableKind, &[f64])> {
        self.series.iter().map(|(k, v)| (*k, v.as_slice()))
    }
}

impl Index<ObservableKind> for ObservableData {
    type Output = [f64];

    fn index(&self, kind: ObservableKind) -> &Self::Output {
        match self.get(kind) {
            Some(values) => values,
            None => panic!("observable '{kind}' is not present"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for kind in ObservableKind::ALL {
            assert_eq!(kind.as_str().parse::<ObservableKind>().unwrap(), kind);
        }
        assert!("enthalpy".parse::<ObservableKind>().is_err());
    }

    #[test]
    fn series_share_one_length() {
        let mut obs = ObservableData::new();
        obs.insert(ObservableKind::KineticEnergy, vec![1.0, 2.0])
            .unwrap();
        obs.insert(ObservableKind::PotentialEnergy, vec![3.0, 4.0])
            .unwrap();

        let err = obs
            .insert(ObservableKind::Volume, vec![1.0, 2.0, 3.0])
            .unwrap_err();
        assert_eq!(
            err,
            ModelError::ObservableLength {
                kind: ObservableKind::Volume,
                expected: 2,
                got: 3
            }
        );
        assert_eq!(obs.nsamples(), Some(2));
        assert_eq!(obs.len(), 2);
        assert!(!obs.contains(ObservableKind::Volume));
    }

    #[test]
    fn replacing_the_only_series_may_change_length() {
        let mut obs = ObservableData::new();
        obs.insert(ObservableKind::Pressure, vec![1.0]).unwrap();
        obs.insert(ObservableKind::Pressure, vec![1.0, 2.0]).unwrap();
        assert_eq!(&obs[ObservableKind::Pressure], &[1.0, 2.0]);
    }

    #[test]
    fn missing_series_is_none() {
        let obs = ObservableData::new();
        assert!(obs.get(ObservableKind::ConstantOfMotion).is_none());
        assert_eq!(obs.nsamples(), None);
        assert!(obs.is_empty());
    }
}
