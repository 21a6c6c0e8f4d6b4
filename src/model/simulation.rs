use super::ensemble::EnsembleData;
use super::error::ModelError;
use super::observables::ObservableData;
use super::system::SystemData;
use super::trajectory::TrajectoryData;
use super::units::UnitData;

/// Everything a validator needs to know about one simulation.
///
/// A `SimulationData` is only obtainable through
/// [`SimulationDataBuilder::build`], which checks that the parts agree with
/// each other. Once built it is a read-only snapshot that exclusively owns
/// all of its parts.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationData {
    units: UnitData,
    system: SystemData,
    ensemble: Option<EnsembleData>,
    observables: ObservableData,
    trajectory: TrajectoryData,
    dt: f64,
}

impl SimulationData {
    pub fn builder(units: UnitData) -> SimulationDataBuilder {
        SimulationDataBuilder::new(units)
    }

    #[inline]
    pub fn units(&self) -> &UnitData {
        &self.units
    }

    #[inline]
    pub fn system(&self) -> &SystemData {
        &self.system
    }

    #[inline]
    pub fn ensemble(&self) -> Option<&EnsembleData> {
        self.ensemble.as_ref()
    }

    #[inline]
    pub fn observables(&self) -> &ObservableData {
        &self.observables
    }

    #[inline]
    pub fn trajectory(&self) -> &TrajectoryData {
        &self.trajectory
    }

    /// Integration timestep, in the time unit of [`SimulationData::units`].
    #[inline]
    pub fn dt(&self) -> f64 {
        self.dt
    }
}

/// Staged construction of a [`SimulationData`].
///
/// Parsers fill the parts in the order units, trajectory, timestep, system,
/// ensemble, observables, then call [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct SimulationDataBuilder {
    units: UnitData,
    trajectory: Option<TrajectoryData>,
    dt: Option<f64>,
    system: Option<SystemData>,
    ensemble: Option<EnsembleData>,
    observables: ObservableData,
}

impl SimulationDataBuilder {
    pub fn new(units: UnitData) -> Self {
        Self {
            units,
            trajectory: None,
            dt: None,
            system: None,
            ensemble: None,
            observables: ObservableData::new(),
        }
    }

    pub fn trajectory(mut self, trajectory: TrajectoryData) -> Self {
        self.trajectory = Some(trajectory);
        self
    }

    pub fn dt(mut self, dt: f64) -> Self {
        self.dt = Some(dt);
        self
    }

    pub fn system(mut self, system: SystemData) -> Self {
        self.system = Some(system);
        self
    }

    pub fn ensemble(mut self, ensemble: EnsembleData) -> Self {
        self.ensemble = Some(ensemble);
        self
    }

    pub fn observables(mut self, observables: ObservableData) -> Self {
        self.observables = observables;
        self
    }

    pub fn build(self) -> Result<SimulationData, ModelError> {
        let trajectory = self
            .trajectory
            .ok_or(ModelError::Incomplete { part: "trajectory" })?;
        let dt = self.dt.ok_or(ModelError::Incomplete { part: "timestep" })?;
        let system = self.system.ok_or(ModelError::Incomplete { part: "system" })?;

        if !(dt.is_finite() && dt > 0.0) {
            return Err(ModelError::InvalidTimestep(dt));
        }

        if let Some(got) = trajectory.natoms() {
            if got != system.natoms() {
                return Err(ModelError::AtomCountMismatch {
                    part: "trajectory",
                    expected: system.natoms(),
                    got,
                });
            }
        }

        if let Some(got) = self.ensemble.as_ref().and_then(EnsembleData::natoms) {
            if got != system.natoms() {
                return Err(ModelError::AtomCountMismatch {
                    part: "ensemble",
                    expected: system.natoms(),
                    got,
                });
            }
        }

        Ok(SimulationData {
            units: self.units,
            system,
            ensemble: self.ensemble,
            observables: self.observables,
            trajectory,
            dt,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ensemble::EnsembleKind;
    use crate::model::units::{KB_CANONICAL, Unit};

    fn units() -> UnitData {
        UnitData::new(
            KB_CANONICAL,
            Unit::new("kJ/mol", 1.0),
            Unit::new("nm", 1.0),
            Unit::new("nm^3", 1.0),
            Unit::new("K", 1.0),
            Unit::new("bar", 1.0),
            Unit::new("ps", 1.0),
        )
        .unwrap()
    }

    fn trajectory(natoms: usize) -> TrajectoryData {
        let mut traj = TrajectoryData::new();
        traj.push_frame(vec![[0.0; 3]; natoms], vec![[0.0; 3]; natoms])
            .unwrap();
        traj
    }

    #[test]
    fn builds_complete_snapshot() {
        let data = SimulationData::builder(units())
            .trajectory(trajectory(2))
            .dt(0.002)
            .system(SystemData::new(2, vec![1.0, 1.0]).unwrap())
            .ensemble(EnsembleData::new(EnsembleKind::Nve).with_natoms(2).with_volume(1.0))
            .build()
            .unwrap();

        assert_eq!(data.dt(), 0.002);
        assert_eq!(data.system().natoms(), 2);
        assert_eq!(data.ensemble().unwrap().kind(), EnsembleKind::Nve);
        assert!(data.observables().is_empty());
    }

    #[test]
    fn missing_parts_are_reported() {
        let err = SimulationData::builder(units())
            .dt(0.002)
            .system(SystemData::new(1, vec![1.0]).unwrap())
            .build()
            .unwrap_err();
        assert_eq!(err, ModelError::Incomplete { part: "trajectory" });

        let err = SimulationData::builder(units())
            .trajectory(trajectory(1))
            .system(SystemData::new(1, vec![1.0]).unwrap())
            .build()
            .unwrap_err();
        assert_eq!(err, ModelError::Incomplete { part: "timestep" });
    }

    #[test]
    fn rejects_non_positive_timestep() {
        let err = SimulationData::builder(units())
            .trajectory(trajectory(1))
            .dt(0.0)
            .system(SystemData::new(1, vec![1.0]).unwrap())
            .build()
            .unwrap_err();
        assert_eq!(err, ModelError::InvalidTimestep(0.0));
    }

    #[test]
    fn trajectory_must_match_system() {
        let err = SimulationData::builder(units())
            .trajectory(trajectory(3))
            .dt(0.001)
            .system(SystemData::new(2, vec![1.0, 1.0]).unwrap())
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ModelError::AtomCountMismatch {
                part: "trajectory",
                expected: 2,
                got: 3
            }
        );
    }

    #[test]
    fn ensemble_must_match_system() {
        let err = SimulationData::builder(units())
            .trajectory(trajectory(2))
            .dt(0.001)
            .system(SystemData::new(2, vec![1.0, 1.0]).unwrap())
            .ensemble(EnsembleData::new(EnsembleKind::Nvt).with_natoms(5))
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            ModelError::AtomCountMismatch { part: "ensemble", .. }
        ));
    }
}
