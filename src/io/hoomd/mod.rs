//! HOOMD-blue backend.
//!
//! A HOOMD run is described by three files: the JSON metadata dump, the GSD
//! trajectory and the thermodynamic log. [`HoomdParser`] combines them into
//! one [`SimulationData`].
//!
//! HOOMD works in whatever self-consistent units the user picks; the parser
//! labels them as kJ/mol and nm, which leaves pressure as the only quantity
//! needing a conversion factor.

pub mod config;
pub mod metadata;

pub use config::HoomdConfig;
pub use metadata::{HoomdMetadata, Integrator};

use crate::io::capability::{self, Availability};
use crate::io::thermo::{self, LogTable};
use crate::io::{Backend, Frame, Parser, error::Error};
use crate::model::ensemble::EnsembleData;
use crate::model::observables::{ObservableData, ObservableKind};
use crate::model::simulation::SimulationData;
use crate::model::system::SystemData;
use crate::model::trajectory::TrajectoryData;
use crate::model::units::{Unit, UnitData};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Boltzmann constant in kJ/mol/K, as HOOMD users in these units expect it.
pub const KB: f64 = 8.314462435405199e-3;

/// Translational degrees of freedom HOOMD removes for the fixed center of mass.
const NDOF_REDUCTION_TRA: usize = 3;

const COL_KINETIC: &str = "kinetic_energy";
const COL_POTENTIAL: &str = "potential_energy";
const COL_VOLUME: &str = "volume";
const COL_PRESSURE: &str = "pressure";
const COL_TEMPERATURE: &str = "temperature";

static UNITS: OnceLock<UnitData> = OnceLock::new();

fn hoomd_units() -> &'static UnitData {
    UNITS.get_or_init(|| {
        UnitData::new(
            KB,
            Unit::new("kJ/mol", 1.0),
            Unit::new("nm", 1.0),
            Unit::new("nm^3", 1.0),
            Unit::new("K", 1.0),
            Unit::new("kJ/mol/nm^3", 16.605391),
            Unit::new("ps", 1.0),
        )
        .expect("HOOMD unit constants are invalid. This is a library bug.")
    })
}

/// The three output files of one HOOMD run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoomdFiles {
    /// JSON written by `hoomd.meta.dump_metadata`.
    pub metadata: PathBuf,
    /// GSD trajectory written by `hoomd.dump.gsd`.
    pub trajectory: PathBuf,
    /// Table written by `hoomd.analyze.log`.
    pub log: PathBuf,
}

impl HoomdFiles {
    pub fn new(
        metadata: impl Into<PathBuf>,
        trajectory: impl Into<PathBuf>,
        log: impl Into<PathBuf>,
    ) -> Self {
        Self {
            metadata: metadata.into(),
            trajectory: trajectory.into(),
            log: log.into(),
        }
    }
}

/// Parser for HOOMD-blue output.
///
/// # Examples
///
/// ```no_run
/// use physval::{HoomdFiles, HoomdParser, Parser};
///
/// let parser = HoomdParser::new();
/// let data = parser.get_simulation_data(&HoomdFiles::new("nvt.json", "nvt.gsd", "nvt.log"))?;
/// println!("{} atoms, dt = {}", data.system().natoms(), data.dt());
/// # Ok::<(), physval::io::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct HoomdParser {
    config: HoomdConfig,
    trajectory_support: Availability,
}

impl Default for HoomdParser {
    fn default() -> Self {
        Self::new()
    }
}

impl HoomdParser {
    pub fn new() -> Self {
        Self::with_config(HoomdConfig::default())
    }

    pub fn with_config(config: HoomdConfig) -> Self {
        Self {
            config,
            trajectory_support: capability::gsd_support(),
        }
    }

    /// Overrides the probed GSD support, e.g. to exercise the failure path.
    pub fn with_trajectory_support(mut self, availability: Availability) -> Self {
        self.trajectory_support = availability;
        self
    }

    pub fn config(&self) -> &HoomdConfig {
        &self.config
    }

    pub fn trajectory_support(&self) -> Availability {
        self.trajectory_support
    }

    fn read_frames(&self, path: &Path) -> Result<Vec<Frame>, Error> {
        if !self.trajectory_support.is_available() {
            return Err(gsd_missing());
        }
        read_gsd(path)
    }
}

impl Parser for HoomdParser {
    type Source = HoomdFiles;

    fn backend(&self) -> Backend {
        Backend::Hoomd
    }

    fn units(&self) -> UnitData {
        hoomd_units().clone()
    }

    fn get_simulation_data(&self, files: &HoomdFiles) -> Result<SimulationData, Error> {
        let frames = self.read_frames(&files.trajectory)?;

        let metadata = HoomdMetadata::from_reader(BufReader::new(File::open(&files.metadata)?))?;
        log::debug!(
            "metadata {}: dt = {}, integrator {}",
            files.metadata.display(),
            metadata.dt,
            metadata.integrator
        );

        let table = thermo::read(BufReader::new(File::open(&files.log)?))?;

        assemble(self.units(), frames, &metadata, &table, &self.config)
    }
}

#[cfg(feature = "gsd")]
fn read_gsd(path: &Path) -> Result<Vec<Frame>, Error> {
    crate::io::gsd::hoomd::read_trajectory(path)
}

#[cfg(not(feature = "gsd"))]
fn read_gsd(_path: &Path) -> Result<Vec<Frame>, Error> {
    Err(gsd_missing())
}

fn gsd_missing() -> Error {
    Error::CapabilityMissing {
        capability: "gsd",
        details: "GSD trajectory support is not available in this build.",
    }
}

/// Builds the simulation data from already decoded inputs.
fn assemble(
    units: UnitData,
    frames: Vec<Frame>,
    metadata: &HoomdMetadata,
    table: &LogTable,
    config: &HoomdConfig,
) -> Result<SimulationData, Error> {
    let kb = units.kb();

    let first = frames.first().ok_or(Error::EmptyTrajectory)?;
    // particle count and masses are taken from the first frame only
    let natoms = first.natoms();
    let mass = first.mass.clone();

    let mut trajectory = TrajectoryData::with_capacity(frames.len());
    for frame in frames {
        trajectory.push_frame(frame.position, frame.velocity)?;
    }

    let system = SystemData::new(natoms, mass)?
        .with_constraints(0)
        .with_ndof_reduction(NDOF_REDUCTION_TRA, 0);

    let kinetic = table.require(COL_KINETIC)?;
    let potential = table.require(COL_POTENTIAL)?;
    let volume = table.require(COL_VOLUME)?;
    let pressure = table.require(COL_PRESSURE)?;
    let temperature = table.require(COL_TEMPERATURE)?;

    let target_temperature = |kt: f64| {
        if config.target_temperature_scaled_by_kb {
            kt / kb
        } else {
            kt
        }
    };

    if !metadata.shadowed.is_empty() {
        log::warn!(
            "metadata lists several integrators; using {} and ignoring {}",
            metadata.integrator,
            metadata.shadowed.join(", ")
        );
    }

    let base = EnsembleData::new(metadata.integrator.ensemble()).with_natoms(natoms);
    let (ensemble, constant_of_motion) = match metadata.integrator {
        Integrator::NoseHoover { kt } => {
            let reservoir = table.require(&config.nvt_reservoir_column)?;
            (
                base.with_volume(volume[0])
                    .with_temperature(target_temperature(kt)),
                Some(elementwise_sum(&[kinetic, potential, reservoir])),
            )
        }
        Integrator::Berendsen { kt } | Integrator::Langevin { kt } => (
            base.with_volume(volume[0])
                .with_temperature(target_temperature(kt)),
            None,
        ),
        Integrator::Npt { kt, pressure } => {
            let thermostat = table.require(&config.npt_thermostat_column)?;
            let barostat = table.require(&config.npt_barostat_column)?;
            (
                base.with_pressure(pressure)
                    .with_temperature(target_temperature(kt)),
                Some(elementwise_sum(&[kinetic, potential, thermostat, barostat])),
            )
        }
        Integrator::Nve => (
            base.with_volume(volume[0]),
            Some(elementwise_sum(&[kinetic, potential])),
        ),
    };

    log::info!(
        "classified simulation as {} ({}): {} atoms, {} frames, {} samples",
        ensemble.kind(),
        metadata.integrator,
        natoms,
        trajectory.nframes(),
        table.nrows()
    );

    let temperature = if config.log_temperature_scaled_by_kb {
        temperature.iter().map(|t| t / kb).collect()
    } else {
        temperature.to_vec()
    };

    let mut observables = ObservableData::new();
    observables.insert(ObservableKind::KineticEnergy, kinetic.to_vec())?;
    observables.insert(ObservableKind::PotentialEnergy, potential.to_vec())?;
    observables.insert(
        ObservableKind::TotalEnergy,
        elementwise_sum(&[kinetic, potential]),
    )?;
    if let Some(conserved) = constant_of_motion {
        observables.insert(ObservableKind::ConstantOfMotion, conserved)?;
    }
    observables.insert(ObservableKind::Volume, volume.to_vec())?;
    observables.insert(ObservableKind::Pressure, pressure.to_vec())?;
    observables.insert(ObservableKind::Temperature, temperature)?;

    let data = SimulationData::builder(units)
        .trajectory(trajectory)
        .dt(metadata.dt)
        .system(system)
        .ensemble(ensemble)
        .observables(observables)
        .build()?;

    Ok(data)
}

fn elementwise_sum(columns: &[&[f64]]) -> Vec<f64> {
    let len = columns.first().map_or(0, |c| c.len());
    (0..len)
        .map(|i| columns.iter().map(|c| c[i]).sum())
        .collect()
}
