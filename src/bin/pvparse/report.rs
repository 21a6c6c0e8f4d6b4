//! Condensed, serializable view of a parsed simulation.

use serde::Serialize;

use physval::{Backend, Quantity, SimulationData};

#[derive(Debug, Serialize)]
pub struct Summary {
    pub backend: String,
    pub dt: f64,
    pub ensemble: Option<EnsembleSummary>,
    pub system: SystemSummary,
    pub kb: f64,
    pub units: Vec<UnitSummary>,
    pub samples: usize,
    pub observables: Vec<ObservableStats>,
}

#[derive(Debug, Serialize)]
pub struct EnsembleSummary {
    pub kind: String,
    pub natoms: Option<usize>,
    pub volume: Option<f64>,
    pub pressure: Option<f64>,
    pub temperature: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct SystemSummary {
    pub natoms: usize,
    pub frames: usize,
    pub total_mass: f64,
    pub nconstraints: usize,
    pub ndof: usize,
}

#[derive(Debug, Serialize)]
pub struct UnitSummary {
    pub quantity: &'static str,
    pub name: String,
    pub conversion: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObservableStats {
    pub name: &'static str,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

impl Summary {
    pub fn new(backend: Backend, data: &SimulationData) -> Self {
        let ensemble = data.ensemble().map(|e| EnsembleSummary {
            kind: e.kind().to_string(),
            natoms: e.natoms(),
            volume: e.volume(),
            pressure: e.pressure(),
            temperature: e.temperature(),
        });

        let system = data.system();
        let units = Quantity::ALL
            .iter()
            .map(|&q| {
                let unit = data.units().unit(q);
                UnitSummary {
                    quantity: q.name(),
                    name: unit.name.clone(),
                    conversion: unit.conversion,
                }
            })
            .collect();

        let observables = data
            .observables()
            .iter()
            .filter_map(|(kind, series)| ObservableStats::compute(kind.as_str(), series))
            .collect();

        Self {
            backend: backend.to_string(),
            dt: data.dt(),
            ensemble,
            system: SystemSummary {
                natoms: system.natoms(),
                frames: data.trajectory().nframes(),
                total_mass: system.total_mass(),
                nconstraints: system.nconstraints(),
                ndof: system.ndof(),
            },
            kb: data.units().kb(),
            units,
            samples: data.observables().nsamples().unwrap_or(0),
            observables,
        }
    }

    pub fn ensemble_label(&self) -> &str {
        self.ensemble.as_ref().map_or("no ensemble", |e| e.kind.as_str())
    }
}

impl ObservableStats {
    /// Population statistics; `None` for an empty series.
    pub fn compute(name: &'static str, series: &[f64]) -> Option<Self> {
        if series.is_empty() {
            return None;
        }
        let n = series.len() as f64;
        let mean = series.iter().sum::<f64>() / n;
        let var = series.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
        let (min, max) = series
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
                (lo.min(x), hi.max(x))
            });
        Some(Self {
            name,
            mean,
            std: var.sqrt(),
            min,
            max,
        })
    }
}
