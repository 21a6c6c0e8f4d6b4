use crate::io::error::Error;
use serde::Deserialize;

/// Settings of the HOOMD backend.
///
/// HOOMD logs temperature multiplied by the Boltzmann constant and takes
/// its target `kT` in energy units, so both are divided by `kb` by default.
/// Reservoir column names depend on the group the integrator acts on.
///
/// ```
/// use physval::HoomdConfig;
///
/// let config = HoomdConfig::from_toml_str(r#"nvt_reservoir_column = "nvt_mtk_reservoir_energy_fluid""#)?;
/// assert_eq!(config.nvt_reservoir_column, "nvt_mtk_reservoir_energy_fluid");
/// assert!(config.log_temperature_scaled_by_kb);
/// # Ok::<(), physval::io::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HoomdConfig {
    /// Logged `temperature` column is `kb * T`.
    pub log_temperature_scaled_by_kb: bool,

    /// Integrator `kT` entries are `kb * T`.
    pub target_temperature_scaled_by_kb: bool,

    /// Thermostat reservoir energy of the Nosé–Hoover NVT integrator.
    pub nvt_reservoir_column: String,

    /// Thermostat reservoir energy of the NPT integrator.
    pub npt_thermostat_column: String,

    /// Barostat reservoir energy of the NPT integrator.
    pub npt_barostat_column: String,
}

impl Default for HoomdConfig {
    fn default() -> Self {
        Self {
            log_temperature_scaled_by_kb: true,
            target_temperature_scaled_by_kb: true,
            nvt_reservoir_column: "nvt_mtk_reservoir_energy_all".to_string(),
            npt_thermostat_column: "npt_thermostat_energy".to_string(),
            npt_barostat_column: "npt_barostat_energy".to_string(),
        }
    }
}

impl HoomdConfig {
    pub fn from_toml_str(toml: &str) -> Result<Self, Error> {
        Ok(toml::from_str(toml)?)
    }
}
