use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use physval::HoomdConfig;

pub fn load_hoomd_config(path: Option<&Path>) -> Result<HoomdConfig> {
    let Some(path) = path else {
        return Ok(HoomdConfig::default());
    };

    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config = HoomdConfig::from_toml_str(&text)
        .with_context(|| format!("Invalid config file {}", path.display()))?;

    log::debug!("loaded parser settings from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_path_gives_defaults() {
        assert_eq!(load_hoomd_config(None).unwrap(), HoomdConfig::default());
    }

    #[test]
    fn reads_file_and_reports_bad_keys() {
        let mut good = tempfile::NamedTempFile::new().unwrap();
        writeln!(good, "target_temperature_scaled_by_kb = false").unwrap();
        let config = load_hoomd_config(Some(good.path())).unwrap();
        assert!(!config.target_temperature_scaled_by_kb);

        let mut bad = tempfile::NamedTempFile::new().unwrap();
        writeln!(bad, "unknown = 1").unwrap();
        let err = load_hoomd_config(Some(bad.path())).unwrap_err();
        assert!(err.to_string().starts_with("Invalid config file"));
    }
}
