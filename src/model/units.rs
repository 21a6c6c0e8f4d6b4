//! Unit conventions attached to parsed simulation data.
//!
//! Every backend works in its own unit system. A [`UnitData`] records that
//! system as a set of multiplicative factors to the canonical units
//! (kJ/mol, nm, nm³, K, bar, ps), so that values coming from different
//! backends are only ever compared after conversion.

use super::error::ModelError;
use std::fmt;

/// Boltzmann constant in canonical units (kJ/mol/K).
pub const KB_CANONICAL: f64 = 8.314462618e-3;

const KB_RELATIVE_TOLERANCE: f64 = 1e-3;

/// Physical quantities carrying a unit in [`UnitData`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantity {
    Energy,
    Length,
    Volume,
    Temperature,
    Pressure,
    Time,
}

impl Quantity {
    pub const ALL: [Quantity; 6] = [
        Quantity::Energy,
        Quantity::Length,
        Quantity::Volume,
        Quantity::Temperature,
        Quantity::Pressure,
        Quantity::Time,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Quantity::Energy => "energy",
            Quantity::Length => "length",
            Quantity::Volume => "volume",
            Quantity::Temperature => "temperature",
            Quantity::Pressure => "pressure",
            Quantity::Time => "time",
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Display name of a unit and its factor to the canonical unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    pub name: String,
    pub conversion: f64,
}

impl Unit {
    pub fn new(name: impl Into<String>, conversion: f64) -> Self {
        Self {
            name: name.into(),
            conversion,
        }
    }
}

/// Unit system of one parser backend.
///
/// Constructed through [`UnitData::new`], which rejects non-positive
/// factors, empty unit names, and a Boltzmann constant that does not match
/// the energy/temperature pair. There is no way to mutate a value after
/// construction.
///
/// # Examples
///
/// ```
/// use physval::{Quantity, Unit, UnitData};
///
/// let units = UnitData::new(
///     8.314462618e-3,
///     Unit::new("kJ/mol", 1.0),
///     Unit::new("nm", 1.0),
///     Unit::new("nm^3", 1.0),
///     Unit::new("K", 1.0),
///     Unit::new("kJ/mol/nm^3", 16.605391),
///     Unit::new("ps", 1.0),
/// )?;
///
/// assert_eq!(units.unit(Quantity::Pressure).name, "kJ/mol/nm^3");
/// assert!((units.to_canonical(Quantity::Pressure, 1.0) - 16.605391).abs() < 1e-12);
/// # Ok::<(), physval::ModelError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct UnitData {
    kb: f64,
    energy: Unit,
    length: Unit,
    volume: Unit,
    temperature: Unit,
    pressure: Unit,
    time: Unit,
}

impl UnitData {
    pub fn new(
        kb: f64,
        energy: Unit,
        length: Unit,
        volume: Unit,
        temperature: Unit,
        pressure: Unit,
        time: Unit,
    ) -> Result<Self, ModelError> {
        let units = Self {
            kb,
            energy,
            length,
            volume,
            temperature,
            pressure,
            time,
        };

        for quantity in Quantity::ALL {
            let unit = units.unit(quantity);
            if unit.name.trim().is_empty() {
                return Err(ModelError::EmptyUnitName(quantity.name()));
            }
            if !(unit.conversion.is_finite() && unit.conversion > 0.0) {
                return Err(ModelError::InvalidConversion {
                    quantity: quantity.name(),
                    value: unit.conversion,
                });
            }
        }

        if !(kb.is_finite() && kb > 0.0) {
            return Err(ModelError::InvalidBoltzmann(kb));
        }

        let canonical = units.kb_canonical();
        if ((canonical - KB_CANONICAL) / KB_CANONICAL).abs() > KB_RELATIVE_TOLERANCE {
            return Err(ModelError::InconsistentBoltzmann { kb, canonical });
        }

        Ok(units)
    }

    /// Boltzmann constant in this unit system.
    #[inline]
    pub fn kb(&self) -> f64 {
        self.kb
    }

    /// Boltzmann constant converted to kJ/mol/K.
    pub fn kb_canonical(&self) -> f64 {
        self.kb * self.energy.conversion / self.temperature.conversion
    }

    pub fn unit(&self, quantity: Quantity) -> &Unit {
        match quantity {
            Quantity::Energy => &self.energy,
            Quantity::Length => &self.length,
            Quantity::Volume => &self.volume,
            Quantity::Temperature => &self.temperature,
            Quantity::Pressure => &self.pressure,
            Quantity::Time => &self.time,
        }
    }

    #[inline]
    pub fn to_canonical(&self, quantity: Quantity, value: f64) -> f64 {
        value * self.unit(quantity).conversion
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canonical_units() -> [Unit; 6] {
        [
            Unit::new("kJ/mol", 1.0),
            Unit::new("nm", 1.0),
            Unit::new("nm^3", 1.0),
            Unit::new("K", 1.0),
            Unit::new("bar", 1.0),
            Unit::new("ps", 1.0),
        ]
    }

    fn build(kb: f64, units: [Unit; 6]) -> Result<UnitData, ModelError> {
        let [energy, length, volume, temperature, pressure, time] = units;
        UnitData::new(kb, energy, length, volume, temperature, pressure, time)
    }

    #[test]
    fn accepts_consistent_units() {
        let units = build(KB_CANONICAL, canonical_units()).unwrap();
        assert_eq!(units.kb(), KB_CANONICAL);
        assert_eq!(units.unit(Quantity::Time).name, "ps");
        assert_eq!(units.to_canonical(Quantity::Energy, 3.5), 3.5);
    }

    #[test]
    fn kcal_units_need_matching_kb() {
        let mut units = canonical_units();
        units[0] = Unit::new("kcal/mol", 4.184);

        let err = build(KB_CANONICAL, units.clone()).unwrap_err();
        assert!(matches!(err, ModelError::InconsistentBoltzmann { .. }));

        let kb_kcal = KB_CANONICAL / 4.184;
        let ok = build(kb_kcal, units).unwrap();
        assert!((ok.kb_canonical() - KB_CANONICAL).abs() < 1e-12);
    }

    #[test]
    fn rejects_non_positive_conversion() {
        let mut units = canonical_units();
        units[4] = Unit::new("bar", 0.0);
        assert_eq!(
            build(KB_CANONICAL, units).unwrap_err(),
            ModelError::InvalidConversion {
                quantity: "pressure",
                value: 0.0
            }
        );
    }

    #[test]
    fn rejects_nan_conversion_and_empty_name() {
        let mut units = canonical_units();
        units[1] = Unit::new("nm", f64::NAN);
        assert!(matches!(
            build(KB_CANONICAL, units).unwrap_err(),
            ModelError::InvalidConversion { quantity: "length", .. }
        ));

        let mut units = canonical_units();
        units[5] = Unit::new("  ", 1.0);
        assert_eq!(
            build(KB_CANONICAL, units).unwrap_err(),
            ModelError::EmptyUnitName("time")
        );
    }

    #[test]
    fn rejects_negative_kb() {
        assert_eq!(
            build(-1.0, canonical_units()).unwrap_err(),
            ModelError::InvalidBoltzmann(-1.0)
        );
    }
}
