//! Pressure conversion through Pascal: `value × factor(from) / factor(to)`.
use super::formatting::format_pressure;
use super::unit_converter::{ConversionError, UnitConverter};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PressureUnit {
    Pascal,
    Kilopascal,
    Megapascal,
    Bar,
    Millibar,
    Atmosphere,
    Torr,
    Psi,
}

impl PressureUnit {
    pub const ALL: [PressureUnit; 8] = [
        PressureUnit::Pascal,
        PressureUnit::Kilopascal,
        PressureUnit::Megapascal,
        PressureUnit::Bar,
        PressureUnit::Millibar,
        PressureUnit::Atmosphere,
        PressureUnit::Torr,
        PressureUnit::Psi,
    ];

    /// Pa per unit
    pub fn factor(&self) -> f64 {
        match self {
            PressureUnit::Pascal => 1.0,
            PressureUnit::Kilopascal => 1e3,
            PressureUnit::Megapascal => 1e6,
            PressureUnit::Bar => 1e5,
            PressureUnit::Millibar => 100.0,
            PressureUnit::Atmosphere => 101325.0,
            PressureUnit::Torr => 133.322,
            PressureUnit::Psi => 6894.76,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            PressureUnit::Pascal => "Pa",
            PressureUnit::Kilopascal => "kPa",
            PressureUnit::Megapascal => "MPa",
            PressureUnit::Bar => "bar",
            PressureUnit::Millibar => "mbar",
            PressureUnit::Atmosphere => "atm",
            PressureUnit::Torr => "Torr",
            PressureUnit::Psi => "psi",
        }
    }
}

impl FromStr for PressureUnit {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // "MPa" and "mPa" differ only in case, so mega is matched before lowercasing
        if s.trim() == "MPa" {
            return Ok(PressureUnit::Megapascal);
        }
        match s.trim().to_lowercase().as_str() {
            "pa" | "pascal" => Ok(PressureUnit::Pascal),
            "kpa" | "kilopascal" => Ok(PressureUnit::Kilopascal),
            "megapascal" => Ok(PressureUnit::Megapascal),
            "bar" => Ok(PressureUnit::Bar),
            "mbar" | "millibar" => Ok(PressureUnit::Millibar),
            "atm" | "atmosphere" => Ok(PressureUnit::Atmosphere),
            "torr" | "mmhg" => Ok(PressureUnit::Torr),
            "psi" => Ok(PressureUnit::Psi),
            _ => Err(ConversionError::UnknownUnit(s.to_string())),
        }
    }
}

pub fn convert_pressure(value: f64, from: PressureUnit, to: PressureUnit) -> f64 {
    value * from.factor() / to.factor()
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PressureConverter;

impl UnitConverter for PressureConverter {
    fn quantity_name(&self) -> &'static str {
        "pressure"
    }

    fn unit_symbols(&self) -> Vec<&'static str> {
        PressureUnit::ALL.iter().map(|u| u.symbol()).collect()
    }

    fn convert_value(&self, value: f64, from: &str, to: &str) -> Result<f64, ConversionError> {
        let from: PressureUnit = from.parse()?;
        let to: PressureUnit = to.parse()?;
        Ok(convert_pressure(value, from, to))
    }

    fn format_value(&self, value: f64) -> String {
        format_pressure(value)
    }
}
