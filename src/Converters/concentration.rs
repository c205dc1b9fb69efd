//! Molar concentration conversion through mol/L. Units differ by powers of 1000.
use super::formatting::format_concentration;
use super::unit_converter::{ConversionError, UnitConverter};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConcentrationUnit {
    Molar,
    Millimolar,
    Micromolar,
    Nanomolar,
}

impl ConcentrationUnit {
    pub const ALL: [ConcentrationUnit; 4] = [
        ConcentrationUnit::Molar,
        ConcentrationUnit::Millimolar,
        ConcentrationUnit::Micromolar,
        ConcentrationUnit::Nanomolar,
    ];

    /// mol/L per unit
    pub fn factor(&self) -> f64 {
        match self {
            ConcentrationUnit::Molar => 1.0,
            ConcentrationUnit::Millimolar => 1e-3,
            ConcentrationUnit::Micromolar => 1e-6,
            ConcentrationUnit::Nanomolar => 1e-9,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            ConcentrationUnit::Molar => "M",
            ConcentrationUnit::Millimolar => "mM",
            ConcentrationUnit::Micromolar => "μM",
            ConcentrationUnit::Nanomolar => "nM",
        }
    }
}

impl FromStr for ConcentrationUnit {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "M" | "mol/L" | "mol/l" | "molar" => Ok(ConcentrationUnit::Molar),
            "mM" | "mmol/L" | "mmol/l" | "millimolar" => Ok(ConcentrationUnit::Millimolar),
            "μM" | "µM" | "uM" | "umol/L" | "micromolar" => Ok(ConcentrationUnit::Micromolar),
            "nM" | "nmol/L" | "nanomolar" => Ok(ConcentrationUnit::Nanomolar),
            _ => Err(ConversionError::UnknownUnit(s.to_string())),
        }
    }
}

pub fn convert_concentration(value: f64, from: ConcentrationUnit, to: ConcentrationUnit) -> f64 {
    value * from.factor() / to.factor()
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ConcentrationConverter;

impl UnitConverter for ConcentrationConverter {
    fn quantity_name(&self) -> &'static str {
        "concentration"
    }

    fn unit_symbols(&self) -> Vec<&'static str> {
        ConcentrationUnit::ALL.iter().map(|u| u.symbol()).collect()
    }

    fn convert_value(&self, value: f64, from: &str, to: &str) -> Result<f64, ConversionError> {
        let from: ConcentrationUnit = from.parse()?;
        let to: ConcentrationUnit = to.parse()?;
        Ok(convert_concentration(value, from, to))
    }

    fn format_value(&self, value: f64) -> String {
        format_concentration(value)
    }
}
