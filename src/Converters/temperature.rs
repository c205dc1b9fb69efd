//! Temperature conversion through Celsius.
//!
//! | unit      | to Celsius          | from Celsius        |
//! |-----------|---------------------|---------------------|
//! | Fahrenheit| (F − 32) × 5/9      | C × 9/5 + 32        |
//! | Kelvin    | K − 273.15          | C + 273.15          |
//! | Rankine   | (R − 491.67) × 5/9  | (C + 273.15) × 9/5  |
//! | Reaumur   | Ré × 5/4            | C × 4/5             |
use super::formatting::format_temperature;
use super::unit_converter::{ConversionError, UnitConverter};
use std::str::FromStr;

const ZERO_CELSIUS_IN_KELVIN: f64 = 273.15;
const ZERO_CELSIUS_IN_RANKINE: f64 = 491.67;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
    Kelvin,
    Rankine,
    Reaumur,
}

impl TemperatureUnit {
    pub const ALL: [TemperatureUnit; 5] = [
        TemperatureUnit::Celsius,
        TemperatureUnit::Fahrenheit,
        TemperatureUnit::Kelvin,
        TemperatureUnit::Rankine,
        TemperatureUnit::Reaumur,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
            TemperatureUnit::Kelvin => "K",
            TemperatureUnit::Rankine => "°R",
            TemperatureUnit::Reaumur => "°Ré",
        }
    }

    pub fn to_celsius(&self, value: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => value,
            TemperatureUnit::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
            TemperatureUnit::Kelvin => value - ZERO_CELSIUS_IN_KELVIN,
            TemperatureUnit::Rankine => (value - ZERO_CELSIUS_IN_RANKINE) * 5.0 / 9.0,
            TemperatureUnit::Reaumur => value * 5.0 / 4.0,
        }
    }

    pub fn from_celsius(&self, celsius: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => celsius,
            TemperatureUnit::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
            TemperatureUnit::Kelvin => celsius + ZERO_CELSIUS_IN_KELVIN,
            TemperatureUnit::Rankine => (celsius + ZERO_CELSIUS_IN_KELVIN) * 9.0 / 5.0,
            TemperatureUnit::Reaumur => celsius * 4.0 / 5.0,
        }
    }
}

impl FromStr for TemperatureUnit {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unit = s.trim().trim_start_matches('°').to_lowercase();
        match unit.as_str() {
            "c" | "celsius" => Ok(TemperatureUnit::Celsius),
            "f" | "fahrenheit" => Ok(TemperatureUnit::Fahrenheit),
            "k" | "kelvin" => Ok(TemperatureUnit::Kelvin),
            "r" | "ra" | "rankine" => Ok(TemperatureUnit::Rankine),
            "ré" | "re" | "réaumur" | "reaumur" => Ok(TemperatureUnit::Reaumur),
            _ => Err(ConversionError::UnknownUnit(s.to_string())),
        }
    }
}

pub fn convert_temperature(value: f64, from: TemperatureUnit, to: TemperatureUnit) -> f64 {
    to.from_celsius(from.to_celsius(value))
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TemperatureConverter;

impl UnitConverter for TemperatureConverter {
    fn quantity_name(&self) -> &'static str {
        "temperature"
    }

    fn unit_symbols(&self) -> Vec<&'static str> {
        TemperatureUnit::ALL.iter().map(|u| u.symbol()).collect()
    }

    fn convert_value(&self, value: f64, from: &str, to: &str) -> Result<f64, ConversionError> {
        let from: TemperatureUnit = from.parse()?;
        let to: TemperatureUnit = to.parse()?;
        Ok(convert_temperature(value, from, to))
    }

    fn format_value(&self, value: f64) -> String {
        format_temperature(value)
    }
}
