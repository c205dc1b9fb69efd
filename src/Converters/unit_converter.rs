//! # Common converter interface
//!
//! ## Main Data Structures and Logic
//! - `ConversionError`: non-numeric input or an unknown unit symbol
//! - `UnitConverter`: trait shared by the temperature, pressure and concentration converters
//! - `AnyConverter`: enum over the three converters, dispatched with `enum_dispatch`, so the
//!   quantity can be chosen at runtime (CLI menu, screen tabs)
//! - `parse_input()`: user text -> `f64`, the only place where invalid input is detected
//!
//! ## Usage
//! ```rust
//! use ChemLabKit::Converters::unit_converter::{AnyConverter, UnitConverter};
//! let conv = AnyConverter::from_quantity("temperature").unwrap();
//! assert_eq!(conv.convert_display("100", "C", "F"), "212.00");
//! assert_eq!(conv.convert_display("abc", "C", "F"), "Invalid input");
//! ```
use super::concentration::ConcentrationConverter;
use super::pressure::PressureConverter;
use super::temperature::TemperatureConverter;
use enum_dispatch::enum_dispatch;
use thiserror::Error;

/// what the screens show instead of a number when the input is not numeric
pub const INVALID_INPUT_DISPLAY: &str = "Invalid input";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    #[error("invalid input: {0:?}")]
    InvalidInput(String),
    #[error("unknown unit: {0}")]
    UnknownUnit(String),
    #[error("unknown quantity: {0}")]
    UnknownQuantity(String),
}

/// Parses a decimal string typed by the user. Empty, non-numeric and non-finite input
/// is rejected, so a valid zero is never confused with garbage.
pub fn parse_input(text: &str) -> Result<f64, ConversionError> {
    match text.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ConversionError::InvalidInput(text.to_string())),
    }
}

#[enum_dispatch]
pub trait UnitConverter {
    fn quantity_name(&self) -> &'static str;
    /// canonical symbols of all supported units, canonical unit first
    fn unit_symbols(&self) -> Vec<&'static str>;
    fn convert_value(&self, value: f64, from: &str, to: &str) -> Result<f64, ConversionError>;
    fn format_value(&self, value: f64) -> String;

    fn convert_text(&self, input: &str, from: &str, to: &str) -> Result<f64, ConversionError> {
        let value = parse_input(input)?;
        self.convert_value(value, from, to)
    }

    /// result string for display; non-numeric input becomes `INVALID_INPUT_DISPLAY`
    fn convert_display(&self, input: &str, from: &str, to: &str) -> String {
        match self.convert_text(input, from, to) {
            Ok(v) => self.format_value(v),
            Err(ConversionError::InvalidInput(_)) => INVALID_INPUT_DISPLAY.to_string(),
            Err(e) => e.to_string(),
        }
    }

    /// the value expressed in every supported unit
    fn convert_all(&self, value: f64, from: &str) -> Result<Vec<(&'static str, f64)>, ConversionError> {
        self.unit_symbols()
            .into_iter()
            .map(|unit| Ok((unit, self.convert_value(value, from, unit)?)))
            .collect()
    }
}

#[enum_dispatch(UnitConverter)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnyConverter {
    TemperatureConverter,
    PressureConverter,
    ConcentrationConverter,
}

impl AnyConverter {
    pub fn from_quantity(name: &str) -> Result<Self, ConversionError> {
        match name.trim().to_lowercase().as_str() {
            "temperature" | "t" | "temp" => Ok(TemperatureConverter.into()),
            "pressure" | "p" => Ok(PressureConverter.into()),
            "concentration" | "c" | "conc" => Ok(ConcentrationConverter.into()),
            other => Err(ConversionError::UnknownQuantity(other.to_string())),
        }
    }

    pub fn all() -> Vec<AnyConverter> {
        vec![
            TemperatureConverter.into(),
            PressureConverter.into(),
            ConcentrationConverter.into(),
        ]
    }
}
