/// eng
/// Unit converters of the lab assistant. Every converter goes through one canonical unit:
/// Celsius for temperature, Pascal for pressure, mol/L for concentration.
/// `unit_converter` holds the common trait, the runtime dispatch over the three quantities
/// and validation of user input; `formatting` renders results the way the converter
/// screens show them.
pub mod unit_converter;
/// temperature: Celsius, Fahrenheit, Kelvin, Rankine, Reaumur
pub mod temperature;
/// pressure: Pa, kPa, MPa, bar, mbar, atm, Torr, psi
pub mod pressure;
/// concentration: M, mM, μM, nM
pub mod concentration;
pub mod formatting;
mod converters_tests;
