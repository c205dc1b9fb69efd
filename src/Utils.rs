/// eng
/// Terminal logger setup for the binary; library code only uses the `log` macros.
pub mod logging;
