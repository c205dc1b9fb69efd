/// eng
/// Typed records of the backend JSON: compound search and details, safety data, periodic
/// table, pH / buffer / dilution / molar mass calculations, equation balancing, inventory
/// and formula costing, AI substitution analysis and recipe variations.
pub mod api_types;
/// eng
/// Blocking HTTP client for the chemistry backend. The transport is a trait (`HttpClient`)
/// so the client can be tested without network.
pub mod client;
mod backend_tests;
