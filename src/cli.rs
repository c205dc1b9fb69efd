pub mod cli_backend;
pub mod cli_converters;
pub mod cli_main;
pub mod cli_molecule;
pub mod cli_recipes;
