#[allow(non_snake_case)]
pub mod Backend;
#[allow(non_snake_case)]
pub mod Converters;
#[allow(non_snake_case)]
pub mod Molecule;
#[allow(non_snake_case)]
pub mod Recipes;
#[allow(non_snake_case)]
pub mod Utils;
pub mod cli;
pub mod settings;
