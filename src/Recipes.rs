/// eng
/// The module turns freeform recipe text (one ingredient per line, e.g. "EDTA 0.1%" or
/// "Water up to 100%") into structured ingredient records. Lines that do not look like
/// "<name> [up to] <number>[unit]" are skipped and logged, never treated as an error.
pub mod recipe_parser;
/// eng
/// Recipe-mixing workspace: percent bookkeeping over parsed ingredients, balancing of
/// "up to" ingredients, batch weights for a given batch size and ingredient substitution.
pub mod recipe_workspace;
