//! # Recipe Text Parser
//!
//! ## Aim
//! Converts a block of freeform recipe text into a vector of `IngredientItem`.
//! The text comes either from the user or from an AI-generated formulation, one
//! ingredient per line:
//! ```text
//! EDTA 0.1%
//! Sodium chloride 5 g
//! Water up to 100%
//! ```
//!
//! ## Line format
//! `<name> [up to] <number> [unit]`, where the unit is one of `%`, `g`, `kg`, `ml`, `l`
//! (case-insensitive) and defaults to `%`. The whole line must match. Blank lines are
//! skipped silently, lines that do not match are skipped with a warning in the log.
//!
//! ## Usage
//! ```rust
//! use ChemLabKit::Recipes::recipe_parser::{parse_recipe_text, IngredientUnit};
//! let items = parse_recipe_text("EDTA 0.1%\nWater up to 100%");
//! assert_eq!(items.len(), 2);
//! assert_eq!(items[1].unit, IngredientUnit::Percent);
//! assert!(items[1].is_up_to);
//! ```
use log::{debug, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// name used when the captured name trims to nothing
pub const UNKNOWN_INGREDIENT: &str = "Unknown";

const INGREDIENT_LINE_PATTERN: &str =
    r"(?i)^(?P<name>.+?)\s+(?P<upto>up\s+to\s+)?(?P<amount>\d+(?:\.\d+)?)\s*(?P<unit>%|kg|g|ml|l)?$";

fn ingredient_line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(INGREDIENT_LINE_PATTERN).expect("ingredient pattern is valid"))
}

/// units accepted in a recipe line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum IngredientUnit {
    #[default]
    Percent,
    Gram,
    Kilogram,
    Milliliter,
    Liter,
}

impl IngredientUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            IngredientUnit::Percent => "%",
            IngredientUnit::Gram => "g",
            IngredientUnit::Kilogram => "kg",
            IngredientUnit::Milliliter => "ml",
            IngredientUnit::Liter => "l",
        }
    }

    /// parses a unit symbol as it appears in recipe text, ignoring case
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol.trim().to_lowercase().as_str() {
            "%" => Some(IngredientUnit::Percent),
            "g" => Some(IngredientUnit::Gram),
            "kg" => Some(IngredientUnit::Kilogram),
            "ml" => Some(IngredientUnit::Milliliter),
            "l" => Some(IngredientUnit::Liter),
            _ => None,
        }
    }

    pub fn is_mass(&self) -> bool {
        matches!(self, IngredientUnit::Gram | IngredientUnit::Kilogram)
    }

    pub fn is_volume(&self) -> bool {
        matches!(self, IngredientUnit::Milliliter | IngredientUnit::Liter)
    }
}

impl fmt::Display for IngredientUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// one parsed recipe line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientItem {
    pub name: String,
    pub amount: f64,
    pub unit: IngredientUnit,
    /// the amount is a maximum ("up to"), not an exact quantity
    pub is_up_to: bool,
}

impl IngredientItem {
    pub fn new(name: &str, amount: f64, unit: IngredientUnit, is_up_to: bool) -> Self {
        let name = name.trim();
        Self {
            name: if name.is_empty() {
                UNKNOWN_INGREDIENT.to_string()
            } else {
                name.to_string()
            },
            amount,
            unit,
            is_up_to,
        }
    }
}

impl fmt::Display for IngredientItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_up_to {
            write!(f, "{} up to {}{}", self.name, self.amount, self.unit)
        } else {
            write!(f, "{} {}{}", self.name, self.amount, self.unit)
        }
    }
}

/// Parses a single (already trimmed or not) line. Returns `None` for blank lines and
/// for lines that do not follow the `<name> [up to] <number>[unit]` format.
pub fn parse_ingredient_line(line: &str) -> Option<IngredientItem> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let Some(caps) = ingredient_line_regex().captures(line) else {
        warn!("recipe line skipped, no quantity found: {:?}", line);
        return None;
    };
    let name = caps.name("name").map_or("", |m| m.as_str());
    let amount = caps
        .name("amount")
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0);
    let unit = caps
        .name("unit")
        .and_then(|m| IngredientUnit::from_symbol(m.as_str()))
        .unwrap_or_default();
    let is_up_to = caps.name("upto").is_some();
    let item = IngredientItem::new(name, amount, unit, is_up_to);
    debug!("recipe line {:?} parsed into {:?}", line, item);
    Some(item)
}

/// Parses multi-line recipe text. Order of the returned items follows the order of lines.
pub fn parse_recipe_text(text: &str) -> Vec<IngredientItem> {
    text.lines().filter_map(parse_ingredient_line).collect()
}
