//! # Recipe Workspace
//!
//! ## Aim
//! Book-keeping for the recipe-mixing screen: a named list of ingredients parsed from text,
//! the batch size, and everything that follows from them.
//!
//! ## Main Data Structures and Logic
//! - `RecipeWorkspace`: name, ingredients and batch size in kg
//! - `BatchLine`: quantity of one ingredient in a batch (kg for masses, l for volumes)
//! - `balance_up_to()`: an "up to" percent ingredient takes whatever is left of its cap after
//!   the exact percent ingredients, e.g. "Water up to 100%" next to "EDTA 0.1%" becomes 99.9%
//! - `batch_weights()`: percent of batch size, grams and millilitres normalised to kg and l
//! - `formula_input()`: the balanced recipe as inventory material ids and mass percentages,
//!   ready for cost and stock analysis
//!
//! ## Usage
//! ```rust
//! use ChemLabKit::Recipes::recipe_workspace::RecipeWorkspace;
//! let ws = RecipeWorkspace::from_text("Shampoo", "SLES 12%\nWater up to 100%", 1000.0);
//! let lines = ws.batch_lines();
//! assert_eq!(lines.len(), 2);
//! ```
use crate::Backend::api_types::{
    FormulaInput, FormulaItem, InventoryMaterial, SubstitutionRequest, find_material,
};
use crate::Recipes::recipe_parser::{
    IngredientItem, IngredientUnit, parse_ingredient_line, parse_recipe_text,
};
use log::{info, warn};
use prettytable::{Cell, Row, Table};
use serde::{Deserialize, Serialize};

/// default batch size used by the mixing screen, kg
pub const DEFAULT_BATCH_KG: f64 = 1000.0;

/// sum of exact (not "up to") percent amounts
pub fn total_percent(items: &[IngredientItem]) -> f64 {
    items
        .iter()
        .filter(|i| i.unit == IngredientUnit::Percent && !i.is_up_to)
        .map(|i| i.amount)
        .sum()
}

/// Replaces every "up to" percent ingredient with the amount actually left under its cap.
/// Caps are consumed in line order, so a second "up to" ingredient only gets what the
/// first one left. Mass and volume "up to" lines are returned untouched.
pub fn balance_up_to(items: &[IngredientItem]) -> Vec<IngredientItem> {
    let mut running_total = total_percent(items);
    items
        .iter()
        .map(|item| {
            if item.is_up_to && item.unit == IngredientUnit::Percent {
                let amount = (item.amount - running_total).max(0.0);
                running_total += amount;
                IngredientItem::new(&item.name, amount, IngredientUnit::Percent, false)
            } else {
                item.clone()
            }
        })
        .collect()
}

/// quantity of one ingredient in a batch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchLine {
    pub name: String,
    pub quantity: f64,
    /// "kg" or "l"
    pub unit: &'static str,
}

/// Quantities per ingredient for a batch of `batch_kg`. Percent amounts are taken from the
/// batch size, grams and millilitres are converted to kg and litres.
pub fn batch_weights(items: &[IngredientItem], batch_kg: f64) -> Vec<BatchLine> {
    items
        .iter()
        .map(|item| {
            let (quantity, unit) = match item.unit {
                IngredientUnit::Percent => (item.amount / 100.0 * batch_kg, "kg"),
                IngredientUnit::Gram => (item.amount / 1000.0, "kg"),
                IngredientUnit::Kilogram => (item.amount, "kg"),
                IngredientUnit::Milliliter => (item.amount / 1000.0, "l"),
                IngredientUnit::Liter => (item.amount, "l"),
            };
            BatchLine {
                name: item.name.clone(),
                quantity,
                unit,
            }
        })
        .collect()
}

/// mass total of batch lines, volumes are not included
pub fn total_mass_kg(lines: &[BatchLine]) -> f64 {
    lines.iter().filter(|l| l.unit == "kg").map(|l| l.quantity).sum()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeWorkspace {
    pub name: String,
    pub items: Vec<IngredientItem>,
    pub batch_size_kg: f64,
}

impl Default for RecipeWorkspace {
    fn default() -> Self {
        Self {
            name: String::new(),
            items: Vec::new(),
            batch_size_kg: DEFAULT_BATCH_KG,
        }
    }
}

impl RecipeWorkspace {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn from_text(name: &str, text: &str, batch_size_kg: f64) -> Self {
        let items = parse_recipe_text(text);
        info!("workspace '{}' created with {} ingredients", name, items.len());
        Self {
            name: name.to_string(),
            items,
            batch_size_kg,
        }
    }

    /// adds one recipe line, returns false if the line could not be parsed
    pub fn add_line(&mut self, line: &str) -> bool {
        match parse_ingredient_line(line) {
            Some(item) => {
                self.items.push(item);
                true
            }
            None => false,
        }
    }

    pub fn remove_ingredient(&mut self, index: usize) -> Option<IngredientItem> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    /// Substitutes the ingredient at `index` by `new_name`, keeping its amount and unit.
    /// Returns the replaced ingredient.
    pub fn replace_ingredient(&mut self, index: usize, new_name: &str) -> Option<IngredientItem> {
        let Some(slot) = self.items.get_mut(index) else {
            warn!("no ingredient at position {} to replace", index);
            return None;
        };
        let replacement = IngredientItem::new(new_name, slot.amount, slot.unit, slot.is_up_to);
        info!("ingredient '{}' replaced by '{}'", slot.name, replacement.name);
        Some(std::mem::replace(slot, replacement))
    }

    /// request body asking the backend whether `candidate` can replace ingredient `index`
    pub fn substitution_request(
        &self,
        index: usize,
        candidate: &str,
        language: &str,
    ) -> Option<SubstitutionRequest> {
        self.items.get(index).map(|item| SubstitutionRequest {
            original: item.name.clone(),
            candidate: candidate.trim().to_string(),
            language: language.to_string(),
        })
    }

    /// Maps the balanced recipe onto inventory materials by name. Masses are expressed as a
    /// percentage of the batch size. Fails on volume lines, which cannot be costed by weight,
    /// and on ingredients missing from `inventory`.
    pub fn formula_input(&self, inventory: &[InventoryMaterial]) -> Result<FormulaInput, String> {
        if self.batch_size_kg <= 0.0 {
            return Err("batch size must be positive".to_string());
        }
        let mut items = Vec::new();
        let mut unknown = Vec::new();
        for item in self.balanced_items() {
            let percentage = match item.unit {
                IngredientUnit::Percent => item.amount,
                IngredientUnit::Kilogram => item.amount / self.batch_size_kg * 100.0,
                IngredientUnit::Gram => item.amount / 1000.0 / self.batch_size_kg * 100.0,
                IngredientUnit::Milliliter | IngredientUnit::Liter => {
                    return Err(format!(
                        "'{}' is given by volume and cannot be costed",
                        item.name
                    ));
                }
            };
            match find_material(inventory, &item.name) {
                Some(material) => items.push(FormulaItem {
                    material_id: material.id,
                    percentage,
                }),
                None => unknown.push(item.name.clone()),
            }
        }
        if !unknown.is_empty() {
            warn!("not in inventory: {}", unknown.join(", "));
            return Err(format!("not in inventory: {}", unknown.join(", ")));
        }
        Ok(FormulaInput {
            name: self.name.clone(),
            items,
            total_batch_weight_kg: self.batch_size_kg,
        })
    }

    pub fn total_percent(&self) -> f64 {
        total_percent(&self.items)
    }

    pub fn balanced_items(&self) -> Vec<IngredientItem> {
        balance_up_to(&self.items)
    }

    pub fn batch_lines(&self) -> Vec<BatchLine> {
        batch_weights(&self.balanced_items(), self.batch_size_kg)
    }

    pub fn pretty_print(&self) {
        let mut table = Table::new();
        table.add_row(Row::new(vec![
            Cell::new("Ingredient"),
            Cell::new("Recipe"),
            Cell::new("Batch"),
        ]));
        let lines = self.batch_lines();
        for (item, line) in self.items.iter().zip(lines.iter()) {
            let recipe = if item.is_up_to {
                format!("up to {}{}", item.amount, item.unit)
            } else {
                format!("{}{}", item.amount, item.unit)
            };
            table.add_row(Row::new(vec![
                Cell::new(&item.name),
                Cell::new(&recipe),
                Cell::new(&format!("{:.3} {}", line.quantity, line.unit)),
            ]));
        }
        table.add_row(Row::new(vec![
            Cell::new("Total"),
            Cell::new(&format!("{:.2}% fixed", self.total_percent())),
            Cell::new(&format!("{:.3} kg", total_mass_kg(&lines))),
        ]));
        println!("Recipe: {} (batch {} kg)", self.name, self.batch_size_kg);
        table.printstd();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_balance_up_to() {
        let items = parse_recipe_text("EDTA 0.1%\nWater up to 100%");
        let balanced = balance_up_to(&items);
        assert_relative_eq!(balanced[0].amount, 0.1);
        assert_relative_eq!(balanced[1].amount, 99.9, epsilon = 1e-9);
        assert!(!balanced[1].is_up_to);
    }

    #[test]
    fn test_balance_two_caps_and_overflow() {
        let items = parse_recipe_text("A 60%\nB up to 80%\nC up to 100%");
        let balanced = balance_up_to(&items);
        assert_relative_eq!(balanced[1].amount, 20.0, epsilon = 1e-9);
        assert_relative_eq!(balanced[2].amount, 20.0, epsilon = 1e-9);

        let items = parse_recipe_text("A 70%\nB 40%\nWater up to 100%");
        let balanced = balance_up_to(&items);
        assert_relative_eq!(balanced[2].amount, 0.0);
    }

    #[test]
    fn test_batch_weights() {
        let items = parse_recipe_text("Surfactant 10%\nSalt 500 g\nPerfume 250 ml\nBase 2 kg");
        let lines = batch_weights(&items, 1000.0);
        assert_relative_eq!(lines[0].quantity, 100.0);
        assert_eq!(lines[0].unit, "kg");
        assert_relative_eq!(lines[1].quantity, 0.5);
        assert_relative_eq!(lines[2].quantity, 0.25);
        assert_eq!(lines[2].unit, "l");
        assert_relative_eq!(total_mass_kg(&lines), 102.5);
    }

    #[test]
    fn test_workspace_editing() {
        let mut ws = RecipeWorkspace::from_text("Cleaner", "SLES 12%\nWater up to 100%", 500.0);
        assert!(ws.add_line("Fragrance 0.5%"));
        assert!(!ws.add_line("no quantity here"));
        assert_eq!(ws.items.len(), 3);
        assert_relative_eq!(ws.total_percent(), 12.5);

        let old = ws.replace_ingredient(0, "SLS").unwrap();
        assert_eq!(old.name, "SLES");
        assert_eq!(ws.items[0].name, "SLS");
        assert_relative_eq!(ws.items[0].amount, 12.0);
        assert!(ws.replace_ingredient(10, "X").is_none());

        let lines = ws.batch_lines();
        assert_relative_eq!(lines[1].quantity, 0.875 * 500.0, epsilon = 1e-9);
        assert_relative_eq!(total_mass_kg(&lines), 500.0, epsilon = 1e-9);

        let removed = ws.remove_ingredient(2).unwrap();
        assert_eq!(removed.name, "Fragrance");
        assert!(ws.remove_ingredient(5).is_none());
    }

    fn material(id: u64, name: &str) -> InventoryMaterial {
        InventoryMaterial {
            id,
            name: name.to_string(),
            cas_number: None,
            price_per_kg: Some(2.0),
            inventory_level: Some(500.0),
            ghs_tags: None,
        }
    }

    #[test]
    fn test_formula_input() {
        let inventory = vec![material(1, "SLES"), material(2, "water"), material(3, "Salt")];
        let ws = RecipeWorkspace::from_text("Shampoo", "SLES 12%\nSalt 5 kg\nWater up to 100%", 500.0);
        let formula = ws.formula_input(&inventory).unwrap();
        assert_eq!(formula.name, "Shampoo");
        assert_relative_eq!(formula.total_batch_weight_kg, 500.0);
        let ids: Vec<u64> = formula.items.iter().map(|i| i.material_id).collect();
        assert_eq!(ids, vec![1, 3, 2]);
        assert_relative_eq!(formula.items[0].percentage, 12.0);
        assert_relative_eq!(formula.items[1].percentage, 1.0);
        assert_relative_eq!(formula.items[2].percentage, 88.0, epsilon = 1e-9);
    }

    #[test]
    fn test_formula_input_rejects_unknown_and_volumes() {
        let inventory = vec![material(1, "SLES")];
        let ws = RecipeWorkspace::from_text("Shampoo", "SLES 12%\nPerfume 0.5%", 100.0);
        let err = ws.formula_input(&inventory).unwrap_err();
        assert!(err.contains("Perfume"));

        let ws = RecipeWorkspace::from_text("Shampoo", "SLES 12%\nPerfume 250 ml", 100.0);
        assert!(ws.formula_input(&inventory).is_err());
    }

    #[test]
    fn test_substitution_request() {
        let ws = RecipeWorkspace::from_text("Cream", "Cetyl alcohol 3%", DEFAULT_BATCH_KG);
        let req = ws.substitution_request(0, " Stearyl alcohol ", "en").unwrap();
        assert_eq!(req.original, "Cetyl alcohol");
        assert_eq!(req.candidate, "Stearyl alcohol");
        assert!(ws.substitution_request(1, "X", "en").is_none());
    }
}
