//! # Backend request and response records
//!
//! Typed mirror of the JSON exchanged with the chemistry backend. Core fields are typed,
//! the long tail of PubChem properties stays in a `serde_json::Value` map so that new fields
//! on the server side never break decoding.
use prettytable::{Cell, Row, Table};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// PubChem sends some numbers (molecular weight) as strings, older records as numbers
fn number_or_string<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

////////////////////////////////////COMPOUNDS////////////////////////////////////////////////

/// what `query` is: a name, a formula, a SMILES string or a CAS number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    #[default]
    Name,
    Formula,
    Smiles,
    Cas,
}

impl SearchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchType::Name => "name",
            SearchType::Formula => "formula",
            SearchType::Smiles => "smiles",
            SearchType::Cas => "cas",
        }
    }

    /// Guesses the search type the way a user types: "7732-18-5" is a CAS number,
    /// anything with digits is a formula, the rest is a name.
    pub fn guess(query: &str) -> Self {
        let q = query.trim();
        if !q.is_empty() && q.chars().all(|c| c.is_ascii_digit() || c == '-') && q.contains('-') {
            SearchType::Cas
        } else if q.chars().any(|c| c.is_ascii_digit()) {
            SearchType::Formula
        } else {
            SearchType::Name
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundSearchRequest {
    pub query: String,
    pub search_type: SearchType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundSummary {
    pub cid: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub molecular_formula: Option<String>,
    #[serde(default, deserialize_with = "number_or_string")]
    pub molecular_weight: Option<f64>,
    #[serde(default)]
    pub canonical_smiles: Option<String>,
    #[serde(default)]
    pub isomeric_smiles: Option<String>,
    #[serde(default)]
    pub inchi: Option<String>,
    #[serde(default)]
    pub inchikey: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CompoundSearchResponse {
    #[serde(default)]
    pub results: Vec<CompoundSummary>,
    #[serde(default)]
    pub count: usize,
}

impl CompoundSearchResponse {
    pub fn pretty_print(&self) {
        let mut table = Table::new();
        table.add_row(Row::new(vec![
            Cell::new("CID"),
            Cell::new("Name"),
            Cell::new("Formula"),
            Cell::new("MW, g/mol"),
            Cell::new("SMILES"),
        ]));
        for c in &self.results {
            table.add_row(Row::new(vec![
                Cell::new(&c.cid.to_string()),
                Cell::new(c.name.as_deref().unwrap_or("-")),
                Cell::new(c.molecular_formula.as_deref().unwrap_or("-")),
                Cell::new(
                    &c.molecular_weight
                        .map(|w| format!("{:.3}", w))
                        .unwrap_or_else(|| "-".to_string()),
                ),
                Cell::new(c.canonical_smiles.as_deref().unwrap_or("-")),
            ]));
        }
        table.printstd();
        println!("{} compound(s) found", self.count);
    }
}

/// Full compound record. Only the fields every screen needs are typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundInfo {
    pub cid: u64,
    #[serde(default, alias = "name")]
    pub iupac_name: Option<String>,
    #[serde(default)]
    pub molecular_formula: Option<String>,
    #[serde(default, deserialize_with = "number_or_string")]
    pub molecular_weight: Option<f64>,
    #[serde(default)]
    pub canonical_smiles: Option<String>,
    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

impl CompoundInfo {
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}

/// GHS hazard data as returned by `/compounds/{cid}/safety`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct SafetyInfo(pub Value);

impl SafetyInfo {
    /// string entries of a list field such as `hazard_statements` or `ghs_pictograms`
    pub fn strings(&self, key: &str) -> Vec<String> {
        self.0
            .get(key)
            .and_then(Value::as_array)
            .map(|list| {
                list.iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarCompound {
    pub cid: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub molecular_formula: Option<String>,
    #[serde(default, deserialize_with = "number_or_string")]
    pub molecular_weight: Option<f64>,
    /// 0 to 100
    #[serde(default)]
    pub similarity_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarCompoundsResponse {
    pub cid: u64,
    #[serde(default)]
    pub similar_compounds: Vec<SimilarCompound>,
    #[serde(default)]
    pub count: usize,
}

////////////////////////////////////STRUCTURE & PERIODIC TABLE////////////////////////////////

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureRequest {
    pub smiles: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementSummary {
    pub atomic_number: u32,
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub atomic_mass: Option<f64>,
    #[serde(default)]
    pub group: Option<u32>,
    #[serde(default)]
    pub period: Option<u32>,
    #[serde(default)]
    pub block: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PeriodicTableResponse {
    #[serde(default)]
    pub elements: Vec<ElementSummary>,
    #[serde(default)]
    pub count: usize,
}

impl PeriodicTableResponse {
    pub fn find(&self, symbol: &str) -> Option<&ElementSummary> {
        self.elements
            .iter()
            .find(|e| e.symbol.eq_ignore_ascii_case(symbol))
    }
}

////////////////////////////////////CALCULATIONS//////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SubstanceType {
    #[default]
    StrongAcid,
    StrongBase,
    WeakAcid,
    WeakBase,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhRequest {
    pub concentration: f64,
    pub substance_type: SubstanceType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pka: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhResult {
    pub ph: f64,
    #[serde(default)]
    pub poh: Option<f64>,
    #[serde(default)]
    pub concentration: Option<f64>,
    #[serde(default)]
    pub substance_type: Option<String>,
    #[serde(default)]
    pub is_acidic: bool,
    #[serde(default)]
    pub is_basic: bool,
    #[serde(default)]
    pub is_neutral: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BufferRequest {
    pub target_ph: f64,
    pub pka: f64,
    pub total_concentration: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BufferResult {
    pub target_ph: f64,
    pub pka: f64,
    pub acid_concentration: f64,
    pub base_concentration: f64,
    pub total_concentration: f64,
    #[serde(default)]
    pub acid_base_ratio: Option<f64>,
    /// "optimal" when the acid/base ratio lies in (0.1, 10), else "suboptimal"
    #[serde(default)]
    pub buffer_capacity: Option<String>,
}

/// Exactly one of `final_concentration` / `final_volume` is expected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DilutionRequest {
    pub initial_concentration: f64,
    pub initial_volume: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_concentration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_volume: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DilutionResult {
    pub initial_concentration: f64,
    pub initial_volume: f64,
    pub final_concentration: f64,
    pub final_volume: f64,
    #[serde(default)]
    pub solvent_to_add: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MolarMassResult {
    pub formula: String,
    pub molar_mass: f64,
    pub unit: String,
}

////////////////////////////////////REACTIONS/////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquationRequest {
    /// reactants and products separated by '=', species by '+', e.g. "H2 + O2 = H2O"
    pub equation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalancedEquation {
    pub original: String,
    pub balanced: String,
    #[serde(default)]
    pub reactants: BTreeMap<String, u32>,
    #[serde(default)]
    pub products: BTreeMap<String, u32>,
    #[serde(default)]
    pub is_balanced: bool,
}

impl BalancedEquation {
    /// coefficient of a species on either side
    pub fn coefficient(&self, species: &str) -> Option<u32> {
        self.reactants
            .get(species)
            .or_else(|| self.products.get(species))
            .copied()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoichiometryRequest {
    pub equation: String,
    pub given_substance: String,
    pub given_amount: f64,
    pub target_substance: String,
    /// mol, g or L
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoichiometryResult {
    pub given_substance: String,
    pub given_amount: f64,
    pub given_coefficient: f64,
    pub target_substance: String,
    pub target_amount: f64,
    pub target_coefficient: f64,
    pub molar_ratio: f64,
    pub unit: String,
}

////////////////////////////////////INVENTORY & FORMULA COSTING///////////////////////////////

/// raw material as stored in the plant inventory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryMaterial {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub cas_number: Option<String>,
    #[serde(default)]
    pub price_per_kg: Option<f64>,
    /// kg in stock
    #[serde(default)]
    pub inventory_level: Option<f64>,
    /// GHS hazard codes, e.g. "H318"
    #[serde(default)]
    pub ghs_tags: Option<Vec<String>>,
}

/// Looks a name up in an inventory list, ignoring case and surrounding whitespace.
pub fn find_material<'a>(inventory: &'a [InventoryMaterial], name: &str) -> Option<&'a InventoryMaterial> {
    let name = name.trim();
    inventory
        .iter()
        .find(|m| m.name.trim().eq_ignore_ascii_case(name))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormulaItem {
    pub material_id: u64,
    /// 0 to 100
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormulaInput {
    pub name: String,
    pub items: Vec<FormulaItem>,
    pub total_batch_weight_kg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormulaAnalysis {
    pub total_cost: f64,
    pub cost_per_kg: f64,
    /// "OK" or "Insufficient Stock"
    pub inventory_status: String,
    #[serde(default)]
    pub missing_materials: Vec<String>,
    #[serde(default)]
    pub safety_hazards: Vec<String>,
    /// Corrosive, Flammable, Toxic
    #[serde(default)]
    pub ghs_icons: Vec<String>,
}

impl FormulaAnalysis {
    pub fn in_stock(&self) -> bool {
        self.inventory_status == "OK"
    }

    pub fn pretty_print(&self) {
        let mut table = Table::new();
        table.add_row(Row::new(vec![
            Cell::new("Total cost"),
            Cell::new(&format!("{:.2}", self.total_cost)),
        ]));
        table.add_row(Row::new(vec![
            Cell::new("Cost per kg"),
            Cell::new(&format!("{:.2}", self.cost_per_kg)),
        ]));
        table.add_row(Row::new(vec![
            Cell::new("Inventory"),
            Cell::new(&self.inventory_status),
        ]));
        for missing in &self.missing_materials {
            table.add_row(Row::new(vec![Cell::new("Missing"), Cell::new(missing)]));
        }
        table.add_row(Row::new(vec![
            Cell::new("Hazards"),
            Cell::new(&self.safety_hazards.join(", ")),
        ]));
        table.add_row(Row::new(vec![
            Cell::new("GHS icons"),
            Cell::new(&self.ghs_icons.join(", ")),
        ]));
        table.printstd();
    }
}

////////////////////////////////////AI ASSISTANT//////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundAnalysisRequest {
    pub cid: u64,
    pub compound_name: String,
    pub molecular_formula: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smiles: Option<String>,
    #[serde(default)]
    pub properties: Map<String, Value>,
    /// general, safety, applications, synthesis
    pub analysis_type: String,
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactionPredictionRequest {
    /// SMILES or compound names
    pub reactants: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Map<String, Value>>,
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureExplanationRequest {
    pub smiles: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compound_name: Option<String>,
    /// general, bonding, geometry, properties
    pub focus: String,
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativesRequest {
    pub compound_name: String,
    pub molecular_formula: String,
    pub current_use: String,
    /// safer, cheaper, greener
    pub criteria: String,
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubstitutionRequest {
    pub original: String,
    pub candidate: String,
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyWarning {
    #[serde(rename = "type")]
    pub kind: String,
    /// LOW, MEDIUM, HIGH or EXTREME
    pub hazard_level: String,
    pub message: String,
    #[serde(default)]
    pub action: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubstitutionAnalysis {
    /// 0 to 1
    pub similarity_score: f64,
    pub ai_analysis: String,
    /// absent or null when the candidate is safe
    #[serde(default)]
    pub safety_warning: Option<SafetyWarning>,
}

impl SubstitutionAnalysis {
    pub fn is_safe(&self) -> bool {
        self.safety_warning.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariationRequest {
    pub product_name: String,
    pub description: String,
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariationItem {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub difference_explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct VariationsResponse {
    #[serde(default)]
    pub variations: Vec<VariationItem>,
}
