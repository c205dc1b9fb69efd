//! # Chemistry backend client
//!
//! ## Aim
//! Blocking client for the chemistry backend: compound lookup, molecule structures, the
//! periodic table, solution and reaction calculators, the raw-material inventory with formula
//! costing, and the AI assistant endpoints.
//!
//! ## Main Data Structures and Logic
//! - `HttpClient` trait: the transport (`get_text`, `post_json`). Implemented for
//!   `reqwest::blocking::Client`; tests plug in a mock returning canned bodies
//! - `BackendClient<C>`: base URL + answer language + transport, one method per endpoint
//! - `BackendError`: transport failures, server-side errors (`{"error": ...}` or
//!   `{"detail": ...}` bodies), bodies of unexpected shape, local validation failures
//!
//! Every call is a single request: no retry and no caching, the first error is returned.
//!
//! ## Usage
//! ```rust, ignore
//! let config = AppConfig::load()?;
//! let backend = BackendClient::from_config(&config)?;
//! let found = backend.search_compounds("aspirin", SearchType::Name)?;
//! found.pretty_print();
//! let molecule = backend.structure_3d("CC(=O)OC1=CC=CC=C1C(=O)O")?;
//! ```
use crate::Backend::api_types::*;
use crate::Molecule::molecule_data::MoleculePayload;
use crate::settings::AppConfig;
use log::{debug, info};
use reqwest::blocking::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// HTTP transport, injectable for testing
pub trait HttpClient {
    fn get_text(&self, url: &str) -> Result<String, BackendError>;
    fn post_json(&self, url: &str, body: &Value) -> Result<String, BackendError>;
}

// Implementation for the real reqwest client. Status codes are not checked here: FastAPI
// puts the reason of a 4xx/5xx into a `detail` field, which `decode` turns into an error.
impl HttpClient for Client {
    fn get_text(&self, url: &str) -> Result<String, BackendError> {
        Ok(self.get(url).send()?.text()?)
    }

    fn post_json(&self, url: &str, body: &Value) -> Result<String, BackendError> {
        Ok(self.post(url).json(body).send()?.text()?)
    }
}

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Server error: {0}")]
    Server(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(#[from] serde_json::Error),
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),
    #[error("Invalid request: {0}")]
    Validation(String),
}

/// message of a `{"error": ...}` / `{"detail": ...}` body, if the body is one
pub fn server_error_message(body: &Value) -> Option<String> {
    let object = body.as_object()?;
    let field = object.get("error").or_else(|| object.get("detail"))?;
    if field.is_null() {
        return None;
    }
    Some(match field {
        Value::String(s) => s.clone(),
        // FastAPI validation errors: [{"loc": [...], "msg": "...", "type": "..."}]
        Value::Array(list) => list
            .iter()
            .map(|e| {
                e.get("msg")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| e.to_string())
            })
            .collect::<Vec<_>>()
            .join("; "),
        other => other.to_string(),
    })
}

/// Parses a response body into `T`, turning error bodies into `BackendError::Server`.
pub fn decode<T: DeserializeOwned>(body: &str) -> Result<T, BackendError> {
    let value: Value = serde_json::from_str(body)?;
    if let Some(message) = server_error_message(&value) {
        return Err(BackendError::Server(message));
    }
    Ok(serde_json::from_value(value)?)
}

pub struct BackendClient<C: HttpClient> {
    client: C,
    base_url: String,
    language: String,
}

impl BackendClient<Client> {
    /// reqwest client with the configured timeout, base URL and language from the config
    pub fn from_config(config: &AppConfig) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self::with_client(client, &config.backend_url)?.with_language(config.language.as_str()))
    }
}

impl<C: HttpClient> BackendClient<C> {
    pub fn with_client(client: C, base_url: &str) -> Result<Self, BackendError> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        Url::parse(&base_url)?;
        Ok(Self {
            client,
            base_url,
            language: "en".to_string(),
        })
    }

    /// language the AI endpoints answer in ("en" or "ar")
    pub fn with_language(mut self, language: &str) -> Self {
        self.language = language.to_string();
        self
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn transport(&self) -> &C {
        &self.client
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        Ok(Url::parse(&format!("{}{}", self.base_url, path))?)
    }

    fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, BackendError> {
        debug!("GET {}", url);
        let body = self.client.get_text(url.as_str())?;
        decode(&body)
    }

    fn post<B: Serialize, T: DeserializeOwned>(&self, url: Url, body: &B) -> Result<T, BackendError> {
        debug!("POST {}", url);
        let body = serde_json::to_value(body)?;
        let text = self.client.post_json(url.as_str(), &body)?;
        decode(&text)
    }

    ///////////////////////////////////COMPOUNDS///////////////////////////////////////////////
    pub fn search_compounds(
        &self,
        query: &str,
        search_type: SearchType,
    ) -> Result<CompoundSearchResponse, BackendError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(BackendError::Validation("empty search query".to_string()));
        }
        let request = CompoundSearchRequest {
            query: query.to_string(),
            search_type,
        };
        let found: CompoundSearchResponse =
            self.post(self.endpoint("/api/chemistry/compounds/search")?, &request)?;
        info!("search '{}' ({}): {} result(s)", query, search_type.as_str(), found.count);
        Ok(found)
    }

    pub fn compound(&self, cid: u64) -> Result<CompoundInfo, BackendError> {
        self.get(self.endpoint(&format!("/api/chemistry/compounds/{}", cid))?)
    }

    pub fn compound_safety(&self, cid: u64) -> Result<SafetyInfo, BackendError> {
        self.get(self.endpoint(&format!("/api/chemistry/compounds/{}/safety", cid))?)
    }

    /// structurally similar compounds, `threshold` is a similarity percentage
    pub fn similar_compounds(
        &self,
        cid: u64,
        threshold: f64,
    ) -> Result<SimilarCompoundsResponse, BackendError> {
        let mut url = self.endpoint(&format!("/api/chemistry/compounds/{}/similar", cid))?;
        url.query_pairs_mut()
            .append_pair("threshold", &threshold.to_string());
        self.get(url)
    }

    ///////////////////////////////////STRUCTURES//////////////////////////////////////////////
    fn structure(&self, path: &str, smiles: &str) -> Result<MoleculePayload, BackendError> {
        let smiles = smiles.trim();
        if smiles.is_empty() {
            return Err(BackendError::Validation("empty SMILES".to_string()));
        }
        let request = StructureRequest {
            smiles: smiles.to_string(),
        };
        let payload: MoleculePayload = self.post(self.endpoint(path)?, &request)?;
        info!(
            "structure of {}: {} atoms, {} bonds",
            smiles,
            payload.atoms.len(),
            payload.bonds.len()
        );
        Ok(payload)
    }

    pub fn structure_2d(&self, smiles: &str) -> Result<MoleculePayload, BackendError> {
        self.structure("/api/chemistry/structure/2d", smiles)
    }

    pub fn structure_3d(&self, smiles: &str) -> Result<MoleculePayload, BackendError> {
        self.structure("/api/chemistry/structure/3d", smiles)
    }

    pub fn periodic_table(&self) -> Result<PeriodicTableResponse, BackendError> {
        self.get(self.endpoint("/api/chemistry/periodic-table")?)
    }

    ///////////////////////////////////CALCULATIONS////////////////////////////////////////////
    pub fn calculate_ph(&self, request: &PhRequest) -> Result<PhResult, BackendError> {
        if !request.concentration.is_finite() || request.concentration <= 0.0 {
            return Err(BackendError::Validation(
                "concentration must be positive".to_string(),
            ));
        }
        self.post(self.endpoint("/api/chemistry/calculations/ph")?, request)
    }

    pub fn calculate_buffer(&self, request: &BufferRequest) -> Result<BufferResult, BackendError> {
        self.post(self.endpoint("/api/chemistry/calculations/buffer")?, request)
    }

    pub fn calculate_dilution(
        &self,
        request: &DilutionRequest,
    ) -> Result<DilutionResult, BackendError> {
        if request.final_concentration.is_none() && request.final_volume.is_none() {
            return Err(BackendError::Validation(
                "either final concentration or final volume is required".to_string(),
            ));
        }
        self.post(self.endpoint("/api/chemistry/calculations/dilution")?, request)
    }

    /// the formula goes into the query string, the body is empty
    pub fn molar_mass(&self, formula: &str) -> Result<MolarMassResult, BackendError> {
        let mut url = self.endpoint("/api/chemistry/calculations/molar-mass")?;
        url.query_pairs_mut().append_pair("formula", formula.trim());
        self.post(url, &json!({}))
    }

    ///////////////////////////////////REACTIONS///////////////////////////////////////////////
    /// A failed balance comes back as an `error` body and surfaces as `BackendError::Server`.
    pub fn balance_equation(&self, equation: &str) -> Result<BalancedEquation, BackendError> {
        let equation = equation.trim();
        if equation.split('=').count() != 2 {
            return Err(BackendError::Validation(format!(
                "'{}' needs exactly one '=' between reactants and products",
                equation
            )));
        }
        let request = EquationRequest {
            equation: equation.to_string(),
        };
        let balanced: BalancedEquation =
            self.post(self.endpoint("/api/chemistry/reactions/balance")?, &request)?;
        info!("{} balanced as {}", balanced.original, balanced.balanced);
        Ok(balanced)
    }

    pub fn stoichiometry(
        &self,
        request: &StoichiometryRequest,
    ) -> Result<StoichiometryResult, BackendError> {
        if !request.given_amount.is_finite() || request.given_amount < 0.0 {
            return Err(BackendError::Validation(
                "given amount must be a non-negative number".to_string(),
            ));
        }
        self.post(self.endpoint("/api/chemistry/reactions/stoichiometry")?, request)
    }

    ///////////////////////////////////INVENTORY///////////////////////////////////////////////
    /// materials whose name contains `query`; an empty query lists the first 50
    pub fn search_inventory(&self, query: &str) -> Result<Vec<InventoryMaterial>, BackendError> {
        let mut url = self.endpoint("/api/inventory/search")?;
        url.query_pairs_mut().append_pair("q", query.trim());
        let found: Vec<InventoryMaterial> = self.get(url)?;
        info!("inventory search '{}': {} material(s)", query.trim(), found.len());
        Ok(found)
    }

    pub fn inventory_materials(
        &self,
        skip: usize,
        limit: usize,
    ) -> Result<Vec<InventoryMaterial>, BackendError> {
        let mut url = self.endpoint("/api/inventory/materials")?;
        url.query_pairs_mut()
            .append_pair("skip", &skip.to_string())
            .append_pair("limit", &limit.to_string());
        self.get(url)
    }

    /// cost, stock and hazard check of a formula against the inventory
    pub fn analyze_formula(&self, formula: &FormulaInput) -> Result<FormulaAnalysis, BackendError> {
        if formula.items.is_empty() {
            return Err(BackendError::Validation("formula has no items".to_string()));
        }
        if !formula.total_batch_weight_kg.is_finite() || formula.total_batch_weight_kg <= 0.0 {
            return Err(BackendError::Validation(
                "batch weight must be positive".to_string(),
            ));
        }
        let analysis: FormulaAnalysis = self.post(self.endpoint("/analyze_formula")?, formula)?;
        info!(
            "formula '{}': cost {:.2}, {}",
            formula.name, analysis.total_cost, analysis.inventory_status
        );
        Ok(analysis)
    }

    ///////////////////////////////////AI ASSISTANT////////////////////////////////////////////
    pub fn analyze_compound(&self, request: &CompoundAnalysisRequest) -> Result<Value, BackendError> {
        self.post(self.endpoint("/api/chemistry/ai/analyze-compound")?, request)
    }

    pub fn predict_reaction(
        &self,
        reactants: &[String],
        conditions: Option<Map<String, Value>>,
    ) -> Result<Value, BackendError> {
        let reactants: Vec<String> = reactants
            .iter()
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .collect();
        if reactants.len() < 2 {
            return Err(BackendError::Validation(
                "At least 2 reactants required".to_string(),
            ));
        }
        let request = ReactionPredictionRequest {
            reactants,
            conditions,
            language: self.language.clone(),
        };
        self.post(self.endpoint("/api/chemistry/ai/predict-reaction")?, &request)
    }

    pub fn explain_structure(
        &self,
        smiles: &str,
        compound_name: Option<&str>,
        focus: &str,
    ) -> Result<Value, BackendError> {
        let smiles = smiles.trim();
        if smiles.is_empty() {
            return Err(BackendError::Validation("empty SMILES".to_string()));
        }
        let request = StructureExplanationRequest {
            smiles: smiles.to_string(),
            compound_name: compound_name.map(str::to_string),
            focus: focus.to_string(),
            language: self.language.clone(),
        };
        self.post(self.endpoint("/api/chemistry/ai/explain-structure")?, &request)
    }

    /// `criteria` is "safer", "cheaper" or "greener"
    pub fn suggest_alternatives(
        &self,
        compound_name: &str,
        molecular_formula: &str,
        current_use: &str,
        criteria: &str,
    ) -> Result<Value, BackendError> {
        let request = AlternativesRequest {
            compound_name: compound_name.trim().to_string(),
            molecular_formula: molecular_formula.trim().to_string(),
            current_use: current_use.trim().to_string(),
            criteria: criteria.to_string(),
            language: self.language.clone(),
        };
        self.post(self.endpoint("/api/chemistry/ai/suggest-alternatives")?, &request)
    }

    pub fn analyze_substitution(
        &self,
        request: &SubstitutionRequest,
    ) -> Result<SubstitutionAnalysis, BackendError> {
        if request.original.trim().is_empty() || request.candidate.trim().is_empty() {
            return Err(BackendError::Validation(
                "both the original and the candidate are required".to_string(),
            ));
        }
        self.post(self.endpoint("/api/chemistry/ai/analyze-substitution")?, request)
    }

    pub fn generate_variations(
        &self,
        product_name: &str,
        description: &str,
    ) -> Result<VariationsResponse, BackendError> {
        let request = VariationRequest {
            product_name: product_name.trim().to_string(),
            description: description.trim().to_string(),
            language: self.language.clone(),
        };
        self.post(self.endpoint("/generate_variations")?, &request)
    }
}
