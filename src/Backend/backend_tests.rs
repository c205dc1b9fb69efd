#[cfg(test)]
mod tests {
    use crate::Backend::api_types::{
        BufferRequest, DilutionRequest, PhRequest, SearchType, StoichiometryRequest, SubstanceType,
        SubstitutionRequest,
    };
    use crate::Backend::client::{BackendClient, BackendError, HttpClient, decode};
    use crate::Recipes::recipe_workspace::RecipeWorkspace;
    use approx::assert_relative_eq;
    use serde_json::Value;
    use std::cell::RefCell;
    use std::collections::HashMap;

    const BASE: &str = "http://localhost:8000";

    // Mock HTTP client for testing
    #[derive(Default)]
    struct MockHttpClient {
        responses: HashMap<String, String>,
        requests: RefCell<Vec<(String, Option<Value>)>>,
    }

    impl MockHttpClient {
        fn new() -> Self {
            Self::default()
        }

        fn mock_response(&mut self, url: &str, body: &str) {
            self.responses.insert(url.to_string(), body.to_string());
        }

        fn respond(&self, url: &str) -> Result<String, BackendError> {
            self.responses
                .get(url)
                .cloned()
                .ok_or_else(|| BackendError::Transport(format!("no route to {}", url)))
        }
    }

    impl HttpClient for MockHttpClient {
        fn get_text(&self, url: &str) -> Result<String, BackendError> {
            self.requests.borrow_mut().push((url.to_string(), None));
            self.respond(url)
        }

        fn post_json(&self, url: &str, body: &Value) -> Result<String, BackendError> {
            self.requests
                .borrow_mut()
                .push((url.to_string(), Some(body.clone())));
            self.respond(url)
        }
    }

    fn client_with(url_path: &str, body: &str) -> BackendClient<MockHttpClient> {
        let mut mock = MockHttpClient::new();
        mock.mock_response(&format!("{}{}", BASE, url_path), body);
        BackendClient::with_client(mock, BASE).unwrap()
    }

    fn last_body(client: &BackendClient<MockHttpClient>) -> Value {
        let requests = client.transport().requests.borrow();
        requests.last().unwrap().1.clone().unwrap()
    }

    #[test]
    fn test_endpoint_join() {
        let client = BackendClient::with_client(MockHttpClient::new(), "http://example.org:8000/").unwrap();
        assert_eq!(client.base_url(), "http://example.org:8000");
        assert_eq!(
            client.endpoint("/api/chemistry/periodic-table").unwrap().as_str(),
            "http://example.org:8000/api/chemistry/periodic-table"
        );
        assert!(BackendClient::with_client(MockHttpClient::new(), "not a url").is_err());
    }

    #[test]
    fn test_search_compounds() {
        let body = r#"{"results": [{"cid": 2244, "name": "aspirin", "molecular_formula": "C9H8O4",
            "molecular_weight": "180.16", "canonical_smiles": "CC(=O)OC1=CC=CC=C1C(=O)O",
            "isomeric_smiles": null, "inchi": null, "inchikey": "BSYNRYMUTXBXSQ-UHFFFAOYSA-N"}],
            "count": 1}"#;
        let client = client_with("/api/chemistry/compounds/search", body);
        let found = client.search_compounds(" aspirin ", SearchType::Name).unwrap();
        assert_eq!(found.count, 1);
        assert_eq!(found.results[0].cid, 2244);
        assert_relative_eq!(found.results[0].molecular_weight.unwrap(), 180.16);
        let sent = last_body(&client);
        assert_eq!(sent["query"], "aspirin");
        assert_eq!(sent["search_type"], "name");
    }

    #[test]
    fn test_empty_query_is_rejected_locally() {
        let client = client_with("/api/chemistry/compounds/search", "{}");
        assert!(matches!(
            client.search_compounds("   ", SearchType::Name),
            Err(BackendError::Validation(_))
        ));
        assert!(client.transport().requests.borrow().is_empty());
    }

    #[test]
    fn test_detail_body_is_server_error() {
        let client = client_with("/api/chemistry/compounds/999", r#"{"detail": "Compound not found"}"#);
        match client.compound(999) {
            Err(BackendError::Server(msg)) => assert_eq!(msg, "Compound not found"),
            other => panic!("expected server error, got {:?}", other),
        }
    }

    #[test]
    fn test_error_body_is_server_error() {
        let client = client_with(
            "/api/chemistry/calculations/dilution",
            r#"{"error": "Must provide either final_concentration or final_volume"}"#,
        );
        let request = DilutionRequest {
            initial_concentration: 1.0,
            initial_volume: 10.0,
            final_concentration: Some(0.0),
            final_volume: None,
        };
        assert!(matches!(
            client.calculate_dilution(&request),
            Err(BackendError::Server(_))
        ));
    }

    #[test]
    fn test_validation_error_list() {
        let body = r#"{"detail": [{"loc": ["body", "smiles"], "msg": "field required", "type": "value_error.missing"}]}"#;
        let result: Result<Value, BackendError> = decode(body);
        match result {
            Err(BackendError::Server(msg)) => assert_eq!(msg, "field required"),
            other => panic!("expected server error, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_shape_is_invalid_response() {
        let client = client_with("/api/chemistry/calculations/buffer", r#"{"target_ph": "seven"}"#);
        let request = BufferRequest {
            target_ph: 7.0,
            pka: 6.8,
            total_concentration: 0.1,
        };
        assert!(matches!(
            client.calculate_buffer(&request),
            Err(BackendError::InvalidResponse(_))
        ));
        let client = client_with("/api/chemistry/periodic-table", "<html>502</html>");
        assert!(matches!(
            client.periodic_table(),
            Err(BackendError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_transport_failure_surfaces() {
        let client = BackendClient::with_client(MockHttpClient::new(), BASE).unwrap();
        assert!(matches!(
            client.periodic_table(),
            Err(BackendError::Transport(_))
        ));
    }

    #[test]
    fn test_structure_3d() {
        let body = r#"{"smiles": "C=O", "formula": "CH2O", "is_3d": true,
            "atoms": [{"id": 0, "symbol": "C", "x": 0.0, "y": 0.0, "z": 0.0},
                      {"id": 1, "symbol": "O", "x": 1.2, "y": 0.0, "z": 0.0}],
            "bonds": [{"atom1": 0, "atom2": 1, "type": 2}]}"#;
        let client = client_with("/api/chemistry/structure/3d", body);
        let payload = client.structure_3d("C=O").unwrap();
        assert_eq!(payload.atoms.len(), 2);
        assert_eq!(payload.is_3d, Some(true));
        assert_eq!(last_body(&client)["smiles"], "C=O");
        assert!(matches!(
            client.structure_2d(""),
            Err(BackendError::Validation(_))
        ));
    }

    #[test]
    fn test_periodic_table() {
        let body = r##"{"elements": [
            {"atomic_number": 1, "symbol": "H", "name": "Hydrogen", "atomic_mass": 1.008,
             "group": 1, "period": 1, "block": "s", "category": "nonmetal", "color": "#4caf50"},
            {"atomic_number": 2, "symbol": "He", "name": "Helium", "atomic_mass": 4.0026,
             "group": 18, "period": 1, "block": "s", "category": "noble gas", "color": "#9c27b0"}],
            "count": 2}"##;
        let client = client_with("/api/chemistry/periodic-table", body);
        let table = client.periodic_table().unwrap();
        assert_eq!(table.count, 2);
        assert_eq!(table.find("he").unwrap().atomic_number, 2);
    }

    #[test]
    fn test_ph_calculation() {
        let body = r#"{"ph": 2.0, "poh": 12.0, "concentration": 0.01, "substance_type": "strong_acid",
            "is_acidic": true, "is_basic": false, "is_neutral": false}"#;
        let client = client_with("/api/chemistry/calculations/ph", body);
        let request = PhRequest {
            concentration: 0.01,
            substance_type: SubstanceType::StrongAcid,
            pka: None,
        };
        let result = client.calculate_ph(&request).unwrap();
        assert_relative_eq!(result.ph, 2.0);
        assert!(result.is_acidic);
        let sent = last_body(&client);
        assert_eq!(sent["substance_type"], "strong_acid");
        assert!(sent.get("pka").is_none());

        let bad = PhRequest {
            concentration: 0.0,
            ..request
        };
        assert!(matches!(
            client.calculate_ph(&bad),
            Err(BackendError::Validation(_))
        ));
    }

    #[test]
    fn test_dilution_needs_a_target() {
        let client = client_with("/api/chemistry/calculations/dilution", "{}");
        let request = DilutionRequest {
            initial_concentration: 1.0,
            initial_volume: 10.0,
            final_concentration: None,
            final_volume: None,
        };
        assert!(matches!(
            client.calculate_dilution(&request),
            Err(BackendError::Validation(_))
        ));
    }

    #[test]
    fn test_molar_mass_goes_in_query() {
        let client = client_with(
            "/api/chemistry/calculations/molar-mass?formula=H2SO4",
            r#"{"formula": "H2SO4", "molar_mass": 98.079, "unit": "g/mol"}"#,
        );
        let result = client.molar_mass("H2SO4").unwrap();
        assert_relative_eq!(result.molar_mass, 98.079);
        assert_eq!(result.unit, "g/mol");
    }

    #[test]
    fn test_predict_reaction_needs_two_reactants() {
        let client = client_with("/api/chemistry/ai/predict-reaction", r#"{"products": ["NaCl", "H2O"]}"#);
        let one = vec!["HCl".to_string(), "  ".to_string()];
        assert!(matches!(
            client.predict_reaction(&one, None),
            Err(BackendError::Validation(_))
        ));
        let two = vec!["HCl".to_string(), "NaOH".to_string()];
        let prediction = client.predict_reaction(&two, None).unwrap();
        assert_eq!(prediction["products"][0], "NaCl");
        assert_eq!(last_body(&client)["language"], "en");
    }

    #[test]
    fn test_substitution_from_workspace() {
        let body = r#"{"similarity_score": 0.62, "ai_analysis": "Similar surfactant.",
            "safety_warning": {"type": "IRRITANT", "hazard_level": "MEDIUM",
                               "message": "Eye irritant", "action": "Wear goggles"}}"#;
        let client = client_with("/api/chemistry/ai/analyze-substitution", body).with_language("ar");
        let ws = RecipeWorkspace::from_text("Shampoo", "SLES 12%\nWater up to 100%", 1000.0);
        let request = ws.substitution_request(0, "SLS", client.language()).unwrap();
        let analysis = client.analyze_substitution(&request).unwrap();
        assert_relative_eq!(analysis.similarity_score, 0.62);
        assert!(!analysis.is_safe());
        assert_eq!(analysis.safety_warning.as_ref().unwrap().hazard_level, "MEDIUM");
        let sent = last_body(&client);
        assert_eq!(sent["original"], "SLES");
        assert_eq!(sent["candidate"], "SLS");
        assert_eq!(sent["language"], "ar");
    }

    #[test]
    fn test_substitution_without_warning_is_safe() {
        let body = r#"{"similarity_score": 0.9, "ai_analysis": "Drop-in replacement.", "safety_warning": null}"#;
        let client = client_with("/api/chemistry/ai/analyze-substitution", body);
        let request = SubstitutionRequest {
            original: "Glycerin".to_string(),
            candidate: "Propylene glycol".to_string(),
            language: "en".to_string(),
        };
        assert!(client.analyze_substitution(&request).unwrap().is_safe());
    }

    #[test]
    fn test_generate_variations() {
        let body = r#"{"variations": [{"type": "Budget", "ingredients": ["Water 80%"],
            "steps": ["Mix"], "warnings": [], "difference_explanation": "Cheaper"}]}"#;
        let client = client_with("/generate_variations", body);
        let response = client.generate_variations("Hand soap", "liquid soap").unwrap();
        assert_eq!(response.variations.len(), 1);
        assert_eq!(response.variations[0].kind, "Budget");
        assert_eq!(last_body(&client)["product_name"], "Hand soap");
    }

    #[test]
    fn test_compound_keeps_extra_properties() {
        let body = r#"{"cid": 962, "iupac_name": "oxidane", "molecular_formula": "H2O",
            "molecular_weight": 18.015, "tpsa": 1.0, "synonyms": ["water"]}"#;
        let client = client_with("/api/chemistry/compounds/962", body);
        let info = client.compound(962).unwrap();
        assert_eq!(info.iupac_name.as_deref(), Some("oxidane"));
        assert_relative_eq!(info.molecular_weight.unwrap(), 18.015);
        assert_eq!(info.property("synonyms").unwrap()[0], "water");
    }

    #[test]
    fn test_safety_lists() {
        let body = r#"{"ghs_classification": "", "ghs_pictograms": ["GHS05"],
            "hazard_statements": ["H314"], "precautionary_statements": [], "signal_word": "Danger"}"#;
        let client = client_with("/api/chemistry/compounds/1118/safety", body);
        let safety = client.compound_safety(1118).unwrap();
        assert_eq!(safety.strings("hazard_statements"), vec!["H314".to_string()]);
        assert!(safety.strings("missing").is_empty());
    }

    const INVENTORY: &str = r#"[
        {"id": 1, "name": "SLES", "cas_number": "68585-34-2", "price_per_kg": 1.8,
         "inventory_level": 800.0, "ghs_tags": ["H315", "H318"]},
        {"id": 2, "name": "Water", "cas_number": "7732-18-5", "price_per_kg": 0.01,
         "inventory_level": 10000.0, "ghs_tags": []},
        {"id": 3, "name": "Sodium chloride", "cas_number": null, "price_per_kg": null,
         "inventory_level": null, "ghs_tags": null}]"#;

    #[test]
    fn test_inventory_search() {
        let client = client_with("/api/inventory/search?q=sodium", INVENTORY);
        let found = client.search_inventory(" sodium ").unwrap();
        assert_eq!(found.len(), 3);
        assert_eq!(found[0].ghs_tags.as_ref().unwrap()[1], "H318");
        assert!(found[2].price_per_kg.is_none());
        let requests = client.transport().requests.borrow();
        assert_eq!(requests[0].0, format!("{}/api/inventory/search?q=sodium", BASE));
        assert!(requests[0].1.is_none());
    }

    #[test]
    fn test_inventory_listing_pages() {
        let client = client_with("/api/inventory/materials?skip=50&limit=25", "[]");
        assert!(client.inventory_materials(50, 25).unwrap().is_empty());
    }

    #[test]
    fn test_formula_analysis_from_workspace() {
        let mut mock = MockHttpClient::new();
        mock.mock_response(&format!("{}/api/inventory/search?q=", BASE), INVENTORY);
        mock.mock_response(
            &format!("{}/analyze_formula", BASE),
            r#"{"total_cost": 118.9, "cost_per_kg": 0.12, "inventory_status": "Insufficient Stock",
                "missing_materials": ["SLES (Need 120.0kg, Have 80.0kg)"],
                "safety_hazards": ["H315", "H318"], "ghs_icons": ["Corrosive"]}"#,
        );
        let client = BackendClient::with_client(mock, BASE).unwrap();
        let inventory = client.search_inventory("").unwrap();
        let ws = RecipeWorkspace::from_text("Shampoo", "SLES 12%\nWater up to 100%", 1000.0);
        let formula = ws.formula_input(&inventory).unwrap();
        let analysis = client.analyze_formula(&formula).unwrap();
        assert!(!analysis.in_stock());
        assert_eq!(analysis.ghs_icons, vec!["Corrosive".to_string()]);
        assert_relative_eq!(analysis.total_cost, 118.9);

        let sent = last_body(&client);
        assert_eq!(sent["name"], "Shampoo");
        assert_eq!(sent["total_batch_weight_kg"], 1000.0);
        assert_eq!(sent["items"][0]["material_id"], 1);
        assert_eq!(sent["items"][0]["percentage"], 12.0);
        assert_eq!(sent["items"][1]["material_id"], 2);
    }

    #[test]
    fn test_formula_analysis_checks_input() {
        let client = client_with("/analyze_formula", r#"{"detail": "Material ID 9 not found"}"#);
        let ws = RecipeWorkspace::new("Empty");
        let formula = ws.formula_input(&[]).unwrap();
        assert!(matches!(
            client.analyze_formula(&formula),
            Err(BackendError::Validation(_))
        ));
        assert!(client.transport().requests.borrow().is_empty());
    }

    #[test]
    fn test_balance_equation() {
        let body = r#"{"original": "H2 + O2 = H2O", "balanced": "2H2 + O2 → 2H2O",
            "reactants": {"H2": 2, "O2": 1}, "products": {"H2O": 2}, "is_balanced": true}"#;
        let client = client_with("/api/chemistry/reactions/balance", body);
        let balanced = client.balance_equation("H2 + O2 = H2O").unwrap();
        assert!(balanced.is_balanced);
        assert_eq!(balanced.coefficient("O2"), Some(1));
        assert_eq!(balanced.coefficient("H2O"), Some(2));
        assert_eq!(balanced.coefficient("N2"), None);
        assert!(matches!(
            client.balance_equation("H2 + O2 -> H2O"),
            Err(BackendError::Validation(_))
        ));
    }

    #[test]
    fn test_unbalanceable_equation_is_server_error() {
        let body = r#"{"original": "H2 = O2", "balanced": "H2 = O2",
            "error": "unbalanceable", "is_balanced": false}"#;
        let client = client_with("/api/chemistry/reactions/balance", body);
        assert!(matches!(
            client.balance_equation("H2 = O2"),
            Err(BackendError::Server(_))
        ));
    }

    #[test]
    fn test_stoichiometry() {
        let body = r#"{"given_substance": "H2", "given_amount": 4.0, "given_coefficient": 2,
            "target_substance": "H2O", "target_amount": 4.0, "target_coefficient": 2,
            "molar_ratio": 1.0, "unit": "mol"}"#;
        let client = client_with("/api/chemistry/reactions/stoichiometry", body);
        let request = StoichiometryRequest {
            equation: "H2 + O2 = H2O".to_string(),
            given_substance: "H2".to_string(),
            given_amount: 4.0,
            target_substance: "H2O".to_string(),
            unit: "mol".to_string(),
        };
        let result = client.stoichiometry(&request).unwrap();
        assert_relative_eq!(result.molar_ratio, 1.0);
        assert_relative_eq!(result.given_coefficient, 2.0);
        let negative = StoichiometryRequest {
            given_amount: -1.0,
            ..request
        };
        assert!(matches!(
            client.stoichiometry(&negative),
            Err(BackendError::Validation(_))
        ));
    }

    #[test]
    fn test_similar_compounds() {
        let body = r#"{"cid": 2244, "similar_compounds": [{"cid": 2244, "name": "aspirin",
            "molecular_formula": "C9H8O4", "molecular_weight": "180.16", "similarity_score": 95.0}],
            "count": 1}"#;
        let client = client_with("/api/chemistry/compounds/2244/similar?threshold=90", body);
        let similar = client.similar_compounds(2244, 90.0).unwrap();
        assert_eq!(similar.count, 1);
        assert_relative_eq!(similar.similar_compounds[0].molecular_weight.unwrap(), 180.16);
    }

    #[test]
    fn test_ai_explain_and_alternatives_carry_language() {
        let mut mock = MockHttpClient::new();
        mock.mock_response(
            &format!("{}/api/chemistry/ai/explain-structure", BASE),
            r#"{"geometry": "bent"}"#,
        );
        mock.mock_response(
            &format!("{}/api/chemistry/ai/suggest-alternatives", BASE),
            r#"{"alternatives": [{"name": "SLS"}]}"#,
        );
        let client = BackendClient::with_client(mock, BASE).unwrap().with_language("ar");

        let explanation = client.explain_structure("O", Some("water"), "geometry").unwrap();
        assert_eq!(explanation["geometry"], "bent");
        let sent = last_body(&client);
        assert_eq!(sent["compound_name"], "water");
        assert_eq!(sent["language"], "ar");
        assert!(matches!(
            client.explain_structure(" ", None, "general"),
            Err(BackendError::Validation(_))
        ));

        let alternatives = client
            .suggest_alternatives("SLES", "C12H25NaO4S", "foaming agent", "greener")
            .unwrap();
        assert_eq!(alternatives["alternatives"][0]["name"], "SLS");
        let sent = last_body(&client);
        assert_eq!(sent["criteria"], "greener");
        assert_eq!(sent["language"], "ar");
    }
}
