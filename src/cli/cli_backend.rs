use super::cli_main::ask;
use crate::Backend::api_types::{
    BufferRequest, CompoundAnalysisRequest, DilutionRequest, PhRequest, SearchType,
    StoichiometryRequest, SubstanceType,
};
use crate::Backend::client::{BackendClient, BackendError};
use crate::settings::AppConfig;
use prettytable::{Cell, Row, Table};
use reqwest::blocking::Client;
use serde_json::Map;

pub fn backend_menu(config: &AppConfig) {
    let backend = match BackendClient::from_config(config) {
        Ok(backend) => backend,
        Err(e) => {
            println!("Error: {}", e);
            return;
        }
    };
    loop {
        println!("\n=== Chemistry backend ({}) ===", backend.base_url());
        println!("1. Search compounds");
        println!("2. Compound details");
        println!("3. Compound safety");
        println!("4. Periodic table");
        println!("5. pH of a solution");
        println!("6. Buffer composition");
        println!("7. Dilution");
        println!("8. Molar mass");
        println!("9. Predict reaction");
        println!("10. AI compound analysis");
        println!("11. Similar compounds");
        println!("12. Balance equation");
        println!("13. Stoichiometry");
        println!("14. Inventory search");
        println!("15. AI structure explanation");
        println!("16. AI alternatives");
        println!("0. Back");
        let Some(choice) = ask("Choose option: ") else {
            break;
        };
        let result = match choice.as_str() {
            "1" => search(&backend),
            "2" => details(&backend),
            "3" => safety(&backend),
            "4" => periodic_table(&backend),
            "5" => ph(&backend),
            "6" => buffer(&backend),
            "7" => dilution(&backend),
            "8" => molar_mass(&backend),
            "9" => predict(&backend),
            "10" => analyze(&backend),
            "11" => similar(&backend),
            "12" => balance(&backend),
            "13" => stoichiometry(&backend),
            "14" => inventory(&backend),
            "15" => explain(&backend),
            "16" => alternatives(&backend),
            "0" => break,
            _ => {
                println!("Invalid option");
                Ok(())
            }
        };
        if let Err(e) = result {
            println!("Error: {}", e);
        }
    }
}

fn text(prompt: &str) -> Result<String, BackendError> {
    ask(prompt).ok_or_else(|| BackendError::Validation("no input".to_string()))
}

fn number(prompt: &str) -> Result<f64, BackendError> {
    let answer = text(prompt)?;
    answer
        .parse::<f64>()
        .map_err(|_| BackendError::Validation(format!("'{}' is not a number", answer)))
}

fn optional_number(prompt: &str) -> Result<Option<f64>, BackendError> {
    let answer = text(prompt)?;
    if answer.is_empty() {
        return Ok(None);
    }
    answer
        .parse::<f64>()
        .map(Some)
        .map_err(|_| BackendError::Validation(format!("'{}' is not a number", answer)))
}

fn cid(prompt: &str) -> Result<u64, BackendError> {
    let answer = text(prompt)?;
    answer
        .parse::<u64>()
        .map_err(|_| BackendError::Validation(format!("'{}' is not a CID", answer)))
}

fn search(backend: &BackendClient<Client>) -> Result<(), BackendError> {
    let query = text("Name, formula, SMILES or CAS: ")?;
    backend
        .search_compounds(&query, SearchType::guess(&query))?
        .pretty_print();
    Ok(())
}

fn details(backend: &BackendClient<Client>) -> Result<(), BackendError> {
    let info = backend.compound(cid("CID: ")?)?;
    let mut table = Table::new();
    table.add_row(Row::new(vec![Cell::new("CID"), Cell::new(&info.cid.to_string())]));
    table.add_row(Row::new(vec![
        Cell::new("IUPAC name"),
        Cell::new(info.iupac_name.as_deref().unwrap_or("-")),
    ]));
    table.add_row(Row::new(vec![
        Cell::new("Formula"),
        Cell::new(info.molecular_formula.as_deref().unwrap_or("-")),
    ]));
    for (key, value) in &info.properties {
        table.add_row(Row::new(vec![Cell::new(key), Cell::new(&value.to_string())]));
    }
    table.printstd();
    Ok(())
}

fn safety(backend: &BackendClient<Client>) -> Result<(), BackendError> {
    let info = backend.compound_safety(cid("CID: ")?)?;
    for key in ["ghs_pictograms", "hazard_statements", "precautionary_statements"] {
        println!("{}: {}", key, info.strings(key).join(", "));
    }
    if let Some(word) = info.0.get("signal_word").and_then(|v| v.as_str()) {
        println!("signal word: {}", word);
    }
    Ok(())
}

fn periodic_table(backend: &BackendClient<Client>) -> Result<(), BackendError> {
    let table_data = backend.periodic_table()?;
    let mut table = Table::new();
    table.add_row(Row::new(vec![
        Cell::new("Z"),
        Cell::new("Symbol"),
        Cell::new("Name"),
        Cell::new("Mass"),
        Cell::new("Category"),
    ]));
    for e in &table_data.elements {
        table.add_row(Row::new(vec![
            Cell::new(&e.atomic_number.to_string()),
            Cell::new(&e.symbol),
            Cell::new(&e.name),
            Cell::new(&e.atomic_mass.map(|m| format!("{:.4}", m)).unwrap_or_default()),
            Cell::new(e.category.as_deref().unwrap_or("")),
        ]));
    }
    table.printstd();
    Ok(())
}

fn ph(backend: &BackendClient<Client>) -> Result<(), BackendError> {
    let concentration = number("Concentration, M: ")?;
    println!("1. strong acid  2. strong base  3. weak acid  4. weak base");
    let substance_type = match text("Substance type: ")?.as_str() {
        "2" => SubstanceType::StrongBase,
        "3" => SubstanceType::WeakAcid,
        "4" => SubstanceType::WeakBase,
        _ => SubstanceType::StrongAcid,
    };
    let pka = match substance_type {
        SubstanceType::WeakAcid | SubstanceType::WeakBase => Some(number("pKa: ")?),
        _ => None,
    };
    let result = backend.calculate_ph(&PhRequest {
        concentration,
        substance_type,
        pka,
    })?;
    let character = if result.is_neutral {
        "neutral"
    } else if result.is_acidic {
        "acidic"
    } else {
        "basic"
    };
    println!("pH = {:.2} ({})", result.ph, character);
    Ok(())
}

fn buffer(backend: &BackendClient<Client>) -> Result<(), BackendError> {
    let request = BufferRequest {
        target_ph: number("Target pH: ")?,
        pka: number("pKa: ")?,
        total_concentration: optional_number("Total concentration, M [0.1]: ")?.unwrap_or(0.1),
    };
    let result = backend.calculate_buffer(&request)?;
    println!(
        "acid {:.4} M, base {:.4} M, capacity: {}",
        result.acid_concentration,
        result.base_concentration,
        result.buffer_capacity.as_deref().unwrap_or("-")
    );
    Ok(())
}

fn dilution(backend: &BackendClient<Client>) -> Result<(), BackendError> {
    let request = DilutionRequest {
        initial_concentration: number("C1: ")?,
        initial_volume: number("V1: ")?,
        final_concentration: optional_number("C2 (empty if unknown): ")?,
        final_volume: optional_number("V2 (empty if unknown): ")?,
    };
    let result = backend.calculate_dilution(&request)?;
    println!(
        "C2 = {}, V2 = {}, solvent to add: {}",
        result.final_concentration,
        result.final_volume,
        result.solvent_to_add.map(|v| v.to_string()).unwrap_or_default()
    );
    Ok(())
}

fn molar_mass(backend: &BackendClient<Client>) -> Result<(), BackendError> {
    let result = backend.molar_mass(&text("Formula: ")?)?;
    println!("M({}) = {:.3} {}", result.formula, result.molar_mass, result.unit);
    Ok(())
}

fn predict(backend: &BackendClient<Client>) -> Result<(), BackendError> {
    let line = text("Reactants, comma separated: ")?;
    let reactants: Vec<String> = line.split(',').map(str::to_string).collect();
    let prediction = backend.predict_reaction(&reactants, None)?;
    println!("{}", serde_json::to_string_pretty(&prediction)?);
    Ok(())
}

fn analyze(backend: &BackendClient<Client>) -> Result<(), BackendError> {
    let info = backend.compound(cid("CID: ")?)?;
    let request = CompoundAnalysisRequest {
        cid: info.cid,
        compound_name: info.iupac_name.clone().unwrap_or_default(),
        molecular_formula: info.molecular_formula.clone().unwrap_or_default(),
        smiles: info.canonical_smiles.clone(),
        properties: Map::new(),
        analysis_type: "general".to_string(),
        language: backend.language().to_string(),
    };
    let analysis = backend.analyze_compound(&request)?;
    println!("{}", serde_json::to_string_pretty(&analysis)?);
    Ok(())
}

fn similar(backend: &BackendClient<Client>) -> Result<(), BackendError> {
    let cid = cid("CID: ")?;
    let threshold = optional_number("Similarity threshold, % [90]: ")?.unwrap_or(90.0);
    let found = backend.similar_compounds(cid, threshold)?;
    for c in &found.similar_compounds {
        println!(
            "{:>10}  {}  {}  ({:.0}%)",
            c.cid,
            c.name.as_deref().unwrap_or("-"),
            c.molecular_formula.as_deref().unwrap_or("-"),
            c.similarity_score
        );
    }
    println!("{} similar compound(s)", found.count);
    Ok(())
}

fn balance(backend: &BackendClient<Client>) -> Result<(), BackendError> {
    let balanced = backend.balance_equation(&text("Equation, e.g. H2 + O2 = H2O: ")?)?;
    println!("{}", balanced.balanced);
    Ok(())
}

fn stoichiometry(backend: &BackendClient<Client>) -> Result<(), BackendError> {
    let request = StoichiometryRequest {
        equation: text("Equation: ")?,
        given_substance: text("Known substance: ")?,
        given_amount: number("Known amount: ")?,
        target_substance: text("Wanted substance: ")?,
        unit: {
            let unit = text("Unit (mol, g, L) [mol]: ")?;
            if unit.is_empty() { "mol".to_string() } else { unit }
        },
    };
    let result = backend.stoichiometry(&request)?;
    println!(
        "{} {} of {} (ratio {})",
        result.target_amount, result.unit, result.target_substance, result.molar_ratio
    );
    Ok(())
}

fn inventory(backend: &BackendClient<Client>) -> Result<(), BackendError> {
    let found = backend.search_inventory(&text("Material name (empty for all): ")?)?;
    let mut table = Table::new();
    table.add_row(Row::new(vec![
        Cell::new("ID"),
        Cell::new("Name"),
        Cell::new("CAS"),
        Cell::new("Price/kg"),
        Cell::new("Stock, kg"),
        Cell::new("GHS"),
    ]));
    for m in &found {
        table.add_row(Row::new(vec![
            Cell::new(&m.id.to_string()),
            Cell::new(&m.name),
            Cell::new(m.cas_number.as_deref().unwrap_or("-")),
            Cell::new(&m.price_per_kg.map(|p| format!("{:.2}", p)).unwrap_or_default()),
            Cell::new(&m.inventory_level.map(|l| format!("{:.1}", l)).unwrap_or_default()),
            Cell::new(&m.ghs_tags.as_ref().map(|t| t.join(" ")).unwrap_or_default()),
        ]));
    }
    table.printstd();
    Ok(())
}

fn explain(backend: &BackendClient<Client>) -> Result<(), BackendError> {
    let smiles = text("SMILES: ")?;
    let name = text("Compound name (optional): ")?;
    let focus = text("Focus (general, bonding, geometry, properties) [general]: ")?;
    let focus = if focus.is_empty() { "general" } else { focus.as_str() };
    let name = (!name.is_empty()).then_some(name.as_str());
    let explanation = backend.explain_structure(&smiles, name, focus)?;
    println!("{}", serde_json::to_string_pretty(&explanation)?);
    Ok(())
}

fn alternatives(backend: &BackendClient<Client>) -> Result<(), BackendError> {
    let name = text("Compound name: ")?;
    let formula = text("Molecular formula: ")?;
    let current_use = text("Current use: ")?;
    let criteria = text("Criteria (safer, cheaper, greener) [safer]: ")?;
    let criteria = if criteria.is_empty() { "safer" } else { criteria.as_str() };
    let suggestions = backend.suggest_alternatives(&name, &formula, &current_use, criteria)?;
    println!("{}", serde_json::to_string_pretty(&suggestions)?);
    Ok(())
}
