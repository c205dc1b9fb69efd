use super::cli_main::ask;
use crate::Backend::client::BackendClient;
use crate::Recipes::recipe_workspace::{DEFAULT_BATCH_KG, RecipeWorkspace};
use crate::settings::AppConfig;

pub fn recipes_menu(config: &AppConfig) {
    let mut workspace = RecipeWorkspace::new("Untitled");
    loop {
        println!("\n=== Recipe workspace: {} ===", workspace.name);
        println!("1. Enter recipe text");
        println!("2. Add ingredient line");
        println!("3. Show recipe and batch");
        println!("4. Set batch size (kg)");
        println!("5. Replace ingredient");
        println!("6. Ask backend: is a substitute suitable?");
        println!("7. Ask backend: recipe variations");
        println!("8. Ask backend: cost, stock and hazards");
        println!("0. Back");
        let Some(choice) = ask("Choose option: ") else {
            break;
        };
        let result = match choice.as_str() {
            "1" => enter_recipe(&mut workspace),
            "2" => add_line(&mut workspace),
            "3" => {
                workspace.pretty_print();
                Ok(())
            }
            "4" => set_batch_size(&mut workspace),
            "5" => replace_ingredient(&mut workspace),
            "6" => check_substitute(&workspace, config),
            "7" => variations(&workspace, config),
            "8" => cost_analysis(&workspace, config),
            "0" => break,
            _ => Err("Invalid option".to_string()),
        };
        if let Err(e) = result {
            println!("Error: {}", e);
        }
    }
}

fn enter_recipe(workspace: &mut RecipeWorkspace) -> Result<(), String> {
    let name = ask("Recipe name: ").ok_or("no input")?;
    println!("Enter ingredient lines, e.g. 'Water up to 100%', empty line to finish:");
    let mut text = String::new();
    while let Some(line) = ask("> ") {
        if line.is_empty() {
            break;
        }
        text.push_str(&line);
        text.push('\n');
    }
    let batch = workspace.batch_size_kg;
    *workspace = RecipeWorkspace::from_text(&name, &text, batch);
    println!("{} ingredient(s) recognised", workspace.items.len());
    Ok(())
}

fn add_line(workspace: &mut RecipeWorkspace) -> Result<(), String> {
    let line = ask("Ingredient line: ").ok_or("no input")?;
    if workspace.add_line(&line) {
        Ok(())
    } else {
        Err(format!("'{}' is not an ingredient line", line))
    }
}

fn set_batch_size(workspace: &mut RecipeWorkspace) -> Result<(), String> {
    let text = ask(&format!("Batch size in kg [{}]: ", DEFAULT_BATCH_KG)).ok_or("no input")?;
    let kg = if text.is_empty() {
        DEFAULT_BATCH_KG
    } else {
        text.parse::<f64>().map_err(|e| e.to_string())?
    };
    if !kg.is_finite() || kg <= 0.0 {
        return Err("batch size must be positive".to_string());
    }
    workspace.batch_size_kg = kg;
    Ok(())
}

fn choose_ingredient(workspace: &RecipeWorkspace) -> Result<usize, String> {
    for (i, item) in workspace.items.iter().enumerate() {
        println!("{}. {}", i + 1, item);
    }
    let text = ask("Ingredient number: ").ok_or("no input")?;
    match text.parse::<usize>() {
        Ok(n) if n >= 1 && n <= workspace.items.len() => Ok(n - 1),
        _ => Err("Invalid ingredient number".to_string()),
    }
}

fn replace_ingredient(workspace: &mut RecipeWorkspace) -> Result<(), String> {
    let index = choose_ingredient(workspace)?;
    let name = ask("New ingredient name: ").ok_or("no input")?;
    let old = workspace
        .replace_ingredient(index, &name)
        .ok_or("ingredient could not be replaced")?;
    println!("{} -> {}", old.name, workspace.items[index].name);
    Ok(())
}

fn check_substitute(workspace: &RecipeWorkspace, config: &AppConfig) -> Result<(), String> {
    let index = choose_ingredient(workspace)?;
    let candidate = ask("Candidate substitute: ").ok_or("no input")?;
    let request = workspace
        .substitution_request(index, &candidate, config.language.as_str())
        .ok_or("Invalid ingredient number")?;
    let backend = BackendClient::from_config(config).map_err(|e| e.to_string())?;
    let analysis = backend
        .analyze_substitution(&request)
        .map_err(|e| e.to_string())?;
    println!(
        "\nSimilarity: {:.0}%\n{}",
        analysis.similarity_score * 100.0,
        analysis.ai_analysis
    );
    match &analysis.safety_warning {
        Some(w) => println!(
            "\x1b[31m[{}] {}: {}\x1b[0m {}",
            w.hazard_level,
            w.kind,
            w.message,
            w.action.as_deref().unwrap_or("")
        ),
        None => println!("No safety warning."),
    }
    Ok(())
}

fn variations(workspace: &RecipeWorkspace, config: &AppConfig) -> Result<(), String> {
    let description = ask("Short product description: ").ok_or("no input")?;
    let backend = BackendClient::from_config(config).map_err(|e| e.to_string())?;
    let response = backend
        .generate_variations(&workspace.name, &description)
        .map_err(|e| e.to_string())?;
    for v in &response.variations {
        println!("\n--- {} ---", v.kind);
        for ingredient in &v.ingredients {
            println!("  * {}", ingredient);
        }
        for (i, step) in v.steps.iter().enumerate() {
            println!("  {}. {}", i + 1, step);
        }
        for warning in &v.warnings {
            println!("  ! {}", warning);
        }
        println!("  {}", v.difference_explanation);
    }
    Ok(())
}

fn cost_analysis(workspace: &RecipeWorkspace, config: &AppConfig) -> Result<(), String> {
    let backend = BackendClient::from_config(config).map_err(|e| e.to_string())?;
    let inventory = backend
        .inventory_materials(0, 1000)
        .map_err(|e| e.to_string())?;
    let formula = workspace.formula_input(&inventory)?;
    let analysis = backend
        .analyze_formula(&formula)
        .map_err(|e| e.to_string())?;
    analysis.pretty_print();
    Ok(())
}
