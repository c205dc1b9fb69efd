use super::cli_main::ask;
use crate::Backend::client::BackendClient;
use crate::Molecule::molecule_data::MoleculePayload;
use crate::Molecule::scene::{build_scene, view_for_payload};
use crate::Molecule::view_transform::{ViewMode, ViewTransform};
use crate::settings::AppConfig;
use nalgebra::Vector2;
use std::fs;

/// canvas the terminal viewer pretends to draw on, pixels
const CANVAS_WIDTH: f64 = 800.0;
const CANVAS_HEIGHT: f64 = 600.0;

pub fn molecule_menu(config: &AppConfig) {
    let mut payload = MoleculePayload::default();
    let mut view = ViewTransform::default();
    loop {
        println!("\n=== Molecule viewer ({} atoms, {:?}) ===", payload.atoms.len(), view.mode());
        println!("1. Load structure from JSON file");
        println!("2. Fetch 2D structure by SMILES");
        println!("3. Fetch 3D structure by SMILES");
        println!("4. Rotate (drag dx, dy in pixels)");
        println!("5. Zoom");
        println!("6. Pan");
        println!("7. Reset view");
        println!("8. Show scene");
        println!("9. Toggle 2D / 3D view");
        println!("0. Back");
        let Some(choice) = ask("Choose option: ") else {
            break;
        };
        let result = match choice.as_str() {
            "1" => load_file().map(|p| payload = p),
            "2" => fetch(config, false).map(|p| payload = p),
            "3" => fetch(config, true).map(|p| payload = p),
            "4" => read_pair("dx dy: ").map(|(dx, dy)| view.rotate_by(dx, dy)),
            "5" => read_pair("factor (e.g. 1.2 1): ").map(|(f, _)| view.zoom_by(f)),
            "6" => read_pair("dx dy: ").map(|(dx, dy)| view.pan_by(dx, dy)),
            "7" => {
                view.reset();
                Ok(())
            }
            "8" => Ok(()),
            "9" => {
                view.set_mode(match view.mode() {
                    ViewMode::Flat2D => ViewMode::Perspective3D,
                    ViewMode::Perspective3D => ViewMode::Flat2D,
                });
                Ok(())
            }
            "0" => break,
            _ => Err("Invalid option".to_string()),
        };
        match result {
            Ok(()) => {
                if matches!(choice.as_str(), "1" | "2" | "3") {
                    view = view_for_payload(&payload);
                }
                build_scene(&payload, &view, Vector2::new(CANVAS_WIDTH, CANVAS_HEIGHT)).pretty_print();
            }
            Err(e) => println!("Error: {}", e),
        }
    }
}

fn load_file() -> Result<MoleculePayload, String> {
    let path = ask("Path to structure JSON: ").ok_or("no input")?;
    let content = fs::read_to_string(&path).map_err(|e| format!("{}: {}", path, e))?;
    MoleculePayload::from_json_str(&content).map_err(|e| e.to_string())
}

fn fetch(config: &AppConfig, three_d: bool) -> Result<MoleculePayload, String> {
    let smiles = ask("SMILES: ").ok_or("no input")?;
    let backend = BackendClient::from_config(config).map_err(|e| e.to_string())?;
    let payload = if three_d {
        backend.structure_3d(&smiles)
    } else {
        backend.structure_2d(&smiles)
    };
    payload.map_err(|e| e.to_string())
}

fn read_pair(text: &str) -> Result<(f64, f64), String> {
    let line = ask(text).ok_or("no input")?;
    let numbers: Vec<f64> = line
        .split_whitespace()
        .map(|s| s.parse::<f64>())
        .collect::<Result<_, _>>()
        .map_err(|e| e.to_string())?;
    match numbers.as_slice() {
        [a] => Ok((*a, 0.0)),
        [a, b] => Ok((*a, *b)),
        _ => Err("expected one or two numbers".to_string()),
    }
}
