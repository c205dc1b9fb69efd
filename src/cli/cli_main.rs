use super::cli_backend::backend_menu;
use super::cli_converters::converters_menu;
use super::cli_molecule::molecule_menu;
use super::cli_recipes::recipes_menu;
use crate::settings::AppConfig;
use std::io::{self, Write};

pub fn run_interactive_menu(config: &mut AppConfig) {
    loop {
        show_main_menu(config);
        let Some(choice) = get_user_input() else {
            break;
        };

        match choice.trim() {
            "1" => recipes_menu(config),
            "2" => converters_menu(),
            "3" => molecule_menu(config),
            "4" => backend_menu(config),
            "5" => settings_menu(config),
            "0" => {
                println!("Goodbye!");
                break;
            }
            _ => println!("Invalid choice. Please try again."),
        }
    }
}
/* colors
Blue (\x1b[34m) - Welcome header text

Yellow (\x1b[33m) - Menu options

Cyan (\x1b[36m) - prompts

Reset (\x1b[0m) - Returns to normal color after each colored section
*/
fn show_main_menu(config: &AppConfig) {
    println!(
        "\x1b[34m\n Welcome to ChemLabKit: recipes, unit converters,\n
    molecule viewer and chemistry backend tools \n
    backend: {} ({}) \n \x1b[0m",
        config.backend_url, config.language
    );
    println!("\x1b[33m1. Recipes\x1b[0m");
    println!("\x1b[33m2. Unit converters\x1b[0m");
    println!("\x1b[33m3. Molecule viewer\x1b[0m");
    println!("\x1b[33m4. Chemistry backend\x1b[0m");
    println!("\x1b[33m5. Settings\x1b[0m");
    println!("\x1b[33m0. Exit\x1b[0m");
    prompt("Enter your choice: ");
}

/// prints a cyan prompt without a newline
pub(crate) fn prompt(text: &str) {
    print!("\x1b[36m{}\x1b[0m", text);
    let _ = io::stdout().flush();
}

/// one line from stdin, `None` at end of input
pub(crate) fn get_user_input() -> Option<String> {
    let mut input = String::new();
    match io::stdin().read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input),
    }
}

/// prompt + trimmed answer
pub(crate) fn ask(text: &str) -> Option<String> {
    prompt(text);
    get_user_input().map(|s| s.trim().to_string())
}

fn settings_menu(config: &mut AppConfig) {
    loop {
        println!("\n=== Settings ({}) ===", config.config_file().display());
        println!("1. Backend URL     [{}]", config.backend_url);
        println!("2. Language        [{}]", config.language);
        println!("3. Timeout, s      [{}]", config.timeout_secs);
        println!("4. Log level       [{}]", config.log_level);
        println!("5. Reset to defaults");
        println!("6. Save");
        println!("0. Back");
        let Some(choice) = ask("Choose option: ") else {
            break;
        };
        let result = match choice.as_str() {
            "1" => ask("Backend URL: ").map(|url| config.set_backend_url(&url)),
            "2" => ask("Language (en/ar): ").map(|lang| config.set_language(&lang)),
            "3" => ask("Timeout in seconds: ").map(|t| match t.parse::<u64>() {
                Ok(secs) => config.set_timeout_secs(secs),
                Err(_) => Err(crate::settings::ConfigError::InvalidTimeout),
            }),
            "4" => ask("Log level (error/warn/info/debug/trace): ")
                .map(|level| config.set_log_level(&level)),
            "5" => {
                config.reset_to_defaults();
                Some(Ok(()))
            }
            "6" => Some(config.save()),
            "0" => break,
            _ => {
                println!("Invalid option");
                None
            }
        };
        if let Some(Err(e)) = result {
            println!("Error: {}", e);
        }
    }
}
