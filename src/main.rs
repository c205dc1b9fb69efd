use ChemLabKit::Utils::logging::init_logging;
use ChemLabKit::cli::cli_main::run_interactive_menu;
use ChemLabKit::settings::AppConfig;

pub fn main() {
    let mut config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}, using default configuration", e);
            AppConfig::default()
        }
    };
    if let Err(e) = init_logging(&config.log_level) {
        eprintln!("Logger not initialised: {}", e);
    }
    run_interactive_menu(&mut config);
}
