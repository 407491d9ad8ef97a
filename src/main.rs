//! Paddleball entry point
//!
//! Usage: `paddleball [settings.json]`

use paddleball::Settings;
use paddleball::settings::SETTINGS_FILE;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| SETTINGS_FILE.to_string());
    let settings = Settings::load(&path);

    log::info!("Paddleball starting...");
    if let Err(e) = paddleball::platform::run(settings) {
        log::error!("Fatal: {}", e);
        std::process::exit(1);
    }
    log::info!("Bye");
}
