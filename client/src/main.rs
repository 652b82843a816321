pub mod api;
pub mod auth;
pub mod config;
pub mod session;
pub mod state;
pub mod ui;
pub mod view;
pub mod voting;

use colored::*;

use config::Config;
use session::FileSessionStore;
use state::Screen;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    if let Err(e) = init_tracing() {
        eprintln!("{}", format!("Warning: logging disabled: {e}").yellow());
    }

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.json".to_string());

    if let Err(e) = start_app(&config_path).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn start_app(config_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_from(config_path)?;
    let mut store = FileSessionStore::open(config.session_path());

    tracing::info!("client started against {}", config.server_url());

    // A stored session lands straight on the voting screen; it falls back to
    // login on its own when there is none.
    let mut screen = Screen::Voting;

    loop {
        screen = match screen {
            Screen::Login => auth::login_screen(&config, &mut store).await?,
            Screen::Register => auth::register_screen(&config).await?,
            Screen::Voting => voting::voting_screen(&config, &mut store).await?,
            Screen::Exit => break,
        };
    }

    println!("\n{}", "Até logo!".cyan());
    Ok(())
}

/// Logs go to a file so they never interleave with the screens.
fn init_tracing() -> Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("client.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("client=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
