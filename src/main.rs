//! calctl - manage Google Calendar events from an interactive prompt.
//!
//! Reads the OAuth client from `credentials.json`, caches the user's token in
//! `~/token.json`, then asks for a calendar and one of five event operations.

mod google;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use calctl_core::app_config::AppConfig;
use calctl_core::auth::Authenticator;
use calctl_core::console::Console;
use calctl_core::credential::CredentialStore;
use calctl_core::operations::Outcome;
use calctl_core::session::Session;
use calctl_core::settings::Settings;
use clap::Parser;
use owo_colors::OwoColorize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use google::{GoogleCalendar, GoogleOAuth};

#[derive(Parser)]
#[command(name = "calctl")]
#[command(about = "List, create, inspect, update and delete Google Calendar events")]
struct Cli {
    /// OAuth client file downloaded from the Google Cloud console
    #[arg(long)]
    credentials: Option<PathBuf>,

    /// Where the access token is cached (default: ~/token.json)
    #[arg(long)]
    token: Option<PathBuf>,

    /// IANA time zone for entered times (e.g. "Europe/Berlin")
    #[arg(long)]
    time_zone: Option<String>,

    /// Only print the authorization URL instead of opening a browser
    #[arg(long)]
    no_browser: bool,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(outcome) => {
            debug!(?outcome, "session finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", format!("calctl: {e:#}").red());
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "calctl=debug,calctl_core=debug"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<Outcome> {
    let mut settings = Settings::load().context("Unable to load settings")?;
    if let Some(path) = cli.credentials {
        settings.credentials_file = path;
    }
    if let Some(path) = cli.token {
        settings.token_file = Some(path);
    }
    if let Some(zone) = cli.time_zone {
        settings.time_zone = zone;
    }

    let time = settings.time_config()?;

    let credentials_path = settings.credentials_path();
    let app = AppConfig::load(&credentials_path).with_context(|| {
        format!(
            "Unable to read credentials file ({})",
            credentials_path.display()
        )
    })?;

    let store = CredentialStore::new(settings.token_path()?);
    let mut console = Console::stdio();

    let mut authenticator = Authenticator::new(app.clone(), store, GoogleOAuth::new(&app));
    if !cli.no_browser {
        authenticator = authenticator.on_consent_url(|url| {
            if open::that(url).is_err() {
                eprintln!(
                    "{}",
                    "(Could not open browser automatically, please copy the URL above)".dimmed()
                );
            }
        });
    }

    let tokens = authenticator
        .obtain(&mut console)
        .await
        .context("Unable to get OAuth client")?;

    let service = GoogleCalendar::new(app, tokens, time.zone());
    let session = Session {
        service: &service,
        time: &time,
        list_limit: settings.list_limit,
    };

    let calendar_id = session
        .select_calendar(&mut console)
        .await
        .context("Failed to select calendar")?;

    session
        .run_operation(&calendar_id, &mut console)
        .await
        .context("Operation failed")
}
