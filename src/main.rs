use std::sync::Arc;

use clap::Parser;
use regdesk::cli::{self, Cli, Command, PendingCommand};
use regdesk::service::http::HttpRegistrationService;
use regdesk::service::local::LocalRegistrationService;
use regdesk::service::{RegistrationService, Resolution};
use regdesk::ui::confirm::{AlwaysConfirm, Confirmer};
use regdesk::{config, db};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    let settings = config::Settings::load()?;

    // Pick the backend
    let service: Arc<dyn RegistrationService> = if cli.local {
        let db = db::Database::open(&config::db_path()?)?;
        Arc::new(LocalRegistrationService::new(
            Arc::new(db),
            settings.operator(cli.operator.as_deref()),
        ))
    } else {
        let server = settings.server(cli.server.as_deref());
        Arc::new(HttpRegistrationService::new(
            &server,
            settings.auth_token(cli.token.as_deref()),
        )?)
    };

    match cli.command {
        Command::Register {
            username,
            password,
            email,
        } => {
            let navigator = Arc::new(cli::prompt::TerminalNavigator {
                server: (!cli.local).then(|| settings.server(cli.server.as_deref())),
            });
            cli::register::register(service, navigator, &username, &password, &email).await?;
        }
        Command::Pending { command } => match command {
            PendingCommand::List { format } => cli::pending::list(service, &format).await?,
            PendingCommand::Approve { id, yes } => {
                cli::pending::resolve(service, confirmer(yes), &id, Resolution::Approve).await?
            }
            PendingCommand::Reject { id, yes } => {
                cli::pending::resolve(service, confirmer(yes), &id, Resolution::Reject).await?
            }
        },
    }

    Ok(())
}

fn confirmer(skip_prompt: bool) -> Arc<dyn Confirmer> {
    if skip_prompt {
        Arc::new(AlwaysConfirm)
    } else {
        Arc::new(cli::prompt::TerminalConfirmer)
    }
}
