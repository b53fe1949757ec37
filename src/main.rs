//! Studyhub server entrypoint.

use clap::Parser;
use std::sync::Arc;
use tracing::info;

use studyhub::account::reset::PasswordResetService;
use studyhub::account::service::IdentityService;
use studyhub::config::StudyhubConfig;
use studyhub::group::service::GroupService;
use studyhub::mail;
use studyhub::membership::MembershipManager;
use studyhub::rpc::{ApiServer, AppState};
use studyhub::storage::Storage;

#[derive(Parser, Debug)]
#[clap(name = "studyhub", version)]
struct Args {
    /// Path to the TOML config file
    #[clap(long, default_value = "config.toml")]
    config: String,

    /// Override the configured listen port
    #[clap(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    let config = StudyhubConfig::load_or_default(&args.config);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.server.log_level)),
        )
        .init();

    info!("Studyhub v{} starting...", env!("CARGO_PKG_VERSION"));

    let storage = Arc::new(Storage::new(&config.storage.db_path));
    let mailer = mail::from_config(&config.mail);

    let state = AppState {
        identity: Arc::new(IdentityService::new(storage.clone())),
        reset: Arc::new(PasswordResetService::new(
            storage.clone(),
            mailer,
            config.mail.reset_password_url.clone(),
        )),
        groups: Arc::new(GroupService::new(storage.clone())),
        membership: Arc::new(MembershipManager::new(storage)),
    };

    let port = args.port.unwrap_or(config.server.port);
    ApiServer::new(state, &config.server.host, port).start().await;
}
