use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use scriptvocab_config::Config;
use scriptvocab_types::AuthUser;
use tokio::signal;

pub mod cli;
pub mod controller;
pub mod events;
pub mod io;
pub mod logging;
pub mod state;
pub mod translate;


use self::cli::{Cli, Command};
use self::controller::AppController;
use self::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::new(),
    };
    if let Some(user) = cli.user {
        config.auth.default_user = Some(user);
    }

    logging::init(config.log_format);

    let default_user = config.auth.default_user.clone();
    let state = Arc::new(AppState::new(config)?);

    match cli.command {
        Command::Dictionary => {
            if let Some(user) = default_user {
                state.auth.sign_in(AuthUser::new(user));
            }
            run_dictionary(state).await;
            Ok(ExitCode::SUCCESS)
        }
        Command::Translate(args) => {
            let succeeded = translate::run(&state, args, &mut std::io::stdout()).await?;
            Ok(if succeeded {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}

async fn run_dictionary(state: Arc<AppState>) {
    let controller = AppController::new(state);
    let mut tasks = controller.spawn_dictionary();

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("Shutdown requested");
        }
        Some(result) = tasks.join_next() => {
            match result {
                Ok(Ok(())) => tracing::info!("Dictionary task exited"),
                Ok(Err(e)) => tracing::error!("Dictionary task failed: {e}"),
                Err(e) => tracing::error!("Dictionary task panicked: {e}"),
            }
        }
    }

    controller.shutdown();
    while tasks.join_next().await.is_some() {}
}
