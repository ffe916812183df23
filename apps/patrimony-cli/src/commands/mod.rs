//! 子命令分发与错误。

mod assets;
mod session;
mod stats;
mod transfer;

use crate::cli::Command;
use crate::context::AppContext;
use patrimony_auth::AuthError;
use patrimony_client::{ClientError, TransportError};
use patrimony_view::LoadOutcome;
use std::io;

pub use session::login;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{}", .0.user_message())]
    Client(#[from] ClientError),
    #[error("session storage error: {0}")]
    Auth(#[from] AuthError),
    #[error("could not create HTTP client: {0}")]
    Transport(#[from] TransportError),
    #[error("could not read {path}: {source}")]
    File { path: String, source: io::Error },
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
    #[error("not logged in; run `patrimony login <username>` first")]
    NotLoggedIn,
}

impl CliError {
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, CliError::Client(err) if err.is_auth_expired())
    }
}

pub async fn run(context: &AppContext, command: Command) -> Result<(), CliError> {
    match command {
        Command::Login { username, password } => {
            session::login(context, &username, password.as_deref()).await
        }
        Command::Logout => session::logout(context).await,
        Command::Register(args) => session::register(context, args).await,
        Command::Session => session::show(context).await,
        command => {
            // 以下命令都需要已登录会话
            if !context.shell.can_render_data() {
                return Err(CliError::NotLoggedIn);
            }
            run_data_command(context, command).await
        }
    }
}

async fn run_data_command(context: &AppContext, command: Command) -> Result<(), CliError> {
    match command {
        Command::Health => session::health(context).await,
        Command::List { department, status } => assets::list(context, department, status).await,
        Command::Show { id } => assets::show(context, &id).await,
        Command::Create {
            fields,
            attachments,
        } => assets::create(context, fields, attachments).await,
        Command::Update {
            id,
            fields,
            attachments,
        } => assets::update(context, &id, fields, attachments).await,
        Command::Delete { id, yes } => assets::delete(context, &id, yes).await,
        Command::Transfer {
            id,
            destination,
            reason,
        } => transfer::submit(context, &id, &destination, &reason).await,
        Command::Transfers { id } => transfer::history(context, id.as_deref()).await,
        Command::Stats { department } => stats::show(context, department).await,
        Command::Login { .. } | Command::Logout | Command::Register(_) | Command::Session => {
            Ok(())
        }
    }
}

/// 加载结果转为命令结果。
fn loaded(outcome: LoadOutcome) -> Result<bool, CliError> {
    match outcome {
        LoadOutcome::Loaded => Ok(true),
        LoadOutcome::Failed(err) => Err(err.into()),
        LoadOutcome::Discarded => Ok(false),
    }
}
