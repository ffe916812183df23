//! 资产登记命令行客户端。

mod cli;
mod commands;
mod context;
mod prompt;
mod render;

use clap::Parser;
use cli::Cli;
use context::AppContext;
use patrimony_config::ClientConfig;
use patrimony_telemetry::{init_tracing, metrics};
use patrimony_view::ShellView;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    // 加载本地 .env（如存在）
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = ClientConfig::from_env()?;
    init_tracing();

    let context = AppContext::build(&config, &cli.global).await?;
    let mut result = Ok(());
    if let Some(username) = cli.global.user.as_deref() {
        result = commands::login(&context, username, cli.global.user_password.as_deref()).await;
    }
    if result.is_ok() {
        result = commands::run(&context, cli.command).await;
    }

    if cli.global.metrics {
        eprintln!("{:?}", metrics().snapshot());
    }
    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            eprintln!("error: {err}");
            if err.is_auth_expired() {
                // 会话已清除，提示用户重新登录
                if let ShellView::Login {
                    notice: Some(notice),
                } = context.shell.view()
                {
                    eprintln!("{notice}");
                    context.shell.acknowledge_notice();
                }
            }
            Ok(ExitCode::FAILURE)
        }
    }
}
