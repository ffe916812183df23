use super::CliError;
use crate::cli::RegisterArgs;
use crate::context::AppContext;
use crate::prompt::read_line;
use api_contract::RegisterRequest;
use patrimony_view::ShellView;

pub async fn login(
    context: &AppContext,
    username: &str,
    password: Option<&str>,
) -> Result<(), CliError> {
    let password = match password {
        Some(password) => password.to_string(),
        None => read_line("Password: ").await?,
    };
    let profile = context.auth().login(username, &password).await?;
    println!(
        "Logged in as {} ({}, {})",
        profile.username, profile.role, profile.company_name
    );
    Ok(())
}

pub async fn logout(context: &AppContext) -> Result<(), CliError> {
    context.auth().logout().await;
    println!("Logged out.");
    Ok(())
}

pub async fn register(context: &AppContext, args: RegisterArgs) -> Result<(), CliError> {
    let request = RegisterRequest {
        company_name: args.company,
        department: args.department,
        username: args.username,
        password: args.password,
        email: args.email,
        role: args.role,
    };
    let profile = context.auth().register(&request).await?;
    println!(
        "Registered {} ({}). Log in with `patrimony login {}`.",
        profile.username, profile.role, profile.username
    );
    Ok(())
}

pub async fn show(context: &AppContext) -> Result<(), CliError> {
    match context.shell.view() {
        ShellView::Workspace { username } => {
            let valid = context.auth().check_token_validity().await;
            println!(
                "Logged in as {username}; token {}",
                if valid { "accepted" } else { "rejected" }
            );
        }
        ShellView::Login { notice } => {
            if let Some(notice) = notice {
                println!("{notice}");
                context.shell.acknowledge_notice();
            }
            println!("Not logged in.");
        }
    }
    Ok(())
}

pub async fn health(context: &AppContext) -> Result<(), CliError> {
    if context.auth().check_token_validity().await {
        println!("Backend reachable, token accepted.");
    } else {
        println!("Backend unreachable or token rejected.");
    }
    Ok(())
}
