//! 命令行参数定义。

use clap::{Args, Parser, Subcommand};
use domain::{AssetStatus, Department};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "patrimony", version, about = "Municipal asset registry client")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct GlobalOptions {
    /// Keep the session in memory only; nothing is written to disk.
    #[arg(long, global = true)]
    pub ephemeral: bool,
    /// Use the built-in in-memory backend (admin/admin123, sample data) instead of the network.
    #[arg(long, global = true)]
    pub demo: bool,
    /// Log in as this user before running the command.
    #[arg(long, global = true, value_name = "USERNAME")]
    pub user: Option<String>,
    #[arg(long, global = true, value_name = "PASSWORD", requires = "user")]
    pub user_password: Option<String>,
    /// Print request counters to stderr on exit.
    #[arg(long, global = true)]
    pub metrics: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and persist the session.
    Login {
        username: String,
        #[arg(long)]
        password: Option<String>,
    },
    /// Clear the persisted session.
    Logout,
    /// Register a new user (does not log in).
    Register(RegisterArgs),
    /// Show the current session and whether the token is still accepted.
    Session,
    /// Check the backend with the current token.
    Health,
    /// List patrimony items.
    List {
        #[arg(long, value_parser = parse_department)]
        department: Option<Department>,
        #[arg(long, value_parser = parse_status)]
        status: Option<AssetStatus>,
    },
    /// Show one patrimony item.
    Show { id: String },
    /// Create a patrimony item, then upload attachments.
    Create {
        #[command(flatten)]
        fields: AssetArgs,
        #[command(flatten)]
        attachments: AttachmentArgs,
    },
    /// Update a patrimony item; omitted fields keep their current value.
    Update {
        id: String,
        #[command(flatten)]
        fields: AssetArgs,
        #[command(flatten)]
        attachments: AttachmentArgs,
    },
    /// Delete a patrimony item after confirmation.
    Delete {
        id: String,
        /// Skip the confirmation prompt.
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Move a patrimony item to another department.
    Transfer {
        id: String,
        #[arg(long = "to")]
        destination: String,
        #[arg(long)]
        reason: String,
    },
    /// Transfer history, optionally for one item.
    Transfers {
        #[arg(long)]
        id: Option<String>,
    },
    /// Dashboard totals.
    Stats {
        #[arg(long, value_parser = parse_department)]
        department: Option<Department>,
    },
}

#[derive(Debug, Args)]
pub struct RegisterArgs {
    #[arg(long)]
    pub company: String,
    #[arg(long)]
    pub department: String,
    #[arg(long)]
    pub username: String,
    #[arg(long)]
    pub password: String,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub role: Option<String>,
}

/// 表单字段；原样交给领域校验。
#[derive(Debug, Default, Args)]
pub struct AssetArgs {
    #[arg(long)]
    pub plate: Option<String>,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    pub acquisition_date: Option<String>,
    /// Accepts `,` as decimal separator.
    #[arg(long)]
    pub value: Option<String>,
    #[arg(long)]
    pub department: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub invoice_number: Option<String>,
    #[arg(long)]
    pub commitment_number: Option<String>,
    #[arg(long)]
    pub denf_se_number: Option<String>,
}

#[derive(Debug, Default, Args)]
pub struct AttachmentArgs {
    #[arg(long)]
    pub image: Option<PathBuf>,
    #[arg(long)]
    pub invoice: Option<PathBuf>,
    #[arg(long)]
    pub commitment: Option<PathBuf>,
    #[arg(long)]
    pub denf: Option<PathBuf>,
}

fn parse_department(value: &str) -> Result<Department, String> {
    Department::parse(value).ok_or_else(|| {
        let known: Vec<&str> = Department::ALL.iter().map(|dept| dept.as_str()).collect();
        format!("unknown department, expected one of: {}", known.join(", "))
    })
}

fn parse_status(value: &str) -> Result<AssetStatus, String> {
    AssetStatus::parse(value).ok_or_else(|| {
        let known: Vec<&str> = AssetStatus::ALL.iter().map(|status| status.as_str()).collect();
        format!("unknown status, expected one of: {}", known.join(", "))
    })
}
