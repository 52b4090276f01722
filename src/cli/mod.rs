pub mod pending;
pub mod prompt;
pub mod register;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "regdesk",
    version,
    about = "Request an account, or review pending account requests"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Base URL of the document server API (defaults to the config file value)
    #[arg(long, global = true)]
    pub server: Option<String>,

    /// Administrator session token, sent as the auth_token cookie
    #[arg(long, env = "REGDESK_AUTH_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Use the local offline registration store instead of a server
    #[arg(long, global = true, conflicts_with = "server")]
    pub local: bool,

    /// Operator id recorded on requests resolved through the local store
    #[arg(long, global = true)]
    pub operator: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Command {
    /// Submit an account registration request
    Register {
        /// Desired username
        #[arg(long)]
        username: String,
        /// Account password
        #[arg(long)]
        password: String,
        /// Contact email address
        #[arg(long)]
        email: String,
    },
    /// Review pending registration requests (administrators)
    Pending {
        #[command(subcommand)]
        command: PendingCommand,
    },
}

#[derive(Subcommand)]
pub enum PendingCommand {
    /// List pending registration requests
    List {
        /// Output format
        #[arg(long, default_value = "terminal", value_parser = ["terminal", "json"])]
        format: String,
    },
    /// Approve a pending request and create the account
    Approve {
        /// Request ID
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Reject a pending request
    Reject {
        /// Request ID
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}
