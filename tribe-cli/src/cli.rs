use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

#[derive(Parser)]
#[command(name = "tribe")]
#[command(about = "TribeNet - join, run and manage clubs")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Server base URL (overrides TRIBE_BASE_URL)
    #[arg(short, long, global = true)]
    pub server: Option<String>,

    /// Directory holding the persisted session
    #[arg(long, global = true, env = "TRIBE_DATA_DIR", default_value = ".tribenet")]
    pub data_dir: PathBuf,

    /// Default log level when RUST_LOG is unset
    #[arg(long, global = true, env = "TRIBE_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Emit logs as JSON
    #[arg(long, global = true, env = "TRIBE_LOG_JSON")]
    pub log_json: bool,

    /// Also write daily-rotated log files here
    #[arg(long, global = true, env = "TRIBE_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Answer yes to every confirmation prompt
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and store the session
    Login(LoginArgs),
    /// Create an account
    Register(RegisterArgs),
    /// Clear the stored session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Club counters and recent clubs
    Dashboard,
    /// List all clubs
    Clubs(SearchArgs),
    /// List clubs you belong to
    MyClubs,
    /// Club details and roster
    Show { club_id: i64 },
    /// Create a club (you become its admin)
    Create(CreateArgs),
    /// Edit a club you administer
    Edit(EditArgs),
    /// Delete a club you administer
    Delete { club_id: i64 },
    /// Join a club, paying its fee if it has one
    Join { club_id: i64 },
    /// Leave a club
    Leave { club_id: i64 },
    /// Promote a club member to admin
    Promote { club_id: i64, user_id: i64 },
    /// Remove a member from a club
    RemoveMember { club_id: i64, user_id: i64 },
    /// Browse other users and their clubs
    Users(SearchArgs),
    /// Payment history
    Payments(PaymentsArgs),
    /// Platform administration
    Admin(AdminArgs),
}

#[derive(clap::Args)]
pub struct LoginArgs {
    #[arg(short, long)]
    pub username: String,
    #[arg(short, long, env = "TRIBE_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(clap::Args)]
pub struct RegisterArgs {
    #[arg(short, long)]
    pub username: String,
    #[arg(short, long)]
    pub email: String,
    /// Full name
    #[arg(short, long)]
    pub name: String,
    #[arg(short, long, env = "TRIBE_PASSWORD", hide_env_values = true)]
    pub password: String,
    /// Register as a platform admin
    #[arg(long)]
    pub admin: bool,
}

#[derive(clap::Args)]
pub struct SearchArgs {
    /// Filter by name, description, category (clubs) or name, email (users)
    #[arg(short, long)]
    pub search: Option<String>,
}

#[derive(clap::Args)]
pub struct CreateArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub description: String,
    #[arg(long)]
    pub category: String,
    /// Membership fee in rupees; omit for a free club
    #[arg(long)]
    pub price: Option<Decimal>,
}

#[derive(clap::Args)]
pub struct EditArgs {
    pub club_id: i64,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    /// New membership fee in rupees
    #[arg(long, conflicts_with = "free")]
    pub price: Option<Decimal>,
    /// Make the club free
    #[arg(long)]
    pub free: bool,
}

#[derive(clap::Args)]
pub struct PaymentsArgs {
    /// Show one payment
    #[arg(long)]
    pub id: Option<i64>,
    /// Whose payments (defaults to you)
    #[arg(long, conflicts_with = "id")]
    pub user: Option<i64>,
}

#[derive(clap::Args)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub command: AdminCommands,
}

#[derive(Subcommand)]
pub enum AdminCommands {
    /// List every user
    Users,
    /// Delete a user account
    DeleteUser { user_id: i64 },
    /// Delete any club
    DeleteClub { club_id: i64 },
}
