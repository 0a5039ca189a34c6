use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use log::{debug, info};
use port_agency_frontend::domain::models::KycStatus;
use port_agency_frontend::domain::sscec::SscecStatus;
use port_agency_frontend::services::{
    ApiClient, FileSessionStore, MemorySessionStore, SessionContext, SessionStore,
};

mod commands;
mod config;
mod report;

use config::DeskConfig;

#[derive(Parser)]
#[command(name = "portdesk")]
#[command(version)]
#[command(about = "Port agency back office from the command line", long_about = None)]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Back-office API base URL, overriding the config file
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and keep the session for later commands
    Login {
        username: String,

        #[arg(long, env = "PORTDESK_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the saved session
    Logout,
    /// Show the logged in user
    Whoami,
    /// List customers
    Customers {
        #[arg(short, long)]
        search: Option<String>,
    },
    /// List vendors
    Vendors {
        #[arg(short, long)]
        search: Option<String>,

        #[arg(long, value_enum)]
        kyc: Option<KycArg>,
    },
    /// List vessels with their sanitation certificate status
    Vessels {
        #[arg(short, long)]
        search: Option<String>,

        #[arg(long, value_enum)]
        status: Option<StatusArg>,
    },
    /// Upcoming birthdays of contacts and staff
    Birthdays {
        /// Reference date instead of today (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },
    /// Sanitation certificate date calculator (works offline)
    Sscec {
        #[command(subcommand)]
        command: SscecCommand,
    },
    /// List back-office users
    Users {
        #[arg(short, long)]
        search: Option<String>,
    },
}

#[derive(Subcommand)]
enum SscecCommand {
    /// Expiry date for a certificate issued on ISSUED
    Expiry { issued: String },
    /// Issue date for a certificate expiring on EXPIRY
    Issued { expiry: String },
}

#[derive(Clone, Copy, ValueEnum)]
enum KycArg {
    Approved,
    Pending,
}

impl From<KycArg> for KycStatus {
    fn from(arg: KycArg) -> Self {
        match arg {
            KycArg::Approved => KycStatus::Approved,
            KycArg::Pending => KycStatus::Pending,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum StatusArg {
    Valid,
    Expiring,
    Expired,
}

impl From<StatusArg> for SscecStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Valid => SscecStatus::Valid,
            StatusArg::Expiring => SscecStatus::Expiring,
            StatusArg::Expired => SscecStatus::Expired,
        }
    }
}

fn session_context(config: &DeskConfig) -> SessionContext {
    let store: Arc<dyn SessionStore> = match config.session_path() {
        Some(path) => {
            debug!("Session file {:?}", path);
            Arc::new(FileSessionStore::new(path))
        }
        None => Arc::new(MemorySessionStore::new()),
    };
    SessionContext::restore(store)
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = DeskConfig::load(cli.config.as_deref())?;
    config.apply_overrides(cli.api_url);
    info!("Using API at {}", config.api_base_url);

    let today = chrono::Local::now().date_naive();
    let client = ApiClient::new(config.api_base_url.clone(), session_context(&config));

    let output = match cli.command {
        Commands::Login { username, password } => commands::login(&client, &username, &password).await?,
        Commands::Logout => commands::logout(&client),
        Commands::Whoami => commands::whoami(&client),
        Commands::Customers { search } => commands::customers(&client, search.as_deref()).await?,
        Commands::Vendors { search, kyc } => {
            commands::vendors(&client, search.as_deref(), kyc.map(KycStatus::from)).await?
        }
        Commands::Vessels { search, status } => {
            commands::vessels(&client, &config, search.as_deref(), status.map(SscecStatus::from), today).await?
        }
        Commands::Birthdays { date } => {
            let date = commands::reference_date(date.as_deref(), today)?;
            commands::birthdays(&client, &config, date).await?
        }
        Commands::Sscec { command } => match command {
            SscecCommand::Expiry { issued } => commands::sscec_expiry(&config, &issued, today)?,
            SscecCommand::Issued { expiry } => commands::sscec_issued(&config, &expiry)?,
        },
        Commands::Users { search } => commands::users(&client, search.as_deref()).await?,
    };

    print!("{}", output);
    Ok(())
}
