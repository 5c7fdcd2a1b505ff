use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use fintrack::app::{Action, App};
use fintrack::config::{ClientConfig, ConfigError, DEFAULT_API_URL, DEFAULT_CONNECT_TIMEOUT_SECS, Timeouts};
use fintrack::net::api::AuthApi;
use fintrack::net::http::{HttpError, ReqwestHttpClient};
use fintrack::net::types::{Credentials, RegistrationProfile};
use fintrack::state::session::FileSessionStore;
use tracing::Level;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Http(#[from] HttpError),
}

#[derive(Parser, Debug)]
#[command(name = "fintrack", about = "Fintrack personal finance tracker client")]
struct Cli {
    #[arg(long, env = "FINTRACK_API_URL", default_value = DEFAULT_API_URL)]
    base_url: String,

    /// Where the session token is kept (default: ~/.fintrack/session.json).
    #[arg(long, env = "FINTRACK_SESSION_FILE")]
    session_file: Option<PathBuf>,

    #[arg(long, env = "FINTRACK_CONNECT_TIMEOUT_SECS", default_value_t = DEFAULT_CONNECT_TIMEOUT_SECS)]
    connect_timeout_secs: u64,

    #[arg(long, env = "FINTRACK_REQUEST_TIMEOUT_SECS")]
    request_timeout_secs: Option<u64>,

    /// Log requests and navigation to stderr.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and open the dashboard.
    Login(LoginArgs),
    /// Create an account, log in, and open the dashboard.
    Register(RegisterArgs),
    /// Show the dashboard for the stored session.
    Dashboard,
    /// Forget the stored session.
    Logout,
}

#[derive(Args, Debug)]
struct LoginArgs {
    #[arg(long)]
    email: String,
    #[arg(long)]
    password: String,
}

#[derive(Args, Debug)]
struct RegisterArgs {
    #[arg(long, default_value = "")]
    first_name: String,
    #[arg(long, default_value = "")]
    last_name: String,
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long, default_value = "")]
    password: String,
}

impl From<Command> for Action {
    fn from(command: Command) -> Self {
        match command {
            Command::Login(args) => Action::Login(Credentials::new(args.email, args.password)),
            Command::Register(args) => Action::Register(RegistrationProfile {
                email: args.email,
                password: args.password,
                first_name: args.first_name,
                last_name: args.last_name,
            }),
            Command::Dashboard => Action::Dashboard,
            Command::Logout => Action::Logout,
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode, CliError> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    let timeouts = Timeouts { connect_secs: cli.connect_timeout_secs, request_secs: cli.request_timeout_secs };
    let config = ClientConfig::new(&cli.base_url, cli.session_file, timeouts)?;
    tracing::debug!(base_url = %config.base_url, session_file = %config.session_file.display(), "client configured");

    let http = ReqwestHttpClient::new(&config)?;
    let session = FileSessionStore::new(config.session_file.clone());
    let app = App::new(AuthApi::new(Arc::new(http)), Arc::new(session));

    let screen = app.run(cli.command.into()).await;
    print!("{}", screen.output);

    Ok(if screen.ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
