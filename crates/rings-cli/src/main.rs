use clap::{Parser, Subcommand};
use rings_cli::cli::commands;

#[derive(Parser)]
#[command(name = "rings")]
#[command(author, version, about = "Export daily activity ring summaries from a health gateway", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Profile to use
    #[arg(short, long, global = true, env = "RINGS_PROFILE")]
    profile: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Pairing commands
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
    /// Show gateway availability
    Status,
    /// Export daily activity summaries for a date range
    Export {
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: String,
        /// End date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        to: Option<String>,
        /// Write the payload to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[derive(Subcommand)]
enum AuthCommands {
    /// Pair with a health gateway
    Login {
        /// Gateway base URL
        #[arg(long, env = "RINGS_GATEWAY_URL")]
        gateway_url: Option<String>,
        /// Access token issued by the gateway
        #[arg(long, env = "RINGS_TOKEN")]
        token: Option<String>,
    },
    /// Unpair and clear credentials
    Logout,
    /// Show pairing status
    Status,
}

#[tokio::main]
async fn main() -> rings_cli::Result<()> {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Auth { command } => match command {
            AuthCommands::Login { gateway_url, token } => {
                commands::login(gateway_url, token, cli.profile).await
            }
            AuthCommands::Logout => commands::logout(cli.profile).await,
            AuthCommands::Status => commands::auth_status(cli.profile).await,
        },
        Commands::Status => commands::gateway_status(cli.profile).await,
        Commands::Export { from, to, output } => {
            commands::export(from, to, output, cli.profile).await
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", rings_cli::error::format_user_error(&e));
        std::process::exit(1);
    }

    Ok(())
}
