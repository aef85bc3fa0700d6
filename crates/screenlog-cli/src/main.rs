use clap::{ArgAction, Parser, Subcommand};
use commands::{config, session, status, toggle};
use screenlog_models::ContentType;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "screenlog")]
#[command(about = "Screenlog - track what you've watched and what's up next")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show watch status and watchlist membership for a title
    #[command(
        long_about = "Fetch the title's logs and watchlist membership from the backend and display the derived watch status: unwatched, watching (tv with season logs only), or watched."
    )]
    Status {
        /// Backend content id of the title
        content_id: String,

        /// Content type (movie or tv)
        #[arg(short = 't', long = "type", value_parser = parse_content_type)]
        content_type: ContentType,
    },
    /// Toggle the watched state of a title
    #[command(
        long_about = "Remove the title's general log when one exists, otherwise create one dated today. For tv, season logs are untouched; removing the general log reveals watching when season logs remain."
    )]
    Watched {
        /// Backend content id of the title
        content_id: String,

        /// Content type (movie or tv)
        #[arg(short = 't', long = "type", value_parser = parse_content_type)]
        content_type: ContentType,
    },
    /// Toggle watchlist membership of a title
    Watchlist {
        /// Backend content id of the title
        content_id: String,

        /// Content type (movie or tv)
        #[arg(short = 't', long = "type", value_parser = parse_content_type)]
        content_type: ContentType,
    },
    /// Store an access token for the backend
    Login {
        /// Access token issued by the backend
        #[arg(long)]
        token: String,
    },
    /// Remove the stored access token
    Logout,
    /// View or initialize configuration
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration (masks the stored token)
    Show {
        /// Show full configuration including the stored token
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },

    /// Write a default configuration file if none exists
    Init,
}

fn parse_content_type(s: &str) -> Result<ContentType, String> {
    s.parse()
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.quiet).map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Status {
            content_id,
            content_type,
        } => status::run_status(content_id, content_type, &output).await,
        Commands::Watched {
            content_id,
            content_type,
        } => toggle::run_watched(content_id, content_type, &output).await,
        Commands::Watchlist {
            content_id,
            content_type,
        } => toggle::run_watchlist(content_id, content_type, &output).await,
        Commands::Login { token } => session::run_login(token, &output).await,
        Commands::Logout => session::run_logout(&output).await,
        Commands::Config { cmd } => config::run_config(cmd, &output).await,
    }
}
