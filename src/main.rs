mod cli;
mod core;

use clap::{Parser, Subcommand};

use cli::output::{OutputFormat, OutputOptions};

#[derive(Parser)]
#[command(
    name = "quotabar",
    about = "Menu bar quota widget for proxied AI provider accounts",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Emit the normalized snapshot as JSON instead of menu text
    #[arg(short = 'j', long = "json", global = true)]
    json: bool,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    /// Verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch quota state and print the menu (default)
    Menu,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Generate default config file
    Init,
    /// Validate config file
    Check,
    /// Enable a provider
    Add {
        /// Provider ID to enable
        provider: String,
    },
    /// Disable a provider
    Remove {
        /// Provider ID to disable
        provider: String,
    },
}

// Diagnostics go to stderr only; stdout belongs to the menu markup.
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "quotabar=debug" } else { "quotabar=warn" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let output_opts = OutputOptions {
        format: if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Menu
        },
        pretty: cli.pretty,
        verbose: cli.verbose,
    };

    match cli.command {
        None | Some(Commands::Menu) => cli::menu_cmd::run(&output_opts).await?,
        Some(Commands::Config { action }) => match action {
            ConfigAction::Init => cli::config_cmd::init(&output_opts)?,
            ConfigAction::Check => cli::config_cmd::check(&output_opts)?,
            ConfigAction::Add { provider } => cli::config_cmd::add(&provider, &output_opts)?,
            ConfigAction::Remove { provider } => {
                cli::config_cmd::remove(&provider, &output_opts)?
            }
        },
    }

    Ok(())
}
