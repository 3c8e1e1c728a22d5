/*!
*   `mf`: encode, decode and identify multibase strings, and inspect, convert
*   or compute content identifiers.
*
*   Logging goes to stderr. Set `RUST_LOG` or pass `-v` to see it.
*/

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use multiformat_cli::commands::{self, CidArgs, DecodeArgs, EncodeArgs, IdentifyArgs};
use tracing_subscriber::filter;

/// CLI Arguments
#[derive(Parser, Debug)]
#[command(name = "mf", version, about, long_about = None, arg_required_else_help(true))]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encode data as a multibase string
    Encode(EncodeArgs),

    /// Decode a multibase string
    Decode(DecodeArgs),

    /// Print the encoding a multibase string uses
    Identify(IdentifyArgs),

    /// Content identifier operations
    Cid(CidArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            filter::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter::EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Logging failed, exiting...");

    let result = match &cli.command {
        Commands::Encode(args) => commands::encode(args),
        Commands::Decode(args) => commands::decode(args),
        Commands::Identify(args) => commands::identify(args),
        Commands::Cid(args) => commands::cid(args),
    };

    match result {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
