// Entrypoint for the CLI application.
// - Parses flags and the command with clap.
// - Builds an API client (logging in when a password was given) and
//   runs exactly one command against it.
// - Returns `anyhow::Result`, so any failure prints its report and the
//   process exits non-zero.

use anyhow::Result;
use clap::{Parser, Subcommand};

use wordfreq_cli::api::{ApiClient, Options};
use wordfreq_cli::ui;

#[derive(Parser, Debug)]
#[command(
    name = "wordfreq-cli",
    about = "Command-line client for the word-frequency API"
)]
struct Cli {
    /// Base URL of the API, e.g. http://localhost:8080
    #[arg(short, long, value_name = "URL")]
    url: String,

    /// Password for the login endpoint; omit for unauthenticated access
    #[arg(short, long, value_name = "PASSWORD")]
    password: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print every known word
    #[command(name = "getWords")]
    GetWords,

    /// Print per-word occurrence counts
    #[command(name = "getOccurences", alias = "getOccurrences")]
    GetOccurrences,

    /// Add a word, then print the updated word list
    #[command(name = "addWord")]
    AddWord {
        /// The word to add
        word: String,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let options = Options {
        base_url: cli.url,
        password: cli.password,
    };

    // Login is a round trip of its own, so it gets its own spinner.
    let client = if options.password.as_deref().is_some_and(|p| !p.is_empty()) {
        ui::fetch("Logging in...", || ApiClient::new(options))
    } else {
        ApiClient::new(options)
    }
    .map_err(ui::describe)?;

    match cli.command {
        Commands::GetWords => {
            let words = ui::fetch("Fetching words...", || client.get_words())
                .map_err(ui::describe)?;
            ui::print_response(words);
        }
        Commands::GetOccurrences => {
            let occurrences = ui::fetch("Fetching occurrences...", || client.get_occurrences())
                .map_err(ui::describe)?;
            ui::print_response(occurrences);
        }
        Commands::AddWord { word } => {
            let words = ui::fetch("Adding word...", || client.add_word(&word))
                .map_err(ui::describe)?;
            ui::print_response(words);
        }
    }

    Ok(())
}
