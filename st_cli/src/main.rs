//! Console for running a Swiss table tournament.
//!
//! Reads commands from stdin, applies them to the tournament and saves the
//! result after every change so a session can be resumed later.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use ctrlc::set_handler;
use log::info;
use pico_args::Arguments;
use swiss_tables::narrative::NarrativeGenerator;

use st_cli::commands::parse_command;
use st_cli::config::CliConfig;
use st_cli::http_narrator::HttpNarrator;
use st_cli::session::{Reply, Session};

const HELP: &str = "\
Run a Swiss table tournament from the console

USAGE:
  st_cli [OPTIONS]

OPTIONS:
  --save FILE           Save file  [default: env ST_SAVE_FILE or tournament.json]
  --seed N              RNG seed for reproducible pairings  [default: env ST_SEED or random]
  --no-save             Keep the tournament in memory only

FLAGS:
  -h, --help            Print help information

ENVIRONMENT:
  ST_QUALIFYING_ROUNDS     Swiss rounds before the finals  [default: 3]
  ST_FINALS_SIZE           Finals table size, 3 to 5  [default: 4]
  ST_PAIRING_TRIALS        Optimizer swap trials per round  [default: 500]
  NARRATIVE_API_URL        generateContent endpoint for hype and reports
  NARRATIVE_API_KEY        API key; narrative commands are disabled without it
  NARRATIVE_MAX_ATTEMPTS   Attempts per narrative request  [default: 5]
  NARRATIVE_BASE_DELAY_MS  Backoff base after a rate limit  [default: 1000]
  NARRATIVE_TIMEOUT_MS     Per-request timeout  [default: 30000]
  (A .env file in the working directory is loaded if present)
";

struct Args {
    save_file: Option<PathBuf>,
    seed: Option<u64>,
    no_save: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        save_file: pargs.opt_value_from_str("--save")?,
        seed: pargs.opt_value_from_str("--seed")?,
        no_save: pargs.contains("--no-save"),
    };

    // Catching signals for exit.
    set_handler(|| std::process::exit(0))?;

    env_logger::builder().format_target(false).init();

    let config = CliConfig::from_env(args.save_file, args.seed, args.no_save)?;
    config.validate()?;

    let narrator: Option<Box<dyn NarrativeGenerator>> = match config.narrative.api_key.clone() {
        Some(key) => {
            let http = HttpNarrator::new(
                config.narrative.api_url.clone(),
                key,
                config.narrative.timeout,
            )?;
            Some(Box::new(http) as Box<dyn NarrativeGenerator>)
        }
        None => None,
    };
    if narrator.is_none() {
        info!("NARRATIVE_API_KEY not set; hype and report are disabled");
    }

    let mut session = Session::open(&config, narrator)?;
    if let Some(path) = &config.save_file {
        info!("Saving to {}", path.display());
    }

    run(&mut session).await
}

async fn run(session: &mut Session) -> Result<()> {
    println!("Type 'help' for commands.");
    let stdin = io::stdin();
    let mut input = String::new();

    loop {
        print!("> ");
        io::stdout().flush()?;

        input.clear();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }
        if input.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&input) {
            Ok(command) => command,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        match session.execute(command).await {
            Ok(Reply::Output(text)) => println!("{text}"),
            Ok(Reply::Quit) => break,
            Err(e) => println!("Error: {e:#}"),
        }
    }

    Ok(())
}
