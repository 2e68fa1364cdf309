//! Command-line front end for the freqdeck workflows.
//!
//! Each switch runs one workflow against the input and output directories.
//! Several switches can be combined; they always run in pipeline order:
//! meanings, phonetics, audio, images, decks.

use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use freqdeck::FetchClient;
use freqdeck_engine::{Engine, EngineOptions, Layout};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Build frequency-ranked Anki vocabulary decks.
#[derive(Parser, Debug)]
#[command(name = "freqdeck")]
#[command(version, about, long_about = None)]
struct Args {
    /// Generate meanings and example sentences for the lemma list
    #[arg(long)]
    meanings: bool,

    /// Look up phonetic transcriptions
    #[arg(long)]
    ipas: bool,

    /// Download word, meaning and example pronunciations
    #[arg(long)]
    audio: bool,

    /// Generate an image for every example sentence
    #[arg(long)]
    img: bool,

    /// Write the Anki import decks
    #[arg(long)]
    txt: bool,

    /// Directory holding lemma.txt, meanings.json and ipas.json
    #[arg(long, default_value = "input")]
    input_dir: PathBuf,

    /// Directory for decks, audio/ and img/
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,

    /// OpenRouter API token
    #[arg(long, env = "OPENROUTER_API_TOKEN", hide_env_values = true)]
    api_token: Option<String>,

    /// Chat model used for meanings
    #[arg(long)]
    model: Option<String>,

    /// Language of the pronunciations
    #[arg(long, default_value = "en")]
    language: String,

    /// Proxy for an extra image route (repeatable)
    #[arg(long = "proxy", value_name = "URL")]
    proxies: Vec<String>,

    /// Concurrent image downloads
    #[arg(long, default_value_t = 10)]
    image_workers: usize,

    /// Words per meanings request
    #[arg(long, default_value_t = 200)]
    batch_size: usize,

    /// Fraction of the total frequency a deck may hold
    #[arg(long, default_value_t = 0.3)]
    deck_share: f64,

    /// Enable verbose logging (use multiple times for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn any_operation(&self) -> bool {
        self.meanings || self.ipas || self.audio || self.img || self.txt
    }
}

fn init_tracing(verbose: u8) {
    let builder = tracing_subscriber::fmt().with_writer(std::io::stderr);

    if std::env::var_os("RUST_LOG").is_some() {
        builder.with_env_filter(EnvFilter::from_default_env()).init();
        return;
    }

    let log_level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    builder.with_max_level(log_level).init();
}

fn build_engine(args: &Args) -> Result<Engine, freqdeck::Error> {
    let mut builder = FetchClient::builder()
        .language(&args.language)
        .proxies(&args.proxies);
    if let Some(token) = &args.api_token {
        builder = builder.api_key(token);
    }
    if let Some(model) = &args.model {
        builder = builder.model(model);
    }

    let options = EngineOptions {
        meanings_batch: args.batch_size,
        image_workers: args.image_workers,
        deck_share: args.deck_share,
        ..Default::default()
    };

    Ok(Engine::from_client(builder.build()?)
        .with_layout(Layout::new(&args.input_dir, &args.output_dir))
        .with_options(options))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    let args = Args::parse();
    init_tracing(args.verbose);

    if !args.any_operation() {
        Args::command().print_help()?;
        return Ok(());
    }

    let engine = build_engine(&args)?;
    info!(
        input_dir = %args.input_dir.display(),
        output_dir = %args.output_dir.display(),
        routes = engine.client().route_count(),
        "Starting freqdeck"
    );

    if args.meanings {
        let report = engine.meanings().fetch().await?;
        println!(
            "Meanings: requested {}, {} batches, {} added",
            report.requested, report.batches, report.added
        );
    }

    if args.ipas {
        let report = engine.phonetics().fetch().await?;
        println!(
            "Phonetics: {} resolved, {} already known, {} failed",
            report.resolved, report.skipped, report.failed
        );
    }

    if args.audio {
        let report = engine.audio().fetch().await?;
        println!(
            "Audio: {} downloaded, {} already present",
            report.downloaded, report.skipped
        );
    }

    if args.img {
        let report = engine.images().fetch().await?;
        println!(
            "Images: {} downloaded, {} rejected, {} failed",
            report.downloaded,
            report.rejected,
            report.failed.len()
        );
    }

    if args.txt {
        for deck in engine.decks().build()? {
            println!("{}", deck);
        }
    }

    Ok(())
}
