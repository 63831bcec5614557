//! CLI command definitions, routing, and tracing setup.

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use indicatif::{ProgressBar, ProgressStyle};
use mailsplit_core::pipeline::{GenerateConfig, GenerateResult, ProgressReporter};
use mailsplit_core::{Card, cards, classify};
use mailsplit_shared::{AppConfig, CategoryMapping, ClientConfig, init_config, load_config};
use tracing::{info, warn};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// mailsplit: split generated email drafts into six ready-to-use variants.
#[derive(Parser)]
#[command(
    name = "mailsplit",
    version,
    about = "Generate email drafts and split model output into six display-ready categories.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Send a prompt to the generation endpoint and show the six variants.
    Generate {
        /// What the emails should be about.
        prompt: String,

        /// Generation endpoint (overrides the config file).
        #[arg(long, env = "MAILSPLIT_ENDPOINT")]
        endpoint: Option<String>,

        /// Request timeout in seconds (overrides the config file).
        #[arg(long)]
        timeout: Option<u64>,

        /// Print JSON instead of cards.
        #[arg(long)]
        json: bool,

        /// Keep canonical order instead of showing subject lines first.
        #[arg(long)]
        canonical_order: bool,
    },

    /// Split already-generated text from a file or stdin.
    Split {
        /// Input file; stdin when omitted or `-`.
        file: Option<PathBuf>,

        /// Print JSON instead of cards.
        #[arg(long)]
        json: bool,

        /// Skip markup normalization.
        #[arg(long)]
        raw: bool,

        /// Keep canonical order instead of showing subject lines first.
        #[arg(long)]
        canonical_order: bool,
    },

    /// Strip markup from text in a file or stdin.
    Normalize {
        /// Input file; stdin when omitted or `-`.
        file: Option<PathBuf>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = ["mailsplit", "mailsplit_core", "mailsplit_client", "mailsplit_shared"]
        .map(|target| format!("{target}={level}"))
        .join(",");

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Generate {
            prompt,
            endpoint,
            timeout,
            json,
            canonical_order,
        } => cmd_generate(prompt, endpoint.as_deref(), timeout, json, canonical_order).await,
        Command::Split {
            file,
            json,
            raw,
            canonical_order,
        } => cmd_split(file.as_deref(), json, raw, canonical_order),
        Command::Normalize { file } => cmd_normalize(file.as_deref()),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(),
        },
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_generate(
    prompt: String,
    endpoint: Option<&str>,
    timeout: Option<u64>,
    json: bool,
    canonical_order: bool,
) -> Result<()> {
    let config = load_config()?;

    let mut client = ClientConfig::resolve(&config, endpoint)?;
    if let Some(secs) = timeout {
        client.timeout_secs = secs;
    }

    info!(endpoint = %client.endpoint, "generating emails");

    let generate_config = GenerateConfig { prompt, client };
    let reporter = CliProgress::new();
    let result = match mailsplit_core::pipeline::generate(&generate_config, &reporter).await {
        Ok(result) => result,
        Err(e) => {
            reporter.spinner.finish_and_clear();
            return Err(e.into());
        }
    };

    if json {
        let mut report = categories_json(&result.mapping, false);
        report.insert(
            "generated_at".into(),
            serde_json::Value::String(result.generated_at.to_rfc3339()),
        );
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let subject_first = config.display.subject_first && !canonical_order;
        print_cards(&cards(&result.mapping, subject_first));
    }

    Ok(())
}

/// Display preferences are the only thing `split` reads from the config file,
/// so an unreadable file degrades to defaults instead of failing the command.
fn config_or_default(loaded: mailsplit_shared::Result<AppConfig>) -> AppConfig {
    loaded.unwrap_or_else(|e| {
        warn!(error = %e, "ignoring unreadable config, using defaults");
        AppConfig::default()
    })
}

fn cmd_split(file: Option<&Path>, json: bool, raw: bool, canonical_order: bool) -> Result<()> {
    let config = config_or_default(load_config());
    let input = read_input(file)?;

    let mapping = classify(&input);
    info!(
        generated = mapping.generated_count(),
        "split complete"
    );

    if json {
        let report = categories_json(&mapping, raw);
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let subject_first = config.display.subject_first && !canonical_order;
    let mut rendered = cards(&mapping, subject_first);
    if raw {
        for card in &mut rendered {
            card.body = mapping.get(card.category).to_string();
        }
    }
    print_cards(&rendered);

    Ok(())
}

fn cmd_normalize(file: Option<&Path>) -> Result<()> {
    let input = read_input(file)?;
    println!("{}", mailsplit_markup::normalize(&input));
    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// Output helpers
// ---------------------------------------------------------------------------

/// Read a whole file, or stdin for `None` / `-`.
fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read {}", path.display())),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .wrap_err("failed to read stdin")?;
            Ok(buf)
        }
    }
}

/// `{ "categories": { key: text } }`, normalized unless `raw`.
fn categories_json(
    mapping: &CategoryMapping,
    raw: bool,
) -> serde_json::Map<String, serde_json::Value> {
    let categories: serde_json::Map<String, serde_json::Value> = cards(mapping, false)
        .into_iter()
        .map(|card| {
            let text = if raw {
                mapping.get(card.category).to_string()
            } else {
                card.body
            };
            (card.title.to_string(), serde_json::Value::String(text))
        })
        .collect();

    let mut report = serde_json::Map::new();
    report.insert("categories".into(), serde_json::Value::Object(categories));
    report
}

fn print_cards(cards: &[Card]) {
    for card in cards {
        println!("{}", card.title);
        println!("{}", "─".repeat(card.title.chars().count()));
        println!("{}", card.body);
        println!();
    }
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .expect("valid spinner template")
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(format!("{name}..."));
    }

    fn done(&self, result: &GenerateResult) {
        self.spinner.finish_and_clear();
        info!(
            elapsed_ms = result.elapsed.as_millis() as u64,
            generated = result.mapping.generated_count(),
            "emails ready"
        );
    }
}
