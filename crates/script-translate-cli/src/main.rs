//! Command-line front end for script-translate
//!
//! Usage:
//!   script-translate upload `<file>` [--markup]     - Store an artifact and print its lines
//!   script-translate extract `<name>` [--markup]    - Print the lines of a stored artifact
//!   script-translate save `<lines.json>` [--markup] - Rebuild an artifact from translated lines
//!   script-translate inspect `<name>`               - Show how each script line was classified
//!   script-translate path `<name>`                  - Print where a stored artifact lives
//!   script-translate translate `<name>` [--markup] [--save] - Translate every line of an artifact
//!   script-translate config [--init]                - Show (or create) the configuration
mod transport;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use script_translate_config::{Config, TranslationConfig};
use script_translate_engine::translate::DEFAULT_PROMPT;
use script_translate_engine::{
    ArtifactStore, ChatTransport, ExtractedScript, LineRecord, SaveRequest, ScriptMode,
    ScriptWorkflow, Translator, TranslatorSettings, decompose,
};
use std::path::{Path, PathBuf};
use std::time::Duration;
use transport::HttpTransport;

#[derive(Parser)]
#[command(name = "script-translate")]
#[command(version, about = "Extract, translate and rebuild m_Script pseudo-markup")]
struct Cli {
    /// Artifact store directory (defaults to the configured uploads path)
    #[arg(long, global = true)]
    uploads: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Copy a JSON artifact into the store and print its lines
    Upload {
        file: PathBuf,
        /// Parse m_Script as pseudo-markup
        #[arg(long)]
        markup: bool,
    },
    /// Print the lines of a stored artifact as JSON
    Extract {
        name: String,
        #[arg(long)]
        markup: bool,
    },
    /// Rebuild a stored artifact from a `{filename, lines}` JSON document
    Save {
        lines: PathBuf,
        /// Force markup reconstruction instead of auto-detection
        #[arg(long)]
        markup: bool,
    },
    /// Show the classification of every script line
    Inspect { name: String },
    /// Print the location of a stored artifact
    Path { name: String },
    /// Translate every line of a stored artifact through the chat backend
    Translate {
        name: String,
        /// Parse m_Script as pseudo-markup instead of auto-detecting
        #[arg(long)]
        markup: bool,
        /// Write the translation back into the stored artifact
        #[arg(long)]
        save: bool,
    },
    /// Show the config file location and effective translation settings
    Config {
        /// Write a default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

fn mode(markup: bool) -> ScriptMode {
    if markup {
        ScriptMode::Markup
    } else {
        ScriptMode::Plain
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();
    let config = Config::load_or_default().context("Failed to load config file")?;
    let uploads = cli.uploads.unwrap_or_else(|| config.uploads_path.clone());
    log::debug!("using artifact store at {}", uploads.display());

    let store = ArtifactStore::open(&uploads)
        .with_context(|| format!("Failed to open artifact store {}", uploads.display()))?;
    let workflow = ScriptWorkflow::new(&store).with_markup_threshold(config.markup_threshold);

    match cli.command {
        Command::Upload { file, markup } => {
            let name = file_name(&file)?;
            let bytes =
                std::fs::read(&file).with_context(|| format!("Failed to read {}", file.display()))?;
            let extracted = workflow.upload(&name, &bytes, mode(markup))?;
            log::info!("stored {name} with {} lines", extracted.lines.len());
            print_json(&extracted)?;
        }
        Command::Extract { name, markup } => {
            let extracted = workflow.extract(&name, mode(markup))?;
            print_json(&extracted)?;
        }
        Command::Save { lines, markup } => {
            let mut request = read_save_request(&lines)?;
            if markup {
                request.mode = ScriptMode::Markup;
            }
            let path = workflow.save(&request)?;
            log::info!("saved {} lines into {}", request.lines.len(), path.display());
            println!("{}", path.display());
        }
        Command::Inspect { name } => {
            let artifact = store.load(&name)?;
            for (i, record) in decompose(artifact.script()).iter().enumerate() {
                println!("{}", describe(i, record));
            }
        }
        Command::Path { name } => {
            if !store.contains(&name) {
                bail!("No stored artifact named {name}");
            }
            println!("{}", store.path_for(&name)?.display());
        }
        Command::Translate { name, markup, save } => {
            let translator =
                Translator::new(HttpTransport::new(), translator_settings(&config.translation));
            let (translated, saved) =
                translate_artifact(&workflow, &translator, &name, mode(markup), save)?;
            if let Some(path) = saved {
                log::info!("saved translation into {}", path.display());
            }
            print_json(&translated)?;
        }
        Command::Config { init: true } => {
            let path = Config::config_path();
            if init_config(&path)? {
                println!("created {}", path.display());
            } else {
                println!("{} already exists", path.display());
            }
        }
        Command::Config { init: false } => {
            println!("config file: {}", Config::config_path().display());
            println!("uploads:     {}", store.root().display());
            for line in describe_settings(&translator_settings(&config.translation)) {
                println!("{line}");
            }
        }
    }

    Ok(())
}

fn file_name(path: &Path) -> Result<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .with_context(|| format!("{} has no usable file name", path.display()))
}

fn print_json(extracted: &ExtractedScript) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(extracted)?);
    Ok(())
}

fn read_save_request(path: &Path) -> Result<SaveRequest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_save_request(&content).with_context(|| format!("Invalid lines file {}", path.display()))
}

fn parse_save_request(content: &str) -> Result<SaveRequest> {
    Ok(serde_json::from_str(content)?)
}

/// Translates the lines of `name`, optionally writing them back.
///
/// The mode is resolved up front so that the extracted lines and the save
/// agree on how the script is split.
fn translate_artifact<T: ChatTransport>(
    workflow: &ScriptWorkflow<'_>,
    translator: &Translator<T>,
    name: &str,
    requested: ScriptMode,
    save: bool,
) -> Result<(ExtractedScript, Option<PathBuf>)> {
    let mode = workflow.resolve(name, requested)?;
    let extracted = workflow.extract(name, mode)?;
    log::info!("translating {} lines of {name}", extracted.lines.len());
    let lines = translator
        .translate_lines(&extracted.lines)
        .with_context(|| format!("Failed to translate {name}"))?;

    let translated = ExtractedScript {
        filename: extracted.filename,
        lines,
    };
    let saved = if save {
        Some(workflow.save(&SaveRequest {
            filename: translated.filename.clone(),
            lines: translated.lines.clone(),
            mode,
        })?)
    } else {
        None
    };
    Ok((translated, saved))
}

/// Writes a default config to `path` unless one is already there.
fn init_config(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    Config::default()
        .save_to_path(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(true)
}

fn translator_settings(config: &TranslationConfig) -> TranslatorSettings {
    TranslatorSettings {
        api_url: config.api_url.clone(),
        api_key: config.api_key.clone(),
        model: config.model.clone(),
        temperature: config.temperature,
        max_attempts: config.max_attempts,
        retry_delay: Duration::from_millis(config.retry_delay_ms),
        timeout: Duration::from_secs(config.timeout_secs),
        prompt: config
            .prompt
            .clone()
            .unwrap_or_else(|| DEFAULT_PROMPT.to_string()),
    }
}

fn describe_settings(settings: &TranslatorSettings) -> Vec<String> {
    let configured = settings.api_url.as_deref().is_some_and(|u| !u.is_empty())
        && settings.api_key.as_deref().is_some_and(|k| !k.is_empty());
    vec![
        format!("api url:     {}", settings.api_url.as_deref().unwrap_or("-")),
        format!("api key:     {}", if configured { "set" } else { "missing" }),
        format!("model:       {}", settings.model),
        format!("temperature: {}", settings.temperature),
        format!(
            "retries:     {} attempts, {:?} apart",
            settings.max_attempts, settings.retry_delay
        ),
        format!("timeout:     {:?}", settings.timeout),
    ]
}

/// One inspection row: index, kind, indent, tag and content.
fn describe(index: usize, record: &LineRecord) -> String {
    format!(
        "{index:>4} {:<4} {:>3} {:<16} {:?}",
        record.kind().to_string(),
        record.indent(),
        record.tag_name().unwrap_or("-"),
        record.content()
    )
}
