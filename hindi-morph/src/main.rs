use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use env_logger::Builder;
use hindi_morph_lib::evaluate::{self, TestItem};
use hindi_morph_lib::{output, read_document, text, AnalysisResult, Analyzer};
use log::{info, LevelFilter};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "hindi-morph", about = "Rule-based Hindi morphological analyser")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors (overrides -v).
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyse a word or a text. If INPUT is omitted, reads lines from stdin.
    Analyze {
        input: Option<String>,

        #[command(flatten)]
        tables: Tables,

        #[arg(short, long, value_enum, default_value_t = Format::Json)]
        format: Format,

        /// Pretty-print JSON output.
        #[arg(long)]
        pretty: bool,

        /// Write the output to a file instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Score the analyser on labelled words and sample sentences.
    Evaluate {
        #[command(flatten)]
        tables: Tables,

        /// Labelled dataset (JSON array); the built-in dataset if omitted.
        #[arg(long)]
        test_data: Option<PathBuf>,

        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Write the built-in labelled dataset to a file.
    CreateTestData {
        #[arg(long, default_value_t = 100)]
        size: usize,

        #[arg(long)]
        out: PathBuf,
    },
    /// Write the active rule document.
    ExportRules {
        /// Rule file to load before exporting.
        #[arg(long)]
        rules: Option<PathBuf>,

        #[arg(long)]
        out: Option<PathBuf>,
    },
}

/// Replacement rule and dictionary files.
#[derive(clap::Args)]
struct Tables {
    #[arg(long)]
    rules: Option<PathBuf>,

    #[arg(long)]
    dict: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Text,
    Bracketed,
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.quiet {
        LevelFilter::Error
    } else {
        match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };
    Builder::new()
        .filter_level(log_level)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Analyze {
            input,
            tables,
            format,
            pretty,
            out,
        } => {
            let analyzer = load_analyzer(&tables)?;
            let rendered = match input {
                Some(input) => render(&analyzer, &input, format, pretty)?,
                None => {
                    let mut rendered = String::new();
                    for line in io::stdin().lock().lines() {
                        let line = line.context("failed to read stdin")?;
                        if !line.trim().is_empty() {
                            rendered.push_str(&render(&analyzer, &line, format, pretty)?);
                            rendered.push('\n');
                        }
                    }
                    rendered
                }
            };
            emit(&rendered, out.as_deref())
        }
        Command::Evaluate {
            tables,
            test_data,
            out,
        } => {
            let analyzer = load_analyzer(&tables)?;
            let items: Vec<TestItem> = match test_data {
                Some(path) => serde_json::from_value(read_json(&path)?)
                    .with_context(|| format!("{} is not a labelled dataset", path.display()))?,
                None => evaluate::builtin_dataset(100),
            };
            let report = json!({
                "metrics": evaluate::evaluate(&analyzer, &items),
                "errors": evaluate::error_analysis(&analyzer, &items),
                "sentences": evaluate::evaluate_sentences(&analyzer, evaluate::SAMPLE_SENTENCES),
            });
            emit(&serde_json::to_string_pretty(&report)?, out.as_deref())
        }
        Command::CreateTestData { size, out } => {
            let items = evaluate::builtin_dataset(size);
            emit(&serde_json::to_string_pretty(&items)?, Some(&out))?;
            info!("wrote {} items to {}", items.len(), out.display());
            Ok(())
        }
        Command::ExportRules { rules, out } => {
            let analyzer = load_analyzer(&Tables { rules, dict: None })?;
            let document = analyzer.snapshot().rules.to_document();
            emit(&serde_json::to_string_pretty(&document)?, out.as_deref())
        }
    }
}

fn load_analyzer(tables: &Tables) -> Result<Analyzer> {
    let analyzer = Analyzer::with_defaults();
    if let Some(path) = &tables.rules {
        analyzer
            .load_rules(&read_json(path)?)
            .with_context(|| format!("failed to load rules from {}", path.display()))?;
    }
    if let Some(path) = &tables.dict {
        analyzer
            .load_dictionary(&read_json(path)?)
            .with_context(|| format!("failed to load dictionary from {}", path.display()))?;
    }
    Ok(analyzer)
}

fn read_json(path: &Path) -> Result<Value> {
    read_document(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Analyse one input line. A line holding exactly one word (punctuation
/// aside) is a single word, anything else a text.
fn render(analyzer: &Analyzer, input: &str, format: Format, pretty: bool) -> Result<String> {
    let word = text::single_word(input);
    let is_text = word.is_none();
    let results: Vec<AnalysisResult> = match word {
        Some(word) => vec![analyzer.analyze_word(word)],
        None => analyzer.analyze_text(input),
    };

    Ok(match format {
        Format::Text => output::to_text(&results),
        Format::Bracketed => output::text_to_bracketed(&results),
        Format::Json => {
            let value = if is_text {
                serde_json::to_value(&results)?
            } else {
                serde_json::to_value(&results[0])?
            };
            if pretty {
                serde_json::to_string_pretty(&value)?
            } else {
                serde_json::to_string(&value)?
            }
        }
    })
}

fn emit(rendered: &str, out: Option<&Path>) -> Result<()> {
    match out {
        Some(path) => fs::write(path, rendered)
            .with_context(|| format!("failed to write {}", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", rendered.trim_end())?;
            Ok(())
        }
    }
}
