// Command-line front end: score texts, files, or whole directories.
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use tracing::{debug, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use walkdir::WalkDir;

use vaders::{AnalyzerConfig, Label, LoadMode, Sentiment, SentimentIntensityAnalyzer};

#[derive(Parser)]
#[command(name = "vaders", about = "Rule-based sentiment intensity scoring (VADER)")]
struct Cli {
    #[command(flatten)]
    opts: GlobalOpts,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone)]
struct GlobalOpts {
    /// Tab-separated word -> valence table
    #[arg(long, global = true, env = "VADERS_LEXICON")]
    lexicon: Option<PathBuf>,
    /// Tab-separated emoji -> description table
    #[arg(long, global = true, env = "VADERS_EMOJI")]
    emoji: Option<PathBuf>,
    /// JSON config naming both tables; flags above take precedence.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// Skip malformed table lines instead of failing.
    #[arg(long, global = true)]
    lenient: bool,
    /// Emit one JSON object per result instead of a table.
    #[arg(long, global = true)]
    json: bool,
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Score each TEXT argument
    Score {
        #[arg(required = true)]
        texts: Vec<String>,
    },
    /// Score a document line by line
    File {
        path: PathBuf,
    },
    /// Score every text document under a directory
    Dir {
        #[arg(short, long)]
        dir: PathBuf,
        /// Write the report as JSON here instead of printing it.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
struct Scored {
    text: String,
    #[serde(flatten)]
    sentiment: Sentiment,
    label: Label,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
struct FileReport {
    path: String,
    lines: usize,
    mean_compound: f64,
    label: Label,
}

const ALLOWED_EXTS: [&str; 5] = ["txt", "md", "csv", "json", "pdf"];

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("vaders=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("vaders=warn"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(io::stderr))
        .init();
}

fn build_analyzer(opts: &GlobalOpts) -> Result<SentimentIntensityAnalyzer> {
    let mut cfg = match &opts.config {
        Some(p) => AnalyzerConfig::load_from_file(p)?,
        None => AnalyzerConfig::default(),
    };
    if let Some(l) = &opts.lexicon {
        cfg.lexicon = l.clone();
    }
    if let Some(e) = &opts.emoji {
        cfg.emoji = e.clone();
    }
    if opts.lenient {
        cfg.mode = LoadMode::Lenient;
    }
    debug!(?cfg, "loading knowledge base");
    SentimentIntensityAnalyzer::from_config(&cfg)
        .with_context(|| format!("loading {} and {}", cfg.lexicon.display(), cfg.emoji.display()))
}

fn read_text_file(p: &Path) -> Result<String> {
    let mut s = String::new();
    let mut f = File::open(p)?;
    f.read_to_string(&mut s)?;
    Ok(s)
}

fn read_file_content(p: &Path) -> Result<String> {
    let ext = p.extension().and_then(|s| s.to_str()).unwrap_or("");
    match ext {
        "pdf" => pdf_extract::extract_text(p).map_err(|e| anyhow!("PDF extraction failed: {}", e)),
        e if ALLOWED_EXTS.contains(&e) => read_text_file(p),
        _ => Err(anyhow!("Unsupported file format: {}", ext)),
    }
}

fn score_one(analyzer: &SentimentIntensityAnalyzer, text: &str) -> Scored {
    let sentiment = analyzer.polarity_scores(text);
    Scored {
        text: text.to_string(),
        label: sentiment.label(),
        sentiment,
    }
}

fn score_lines(analyzer: &SentimentIntensityAnalyzer, text: &str) -> Vec<Scored> {
    let lines: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    let sentiments = analyzer.polarity_scores_batch(&lines);
    lines
        .into_iter()
        .zip(sentiments)
        .map(|(line, sentiment)| Scored {
            text: line.to_string(),
            label: sentiment.label(),
            sentiment,
        })
        .collect()
}

fn summarize(path: &Path, scored: &[Scored]) -> FileReport {
    let mean_compound = if scored.is_empty() {
        0.0
    } else {
        scored.iter().map(|s| s.sentiment.compound).sum::<f64>() / scored.len() as f64
    };
    let label = Sentiment {
        compound: mean_compound,
        ..Sentiment::default()
    }
    .label();
    FileReport {
        path: path.to_string_lossy().to_string(),
        lines: scored.len(),
        mean_compound,
        label,
    }
}

fn score_dir(analyzer: &SentimentIntensityAnalyzer, dir: &Path) -> Result<Vec<FileReport>> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .and_then(|s| s.to_str())
                .map(|ext| ALLOWED_EXTS.contains(&ext))
                .unwrap_or(false)
        })
        .map(|e| e.path().to_path_buf())
        .collect();

    files.sort();

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {wide_bar} {pos}/{len} {msg}")?
            .progress_chars("=>-"),
    );

    let reports: Vec<FileReport> = files
        .par_iter()
        .filter_map(|p| {
            pb.inc(1);
            match read_file_content(p) {
                Ok(text) => Some(summarize(p, &score_lines(analyzer, &text))),
                Err(e) => {
                    warn!(path = %p.display(), error = %e, "skipping unreadable file");
                    None
                }
            }
        })
        .collect();

    pb.finish_with_message("scoring files");
    Ok(reports)
}

fn label_color(label: Label) -> Color {
    match label {
        Label::Positive => Color::Green,
        Label::Negative => Color::Red,
        Label::Neutral => Color::Yellow,
    }
}

fn write_scored<W: WriteColor>(out: &mut W, scored: &[Scored], json: bool) -> Result<()> {
    for s in scored {
        if json {
            writeln!(out, "{}", serde_json::to_string(s)?)?;
            continue;
        }
        let r = s.sentiment.rounded();
        out.set_color(ColorSpec::new().set_fg(Some(label_color(s.label))).set_bold(true))?;
        write!(out, "{:<8}", s.label)?;
        out.reset()?;
        writeln!(
            out,
            " compound={:>7.4} neg={:.3} neu={:.3} pos={:.3}  {}",
            r.compound, r.negative, r.neutral, r.positive, s.text
        )?;
    }
    Ok(())
}

fn write_reports<W: WriteColor>(out: &mut W, reports: &[FileReport], json: bool) -> Result<()> {
    for r in reports {
        if json {
            writeln!(out, "{}", serde_json::to_string(r)?)?;
            continue;
        }
        out.set_color(ColorSpec::new().set_fg(Some(label_color(r.label))).set_bold(true))?;
        write!(out, "{:<8}", r.label)?;
        out.reset()?;
        writeln!(out, " mean={:>7.4} lines={:<5} {}", r.mean_compound, r.lines, r.path)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.opts.verbose);

    let analyzer = build_analyzer(&cli.opts)?;
    let mut stdout = StandardStream::stdout(if cli.opts.json { ColorChoice::Never } else { ColorChoice::Auto });

    match cli.command {
        Commands::Score { texts } => {
            let scored: Vec<Scored> = texts.iter().map(|t| score_one(&analyzer, t)).collect();
            write_scored(&mut stdout, &scored, cli.opts.json)?;
        }
        Commands::File { path } => {
            let text = read_file_content(&path)?;
            write_scored(&mut stdout, &score_lines(&analyzer, &text), cli.opts.json)?;
        }
        Commands::Dir { dir, out } => {
            let reports = score_dir(&analyzer, &dir)?;
            match out {
                Some(out) => {
                    let fout = File::create(&out)?;
                    serde_json::to_writer_pretty(fout, &reports)?;
                    println!("Wrote report to {}", out.display());
                }
                None => write_reports(&mut stdout, &reports, cli.opts.json)?,
            }
        }
    }
    Ok(())
}
