use anyhow::{Context, Result, bail};
use clap::Parser;
use neighbor_app::{
    ExploreRequest, ExportFormat, Explorer, LanguageCatalog, QueryOutcome, TreeView, write_export,
};
use neighbor_client::{CachedSource, GraphCache, GraphSource, HttpGraphSource, HttpSourceConfig};
use neighbor_core::TreeDirection;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod render;
mod settings;

use render::render_outline;
use settings::Settings;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Topic to explore. Without one, topics are read from stdin, one per line
    topic: Option<String>,

    /// Wikipedia language code
    #[arg(short, long)]
    lang: Option<String>,

    /// Predecessor depth requested from the graph service
    #[arg(long)]
    pred_levels: Option<u32>,

    /// Successor depth requested from the graph service
    #[arg(long)]
    succ_levels: Option<u32>,

    /// Make the edge source the parent instead of the edge target
    #[arg(short, long)]
    reverse: bool,

    /// Write the flattened names as CSV (`--csv=PATH`); a directory receives `<Topic>.csv`
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = ".")]
    csv: Option<PathBuf>,

    /// Write the tree as JSON (`--json=PATH`); a directory receives `<Topic>.json`
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = ".")]
    json: Option<PathBuf>,

    /// Print the flattened name list after the tree
    #[arg(long)]
    names: bool,

    /// Settings file (defaults to the per-user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Graph service base URL
    #[arg(long)]
    base_url: Option<String>,

    /// JSON file listing the selectable languages
    #[arg(long)]
    languages: Option<PathBuf>,

    /// Print the language catalog and exit
    #[arg(long)]
    list_languages: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();

    let settings = Settings::load(args.config.as_deref())?;
    let catalog = match args.languages.as_ref().or(settings.languages_file.as_ref()) {
        Some(path) => LanguageCatalog::load_or_empty(path),
        None => LanguageCatalog::default(),
    };

    if args.list_languages {
        let mut stdout = io::stdout().lock();
        for language in catalog.iter() {
            writeln!(stdout, "{}\t{}", language.code, language.name)?;
        }
        return Ok(ExitCode::SUCCESS);
    }

    let language = args.lang.clone().unwrap_or_else(|| settings.language.clone());
    if !catalog.accepts(&language) {
        bail!("Unknown language code '{language}'");
    }

    let http = HttpGraphSource::new(HttpSourceConfig {
        base_url: args.base_url.clone().unwrap_or_else(|| settings.base_url.clone()),
        timeout: Duration::from_secs(settings.timeout_secs),
        use_env_proxy: true,
    })
    .context("Failed to create graph client")?;
    info!(endpoint = http.endpoint(), %language, "Using graph service");

    let cache = Arc::new(GraphCache::new(settings.cache_capacity));
    let explorer = Explorer::new(CachedSource::new(http, cache));

    let template = ExploreRequest {
        topic: String::new(),
        language,
        pred_levels: args.pred_levels.unwrap_or(settings.pred_levels),
        succ_levels: args.succ_levels.unwrap_or(settings.succ_levels),
        direction: TreeDirection::from(args.reverse),
    };

    if let Some(topic) = &args.topic {
        let request = ExploreRequest {
            topic: topic.clone(),
            ..template
        };
        let ok = run_query(&explorer, &request, &args).await?;
        return Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE });
    }

    let mut failures = 0usize;
    for line in io::stdin().lock().lines() {
        let line = line.context("Failed to read topic from stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        let request = ExploreRequest {
            topic: line,
            ..template.clone()
        };
        if !run_query(&explorer, &request, &args).await? {
            failures += 1;
        }
    }
    let stats = explorer.source().cache().stats();
    info!(hits = stats.hits, misses = stats.misses, "Session finished");

    Ok(if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Runs one query and reports it. Returns `false` when the fetch failed.
async fn run_query<S: GraphSource>(
    explorer: &Explorer<S>,
    request: &ExploreRequest,
    args: &Args,
) -> Result<bool> {
    match explorer.explore(request).await {
        QueryOutcome::Tree(view) => {
            print_view(&view, args.names)?;
            export_view(&view, args)?;
            Ok(true)
        }
        QueryOutcome::NoRelations { topic } => {
            println!("No relations found for '{topic}'. Is it a Wikipedia entity?");
            Ok(true)
        }
        QueryOutcome::Failed { topic, reason } => {
            eprintln!("Error fetching '{topic}': {reason}");
            Ok(false)
        }
    }
}

fn print_view(view: &TreeView, with_names: bool) -> Result<()> {
    let mut stdout = io::stdout().lock();
    write!(stdout, "{}", render_outline(&view.tree))?;
    writeln!(
        stdout,
        "{} groups, {} names (panel height {}px)",
        view.top_level.len(),
        view.names.len(),
        view.panel_height
    )?;
    if with_names {
        for name in &view.names {
            writeln!(stdout, "{name}")?;
        }
    }
    Ok(())
}

fn export_view(view: &TreeView, args: &Args) -> Result<()> {
    let targets = [
        (args.csv.as_ref(), ExportFormat::Csv),
        (args.json.as_ref(), ExportFormat::Json),
    ];
    for (path, format) in targets {
        let Some(path) = path else { continue };
        let written = write_export(path, &view.topic, format, &view.tree, &view.names)
            .with_context(|| format!("Failed to export {}", format.extension()))?;
        println!("Wrote {}", written.display());
    }
    Ok(())
}
