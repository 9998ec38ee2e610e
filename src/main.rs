/// codemap: structural symbol index for a codebase
///
/// Commands:
/// - init: full index of the project into `.codemap/`
/// - update: re-index changed files (or every stale file with --all)
/// - validate: report files whose content changed since indexing
/// - find / show / lines: query the index
/// - watch: keep the index current as files change
use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use codemap::config::CodemapConfig;
use codemap::indexer::{ErrorPreview, Indexer, UpdateOutcome};
use codemap::query::parse_line_query;
use codemap::watcher::WatchSession;
use codemap_extractors::SymbolKind;
use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "codemap")]
#[command(about = "Structural symbol index for codebases", long_about = None)]
#[command(version)]
struct Cli {
    /// Project root
    #[arg(short, long, global = true, default_value = ".")]
    root: PathBuf,

    /// Optional log file path for debug logging
    #[arg(long, global = true)]
    log: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Index the whole project from scratch
    Init {
        /// Only index these languages (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        languages: Vec<String>,

        /// Extra exclude globs
        #[arg(short, long)]
        exclude: Vec<String>,
    },

    /// Re-index the given files
    Update {
        files: Vec<PathBuf>,

        /// Re-index every stale file instead
        #[arg(short, long)]
        all: bool,
    },

    /// List indexed files that are stale; exits non-zero if any are
    Validate { files: Vec<PathBuf> },

    /// Find symbols by case-insensitive name substring
    Find {
        query: String,

        /// Only symbols of this type (class, method, ...)
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
    },

    /// Print the indexed entry of one file
    Show { file: PathBuf },

    /// Symbols overlapping a line range, e.g. `src/app.py:45-89`
    Lines { spec: String },

    /// Watch the project and re-index files as they change
    Watch {
        /// Debounce window in milliseconds
        #[arg(short, long)]
        debounce: Option<u64>,

        /// Do not print each update
        #[arg(short, long)]
        quiet: bool,
    },

    /// Index totals
    Stats,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log.as_ref())?;

    let root = cli.root;
    match cli.command {
        Commands::Init { languages, exclude } => init(&root, languages, exclude),
        Commands::Update { files, all } => update(&root, files, all),
        Commands::Validate { files } => validate(&root, files),
        Commands::Find { query, kind } => find(&root, &query, kind),
        Commands::Show { file } => show(&root, &file),
        Commands::Lines { spec } => lines(&root, &spec),
        Commands::Watch { debounce, quiet } => watch(&root, debounce, quiet),
        Commands::Stats => stats(&root),
    }
}

/// Initialize logging with optional file output
fn init_logging(log_path: Option<&PathBuf>) -> Result<()> {
    use tracing_subscriber::fmt::writer::MakeWriterExt;

    if let Some(log_file) = log_path {
        // With log file: info+ to file, warn+ to stderr
        let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

        let file_appender = tracing_appender::rolling::never(
            log_file.parent().unwrap_or_else(|| Path::new(".")),
            log_file
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("codemap.log"),
        );

        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(file_appender.and(std::io::stderr.with_max_level(tracing::Level::WARN)))
            .init();

        eprintln!("Debug logging enabled: {:?}", log_file);
    } else {
        let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    }

    Ok(())
}

fn load(root: &Path) -> Result<Indexer> {
    Indexer::load_existing(root).context("Run `codemap init` first")
}

fn init(root: &Path, languages: Vec<String>, exclude: Vec<String>) -> Result<()> {
    let start = Instant::now();
    let mut config = CodemapConfig::load(root).with_extra_excludes(exclude);
    if !languages.is_empty() {
        config.languages = languages;
    }

    let mut indexer = Indexer::new(root, config)?;
    let report = indexer.index_all()?;

    println!(
        "Indexed {} files ({} symbols) in {:.2}s",
        report.files_indexed,
        report.symbols_indexed,
        start.elapsed().as_secs_f64()
    );
    if !report.errors.is_empty() {
        println!("{} files had problems:", report.errors.len());
        print!("{}", ErrorPreview::new(&report.errors));
    }
    Ok(())
}

fn update(root: &Path, files: Vec<PathBuf>, all: bool) -> Result<()> {
    let mut indexer = load(root)?;

    if all {
        let report = indexer.update_all_stale()?;
        println!("Updated {} stale files", report.updated);
        if !report.errors.is_empty() {
            println!("{} files failed:", report.errors.len());
            print!("{}", ErrorPreview::new(&report.errors));
        }
        return Ok(());
    }

    if files.is_empty() {
        bail!("No files given; pass file paths or --all");
    }

    let mut errors = Vec::new();
    // Relative paths are resolved against --root by the indexer
    for file in files {
        match indexer.update(&file) {
            Ok(outcome) => println!("{}: {}", file.display(), describe(&outcome)),
            Err(e) => errors.push((file.display().to_string(), e.to_string())),
        }
    }
    if !errors.is_empty() {
        println!("{} files failed:", errors.len());
        print!("{}", ErrorPreview::new(&errors));
    }
    Ok(())
}

fn describe(outcome: &UpdateOutcome) -> String {
    match outcome {
        UpdateOutcome::Removed { was_indexed: true } => "removed from index".to_string(),
        UpdateOutcome::Removed { was_indexed: false } => "not found".to_string(),
        UpdateOutcome::Indexed {
            symbols,
            syntax_warning: Some(warning),
            ..
        } => format!("indexed {} symbols (syntax error: {})", symbols, warning),
        UpdateOutcome::Indexed {
            symbols,
            symbols_changed,
            ..
        } => format!("indexed {} symbols ({} changed)", symbols, symbols_changed),
        UpdateOutcome::Skipped => "skipped, no extractor for this file type".to_string(),
    }
}

fn validate(root: &Path, files: Vec<PathBuf>) -> Result<()> {
    let mut indexer = load(root)?;

    let stale: Vec<String> = if files.is_empty() {
        indexer.validate_all()
    } else {
        let mut stale = Vec::new();
        for file in files {
            if !indexer.validate(&file) {
                stale.push(file.display().to_string());
            }
        }
        stale
    };

    if stale.is_empty() {
        println!("All indexed files are up to date");
        return Ok(());
    }
    println!("{} stale files:", stale.len());
    for path in &stale {
        println!("  {}", path);
    }
    std::process::exit(1);
}

fn find(root: &Path, query: &str, kind: Option<String>) -> Result<()> {
    let mut indexer = load(root)?;
    let kind = kind.map(|k| SymbolKind::from_string(&k));
    let matches = indexer.find_symbol(query, kind.as_ref());
    debug!("find {:?} -> {} matches", query, matches.len());
    println!("{}", serde_json::to_string_pretty(&matches)?);
    Ok(())
}

fn show(root: &Path, file: &Path) -> Result<()> {
    let mut indexer = load(root)?;
    let rel_path = indexer.rel_path(file)?;
    match indexer.store_mut().get(&rel_path) {
        Some(entry) => println!("{}", serde_json::to_string_pretty(entry)?),
        None => bail!("{} is not indexed", rel_path),
    }
    Ok(())
}

fn lines(root: &Path, spec: &str) -> Result<()> {
    let query = parse_line_query(spec)?;
    let mut indexer = load(root)?;
    match indexer.symbols_in_range(Path::new(&query.path), &query.range)? {
        Some(matches) => println!("{}", serde_json::to_string_pretty(&matches)?),
        None => bail!("{} is not indexed", query.path),
    }
    Ok(())
}

fn watch(root: &Path, debounce: Option<u64>, quiet: bool) -> Result<()> {
    let mut indexer = match Indexer::load_existing(root) {
        Ok(indexer) => indexer,
        Err(codemap::CodemapError::NotFound(_)) => {
            info!("No index yet, building one before watching");
            let mut indexer = Indexer::new(root, CodemapConfig::load(root))?;
            indexer.index_all()?;
            indexer
        }
        Err(e) => return Err(e.into()),
    };

    let stale = indexer.update_all_stale()?;
    if stale.updated > 0 {
        println!("Caught up {} stale files", stale.updated);
    }
    if let Some(ms) = debounce {
        indexer.set_debounce_ms(ms);
    }

    let session = WatchSession::start(indexer, move |change, result| {
        if quiet {
            return;
        }
        match result {
            Ok(outcome) => println!("{}: {}", change.path.display(), describe(outcome)),
            Err(e) => println!("{}: failed: {}", change.path.display(), e),
        }
    })?;

    println!("Watching {} (press Enter to stop)", session.root().display());
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;

    if !session.stop() {
        eprintln!("Watcher threads did not stop cleanly");
    }
    Ok(())
}

fn stats(root: &Path) -> Result<()> {
    let mut indexer = load(root)?;
    let breakdown = indexer.store_mut().breakdown();
    let manifest = indexer.store().manifest();
    println!("Root:        {}", manifest.root);
    println!("Version:     {}", manifest.version);
    println!("Generated:   {}", manifest.generated_at.to_rfc3339());
    println!("Files:       {}", manifest.stats.total_files);
    println!("Symbols:     {}", manifest.stats.total_symbols);
    println!("Directories: {}", manifest.directories.len());
    if let Some(at) = manifest.stats.last_full_index {
        println!("Updated:     {}", at.to_rfc3339());
    }

    if !breakdown.files_by_language.is_empty() {
        println!("\nFiles by language:");
        for (language, count) in &breakdown.files_by_language {
            println!("  {}: {}", language, count);
        }
    }
    if !breakdown.symbols_by_kind.is_empty() {
        println!("\nSymbols by type:");
        for (kind, count) in breakdown.kinds_by_count() {
            println!("  {}: {}", kind, count);
        }
    }
    if !manifest.directories.is_empty() {
        println!("\nIndexed directories:");
        for directory in &manifest.directories {
            if directory.is_empty() {
                println!("  .codemap/ (root files)");
            } else {
                println!("  .codemap/{}/", directory);
            }
        }
    }
    Ok(())
}
