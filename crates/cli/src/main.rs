use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use folio_chunker::{BookChunker, BookStats, ChapterDetector, ChunkPolicy};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Chapter-aware text chunking for book ingestion", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for JSON)
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect chapter boundaries in a text file
    Chapters(ChaptersArgs),

    /// Split a text file into token-budgeted chunks
    Chunk(ChunkArgs),

    /// Show word, page, and reading-time statistics for a text file
    Stats(StatsArgs),
}

#[derive(Args)]
struct ChaptersArgs {
    /// Cleaned book text file
    file: PathBuf,

    /// Emit the chapter list as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ChunkArgs {
    /// Cleaned book text file
    file: PathBuf,

    /// Load the chunk policy from a TOML file (flags below override it)
    #[arg(long)]
    policy: Option<PathBuf>,

    /// Target chunk size in estimated tokens (soft limit)
    #[arg(long)]
    target_tokens: Option<usize>,

    /// Maximum chunk size in estimated tokens (hard ceiling)
    #[arg(long)]
    max_tokens: Option<usize>,

    /// Minimum chunk size in estimated tokens
    #[arg(long)]
    min_tokens: Option<usize>,

    /// Characters per estimated token
    #[arg(long)]
    chars_per_token: Option<usize>,

    /// Emit the full chunk list as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct StatsArgs {
    /// Cleaned book text file
    file: PathBuf,

    /// Emit the statistics as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let mut cli = Cli::parse();

    let json_output = match &cli.command {
        Commands::Chapters(args) => args.json,
        Commands::Chunk(args) => args.json,
        Commands::Stats(args) => args.json,
    };
    if json_output {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    match cli.command {
        Commands::Chapters(args) => run_chapters(args),
        Commands::Chunk(args) => run_chunk(args),
        Commands::Stats(args) => run_stats(args),
    }
}

fn read_text(path: &Path) -> Result<String> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    if text.trim().is_empty() {
        bail!("{} is empty", path.display());
    }
    Ok(text)
}

fn load_policy(args: &ChunkArgs) -> Result<ChunkPolicy> {
    let mut policy = match &args.policy {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read policy file {}", path.display()))?;
            toml::from_str(&raw)
                .with_context(|| format!("invalid policy file {}", path.display()))?
        }
        None => ChunkPolicy::default(),
    };

    if let Some(target) = args.target_tokens {
        policy.target_tokens = target;
    }
    if let Some(max) = args.max_tokens {
        policy.max_tokens = max;
    }
    if let Some(min) = args.min_tokens {
        policy.min_tokens = min;
    }
    if let Some(chars) = args.chars_per_token {
        policy.chars_per_token = chars;
    }

    Ok(policy)
}

fn run_chapters(args: ChaptersArgs) -> Result<()> {
    let text = read_text(&args.file)?;
    let chapters = ChapterDetector::new().detect(&text);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&chapters)?);
        return Ok(());
    }

    println!("{} chapter(s) detected", chapters.len());
    for (index, chapter) in chapters.iter().enumerate() {
        let title = chapter.title.as_deref().unwrap_or("(untitled)");
        let number = chapter
            .number
            .map_or_else(|| "-".to_string(), |n| n.to_string());
        println!(
            "{:>4}  number {:>4}  span {:>8}..{:<8}  {}",
            index + 1,
            number,
            chapter.start_offset,
            chapter.end_offset,
            title
        );
    }
    Ok(())
}

fn run_chunk(args: ChunkArgs) -> Result<()> {
    let text = read_text(&args.file)?;
    let policy = load_policy(&args)?;
    let chunker = BookChunker::new(policy).context("invalid chunk policy")?;

    log::info!(
        "chunking {} ({} bytes) with target {} / max {} / min {} tokens",
        args.file.display(),
        text.len(),
        policy.target_tokens,
        policy.max_tokens,
        policy.min_tokens
    );

    let chunks = chunker.chunk_book(&text)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&chunks)?);
        return Ok(());
    }

    for chunk in &chunks {
        let marker = if chunk.is_chapter_start { "*" } else { " " };
        let title = chunk.chapter_title.as_deref().unwrap_or("(untitled)");
        println!(
            "{} {:>4}/{:<4}  {:>6} tokens  {:>6} words  {}",
            marker, chunk.chunk_number, chunk.total_chunks, chunk.token_count, chunk.word_count, title
        );
    }
    println!("{}", BookChunker::get_stats(&chunks));
    Ok(())
}

fn run_stats(args: StatsArgs) -> Result<()> {
    let text = read_text(&args.file)?;
    let stats = BookStats::for_text(&text);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("words:           {}", stats.word_count);
    println!("pages:           {}", stats.page_count);
    println!("reading minutes: {}", stats.reading_minutes);
    Ok(())
}
