use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use brewsearch_cli::{loader, render};
use brewsearch_core::config::{expand_path, Config};
use brewsearch_core::{SearchHit, SimilaritySearch};
use brewsearch_text::{Corpus, SearchIndex, Stopwords};

#[derive(Debug, Parser)]
#[command(name = "brewsearch", version, about = "Find beers by description, or beers similar to one you like")]
struct Cli {
    /// Record CSV; overrides `data.records_csv`
    #[arg(long, global = true)]
    data: Option<String>,

    /// Directory holding brewsearch*.toml
    #[arg(long, global = true, default_value = ".")]
    config_dir: PathBuf,

    /// Maximum number of results; overrides `search.default_limit`
    #[arg(short = 'n', long, global = true)]
    limit: Option<usize>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rank beers against free text
    Query { text: Vec<String> },
    /// Rank beers against the beer at ROW (0-based, after duplicates are removed)
    Similar { row: usize },
    /// Search interactively
    Repl,
    /// Print index statistics
    Stats,
}

struct Session<'a> {
    index: &'a SearchIndex,
    limit: usize,
    json: bool,
}

impl Session<'_> {
    fn print_hits(&self, corpus: &Corpus, hits: &[SearchHit]) -> anyhow::Result<()> {
        if self.json {
            println!("{}", render::render_json(corpus, hits)?);
        } else {
            print!("{}", render::render_hits(corpus, hits));
            if render::no_close_matches(hits) { println!(); }
        }
        Ok(())
    }

    fn query(&self, text: &str) -> anyhow::Result<Vec<SearchHit>> {
        let corpus = self.index.corpus()?;
        let hits = self.index.query(text, self.limit)?;
        self.print_hits(&corpus, &hits)?;
        Ok(hits)
    }

    fn similar(&self, row: usize) -> anyhow::Result<Vec<SearchHit>> {
        let corpus = self.index.corpus()?;
        let document = corpus
            .documents()
            .get(row)
            .with_context(|| format!("row {} out of range (0..{})", row, corpus.len()))?;
        if !self.json { println!("{}\n", render::because_you_like(document)); }
        let hits = self.index.find_similar_to(document.id(), self.limit)?;
        self.print_hits(&corpus, &hits)?;
        Ok(hits)
    }

    fn repl(&self) -> anyhow::Result<()> {
        println!("Type to search. /similar N re-ranks by the N-th result, /stats, /help, /quit.");
        let stdin = io::stdin();
        let mut last: Vec<SearchHit> = Vec::new();
        loop {
            print!("search> ");
            io::stdout().flush()?;
            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 { break; }
            let input = line.trim();
            if input.is_empty() { continue; }
            match input.split_once(' ').unwrap_or((input, "")) {
                ("/quit" | "/q", _) => break,
                ("/help" | "/h", _) => println!("<text>  search\n/similar N  beers like result N\n/stats  index statistics\n/quit  exit"),
                ("/stats" | "/s", _) => println!("{}", render::render_stats(&self.index.corpus()?.stats())),
                ("/similar", arg) => {
                    let picked = arg.trim().parse::<usize>().ok().and_then(|n| n.checked_sub(1)).and_then(|i| last.get(i));
                    let Some(hit) = picked else { println!("usage: /similar N, with N a rank from the last result list"); continue };
                    let corpus = self.index.corpus()?;
                    let Some(row) = corpus.position(hit.id) else { continue };
                    last = self.similar(row)?;
                }
                _ => last = self.query(input)?,
            }
        }
        Ok(())
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn build(index: &SearchIndex, records_path: &std::path::Path, stopwords: &Stopwords) -> anyhow::Result<()> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.set_message("Initializing search engine");
    spinner.enable_steady_tick(Duration::from_millis(100));
    let outcome = loader::load_records(records_path)
        .and_then(|records| index.build(records, stopwords).map_err(brewsearch_core::Error::from));
    spinner.finish_and_clear();
    outcome.map(|_| ()).with_context(|| format!("building index from {}", records_path.display()))
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    let config = Config::load_in(&cli.config_dir).map_err(|e| { eprintln!("Error loading config: {}", e); e })?;
    let settings = config.search_settings()?;
    let records_path = match &cli.data { Some(p) => expand_path(p), None => config.records_path()? };
    let stopwords = Stopwords::from_settings(&settings);

    let index = SearchIndex::new();
    build(&index, &records_path, &stopwords)?;
    let session = Session { index: &index, limit: cli.limit.unwrap_or(settings.default_limit), json: cli.json };

    match cli.command {
        Command::Query { text } => { session.query(&text.join(" "))?; }
        Command::Similar { row } => { session.similar(row)?; }
        Command::Repl => session.repl()?,
        Command::Stats => println!("{}", render::render_stats(&index.corpus()?.stats())),
    }
    Ok(())
}
