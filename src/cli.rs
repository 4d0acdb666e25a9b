use crate::adapter::{DefinitionTextProvider, FsDefinitionProvider};
use crate::canvas::GraphModel;
use crate::config::load_config;
use crate::layout::{Viewport, compute_plan_named};
use crate::listing::DirectoryListing;
use crate::parser::{load_canvas, parse_canvas};
use crate::plan_dump::{PlanDump, write_plan_dump};
use crate::sequencer::compute_sequence;
use anyhow::Result;
use clap::Parser;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "dsr", version, about = "DreamSong canvas layout engine")]
pub struct Args {
    /// Input canvas document (.canvas JSON) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file for the plan JSON. Defaults to stdout.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Layout strategy (mirror/grid/glossary/linear); overrides the config file
    #[arg(short = 's', long = "strategy")]
    pub strategy: Option<String>,

    /// Config JSON file (viewer-compatible camelCase keys)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// directory-listing.json used for companion media checks
    #[arg(short = 'l', long = "listing")]
    pub listing: Option<PathBuf>,

    /// Root directory holding <repo>/README.md definition texts
    #[arg(short = 'm', long = "mediaRoot")]
    pub media_root: Option<PathBuf>,

    /// Viewport width
    #[arg(short = 'w', long = "width", default_value_t = 1200.0)]
    pub width: f32,

    /// Viewport height
    #[arg(short = 'H', long = "height", default_value_t = 800.0)]
    pub height: f32,

    /// Print the repos referenced by the canvas and exit
    #[arg(long = "listRepos", default_value_t = false)]
    pub list_repos: bool,
}

pub fn run() -> Result<()> {
    init_logging();
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;
    let graph = read_graph(args.input.as_deref())?;

    if args.list_repos {
        for repo in graph.repo_references() {
            println!("{repo}");
        }
        return Ok(());
    }

    let listing = match args.listing.as_deref() {
        Some(path) => DirectoryListing::load(path).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "directory listing unavailable, media checks disabled");
            DirectoryListing::default()
        }),
        None => DirectoryListing::default(),
    };
    let definitions = args
        .media_root
        .as_ref()
        .map(|root| FsDefinitionProvider::new(root.clone()));

    let strategy = args
        .strategy
        .clone()
        .unwrap_or_else(|| config.strategy.clone());
    let viewport = Viewport {
        width: args.width,
        height: args.height,
    };

    let sequence = compute_sequence(&graph);
    let plan = compute_plan_named(&sequence, &strategy, viewport, &config.layout);
    let dump = PlanDump::from_plan(
        &plan,
        &sequence,
        &strategy,
        viewport,
        Some(&listing),
        definitions
            .as_ref()
            .map(|provider| provider as &dyn DefinitionTextProvider),
    );

    match args.output.as_deref() {
        Some(path) => write_plan_dump(path, &dump)?,
        None => println!("{}", serde_json::to_string_pretty(&dump)?),
    }
    Ok(())
}

/// Degradation warnings (unknown strategy, unreadable listing or
/// definition text) go to stderr; the plan JSON owns stdout.
fn init_logging() {
    let _ = tracing_subscriber::fmt().with_writer(io::stderr).try_init();
}

fn read_graph(path: Option<&Path>) -> Result<GraphModel> {
    if let Some(path) = path {
        if path == Path::new("-") {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            return Ok(parse_canvas(&buf)?);
        }
        return Ok(load_canvas(path)?);
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(parse_canvas(&buf)?)
}
