use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use sapling::render::{RenderAdapter, TextSurface};
use sapling::{Key, SearchEvent, SearchMode, Visualizer, VisualizerConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sapling", about = "Balanced binary tree search visualizer")]
struct Cli {
    /// RNG seed for reproducible key sets
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Number of keys in the tree (1-100)
    #[arg(long, global = true, default_value_t = 7)]
    size: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build a tree and print its keys and shape.
    Build,
    /// Build a tree and print node positions and edges for a canvas.
    Layout {
        /// Canvas width in display units.
        #[arg(long, default_value_t = 1200.0)]
        width: f64,
        /// Canvas height in display units.
        #[arg(long, default_value_t = 650.0)]
        height: f64,
    },
    /// Build a tree and animate a search over it.
    Search {
        /// Value to look for (defaults to 50).
        #[arg(long)]
        target: Option<String>,
        /// Search strategy.
        #[arg(long, value_enum, default_value_t = Mode::Binary)]
        mode: Mode,
        /// Milliseconds to pause after each visited node.
        #[arg(long, default_value_t = 100)]
        delay_ms: u64,
        /// Also print the draw commands issued to the canvas.
        #[arg(long)]
        draw: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    Linear,
    Binary,
}

impl From<Mode> for SearchMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Linear => SearchMode::Linear,
            Mode::Binary => SearchMode::Binary,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = VisualizerConfig::default().with_initial_size(cli.size);
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    let mut viz = Visualizer::try_new(config)
        .with_context(|| format!("cannot build a tree of size {}", cli.size))?;
    println!("{}", sapling::rebuild_message(cli.size));

    match cli.command {
        Commands::Build => run_build(&viz),
        Commands::Layout { width, height } => run_layout(&mut viz, width, height)?,
        Commands::Search {
            target,
            mode,
            delay_ms,
            draw,
        } => run_search(&mut viz, target.as_deref(), mode.into(), delay_ms, draw)?,
    }

    Ok(())
}

fn run_build(viz: &Visualizer) {
    let tree = viz.tree();
    println!("keys:  {:?}", tree.keys_in_order());
    println!("depth: {}", tree.depth());
    if let Some(root) = tree.root() {
        println!("shape: {}", root);
    }
}

fn run_layout(viz: &mut Visualizer, width: f64, height: f64) -> Result<()> {
    viz.resize(width, height);
    let layout = viz.layout().context("layout failed")?;

    println!(
        "depth={} spacing={:.1} radius={:.1}",
        layout.depth, layout.vertical_spacing, layout.radius
    );
    for level in 0..layout.depth {
        let row: Vec<String> = layout
            .level(level)
            .iter()
            .map(|p| format!("{}@({:.1}, {:.1})", p.key, p.x, p.y))
            .collect();
        println!("level {}: {}", level, row.join("  "));
    }
    for edge in &layout.edges {
        println!(
            "edge {}->{}: ({:.1}, {:.1}) -> ({:.1}, {:.1})",
            edge.parent, edge.child, edge.from_x, edge.from_y, edge.to_x, edge.to_y
        );
    }
    Ok(())
}

fn run_search(
    viz: &mut Visualizer,
    target: Option<&str>,
    mode: SearchMode,
    delay_ms: u64,
    draw: bool,
) -> Result<()> {
    let target: Key = match target {
        Some(raw) => raw
            .trim()
            .parse()
            .context("Please enter a valid integer for the target value.")?,
        None => viz.config().default_target,
    };

    let layout = viz.layout().context("layout failed")?;
    let mut adapter = RenderAdapter::new(TextSurface::new());
    adapter.paint(&layout, viz.tree());
    if draw {
        print_commands(&mut adapter);
    }

    println!("{}", sapling::search_started_message(mode, target));
    viz.set_step_delay(Duration::from_millis(delay_ms));
    let outcome = viz.animate(target, mode, |event, _| {
        adapter.apply(event);
        if let SearchEvent::Step { key, .. } = event {
            println!("visit {}", key);
        }
        if draw {
            print_commands(&mut adapter);
        }
    });

    match outcome {
        Some(outcome) => println!("{} ({} steps)", outcome, outcome.steps),
        None => println!("Search cancelled."),
    }
    Ok(())
}

fn print_commands(adapter: &mut RenderAdapter<TextSurface>) {
    for command in adapter.surface_mut().drain() {
        println!("  {}", command);
    }
}
