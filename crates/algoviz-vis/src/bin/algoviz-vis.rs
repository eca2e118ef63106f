//! Algoviz Visualization Server
//!
//! Serve the playback API, or replay one run in the terminal.

use std::path::PathBuf;
use std::time::Duration;

use algoviz_model::{AlgorithmFamily, PathAlgorithm, SortAlgorithm, SpeedLevel};
use algoviz_playback::PlaybackState;
use algoviz_vis::{
    Command as Control, ConsoleRenderer, DomainStatus, Preferences, VisServer, Workbench,
};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "algoviz-vis", version, about = "Step-by-step sorting and pathfinding visualizer")]
struct Cli {
    /// Preferences JSON to start from.
    #[arg(long, global = true)]
    preferences: Option<PathBuf>,

    /// Seed for reproducible sequences and grids.
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Speed level, 1 (very slow) to 5 (very fast).
    #[arg(long, global = true, value_parser = clap::value_parser!(u8).range(1..=5))]
    speed: Option<u8>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP and WebSocket server.
    Serve(ServeArgs),
    /// Play one run to completion in the terminal.
    Replay(ReplayArgs),
}

#[derive(Parser, Debug)]
struct ServeArgs {
    /// Port to listen on.
    #[arg(long, default_value_t = 3000)]
    port: u16,
}

#[derive(Parser, Debug)]
struct ReplayArgs {
    /// Which visualization to run. Defaults to the preferences' choice.
    #[arg(long, value_enum)]
    domain: Option<DomainChoice>,

    /// Algorithm name, e.g. `quick` or `astar`.
    #[arg(long)]
    algorithm: Option<String>,

    /// Sequence length or grid side.
    #[arg(long)]
    size: Option<usize>,

    /// Paint frames with 24-bit color.
    #[arg(long)]
    color: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DomainChoice {
    Sorting,
    Pathfinding,
}

impl From<DomainChoice> for AlgorithmFamily {
    fn from(choice: DomainChoice) -> Self {
        match choice {
            DomainChoice::Sorting => AlgorithmFamily::Sorting,
            DomainChoice::Pathfinding => AlgorithmFamily::Pathfinding,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Frames go to stdout, logs to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "algoviz_vis=info,algoviz_playback=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut prefs = match &cli.preferences {
        Some(path) => Preferences::load(path)?,
        None => Preferences::default(),
    };
    if let Some(seed) = cli.seed {
        prefs = prefs.with_seed(seed);
    }
    if let Some(speed) = cli.speed {
        prefs = prefs.with_speed(SpeedLevel::new(speed));
    }

    match cli.cmd {
        Command::Serve(args) => serve(&prefs, args).await,
        Command::Replay(args) => replay(prefs, args).await,
    }
}

async fn serve(prefs: &Preferences, args: ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    println!("Algoviz Visualizer");
    println!("==================");
    println!();
    println!("  Sorting:     {} ({} values)", prefs.sorting_algorithm, prefs.array_size);
    println!(
        "  Pathfinding: {} ({}x{} grid)",
        prefs.pathfinding_algorithm, prefs.grid_size, prefs.grid_size
    );
    println!("  Speed:       {}", prefs.speed.label());
    println!();
    println!("Starting visualization server on http://localhost:{}", args.port);
    println!();

    let server = VisServer::new(prefs)?;
    server.serve(args.port).await?;
    Ok(())
}

async fn replay(mut prefs: Preferences, args: ReplayArgs) -> Result<(), Box<dyn std::error::Error>> {
    let family = args.domain.map(AlgorithmFamily::from).unwrap_or(prefs.algorithm_type);
    prefs = prefs.with_algorithm_type(family);
    match family {
        AlgorithmFamily::Sorting => {
            if let Some(name) = &args.algorithm {
                prefs = prefs.with_sorting_algorithm(SortAlgorithm::from_name(name));
            }
            if let Some(size) = args.size {
                prefs = prefs.with_array_size(size);
            }
        }
        AlgorithmFamily::Pathfinding => {
            if let Some(name) = &args.algorithm {
                prefs = prefs.with_pathfinding_algorithm(PathAlgorithm::from_name(name));
            }
            if let Some(size) = args.size {
                prefs = prefs.with_grid_size(size);
            }
        }
    }

    let bench = Workbench::new(
        &prefs,
        Box::new(ConsoleRenderer::stdout().with_color(args.color)),
        Box::new(ConsoleRenderer::stdout().with_color(args.color)),
    )?;
    bench.command(family, Control::Play).await?;

    let mut poll = tokio::time::interval(Duration::from_millis(20));
    let status = loop {
        poll.tick().await;
        let status = bench.status(family).await;
        if status.state() == PlaybackState::Stopped {
            break status;
        }
    };

    println!();
    match status {
        DomainStatus::Sorting(status) if status.total_steps > 0 => {
            println!("Steps:       {}", status.total_steps);
            println!("Comparisons: {}", status.counters.comparisons);
            println!("Swaps:       {}", status.counters.swaps);
        }
        DomainStatus::Pathfinding(status) if status.total_steps > 0 => {
            println!("Steps:         {}", status.total_steps);
            println!("Visited nodes: {}", status.counters.visited_nodes);
            if status.counters.path_length > 0 {
                println!("Path length:   {}", status.counters.path_length);
            } else {
                println!("No path found");
            }
        }
        _ => println!("Nothing to animate"),
    }
    Ok(())
}
