//! `wormgrid` - run wormhole Game of Life examples and render their snapshots.
//!
//! ```bash
//! # Snapshot generations 1, 10, 100 and 1000 of examples/example-0
//! wormgrid run example-0
//!
//! # Custom milestones, written elsewhere
//! wormgrid run path/to/example --milestones 5 15 25 --output out/
//!
//! # Animate the snapshots
//! wormgrid gif example-0
//!
//! # Animate every example that has all its snapshots
//! wormgrid gif --examples-dir examples
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use wormgrid::assets::{self, DEFAULT_FRAME_MS, DEFAULT_GIF_NAME};
use wormgrid::driver::{resolve_folder, write_gifs_under, EXAMPLES_DIR};
use wormgrid::{LivePolicy, SimConfig, Simulation};

#[derive(Parser)]
#[command(name = "wormgrid")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate an example and write `<GEN>.png` at each milestone
    Run {
        /// Example folder, or the name of one under ./examples
        folder: String,

        /// Generations to snapshot (default: 1 10 100 1000)
        #[arg(short, long, num_args = 1.., value_name = "GEN")]
        milestones: Option<Vec<u64>>,

        /// TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Treat pixels whose channel mean is at least this value as live,
        /// instead of requiring pure white
        #[arg(long, value_name = "MEAN")]
        threshold: Option<u8>,

        /// Directory for snapshots (default: the example folder)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Step on a single thread
        #[arg(long, conflicts_with = "threads")]
        sequential: bool,

        /// Worker threads for parallel stepping (default: one per core)
        #[arg(short, long)]
        threads: Option<usize>,

        /// Store the final generation here
        #[cfg(feature = "checkpoint")]
        #[arg(long, value_name = "FILE")]
        checkpoint: Option<PathBuf>,

        /// Continue from a stored generation
        #[cfg(feature = "checkpoint")]
        #[arg(long, value_name = "FILE")]
        resume: Option<PathBuf>,
    },

    /// Combine milestone snapshots into an animated GIF
    Gif {
        /// Example folder, or the name of one under ./examples
        #[arg(required_unless_present = "examples_dir")]
        folder: Option<String>,

        /// Write a GIF into every example folder under this directory instead
        #[arg(short, long, value_name = "DIR", conflicts_with = "folder")]
        examples_dir: Option<PathBuf>,

        /// Generations whose snapshots become frames, in order
        #[arg(short, long, num_args = 1.., value_name = "GEN")]
        milestones: Option<Vec<u64>>,

        /// File name of the GIF inside the folder
        #[arg(short = 'n', long, default_value = DEFAULT_GIF_NAME)]
        output_name: String,

        /// Milliseconds per frame
        #[arg(short, long, default_value_t = DEFAULT_FRAME_MS)]
        duration: u32,
    },

    /// Verify that an example's assets exist and decode
    Check {
        /// Example folder, or the name of one under ./examples
        folder: String,
    },
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("wormgrid=debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    match execute(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn execute(command: Commands) -> anyhow::Result<()> {
    let examples_root = Path::new(EXAMPLES_DIR);
    match command {
        Commands::Run {
            folder,
            milestones,
            config,
            threshold,
            output,
            sequential,
            threads,
            #[cfg(feature = "checkpoint")]
            checkpoint,
            #[cfg(feature = "checkpoint")]
            resume,
        } => {
            let folder = resolve_folder(&folder, examples_root)?;
            let mut sim_config = match config {
                Some(path) => SimConfig::load(&path)?,
                None => SimConfig::default(),
            };
            if let Some(milestones) = milestones {
                sim_config.milestones = milestones;
            }
            if let Some(threshold) = threshold {
                sim_config.live_policy = LivePolicy::Threshold(threshold);
            }
            if output.is_some() {
                sim_config.output_dir = output;
            }
            if sequential {
                sim_config.parallel = false;
            }
            if let Some(threads) = threads {
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build_global()?;
            }

            let mut sim = Simulation::load(&folder, sim_config)
                .with_context(|| format!("failed to load {}", folder.display()))?;
            #[cfg(feature = "checkpoint")]
            if let Some(path) = resume {
                sim.resume(wormgrid::Checkpoint::load(&path)?)?;
            }
            for path in sim.run()? {
                println!("{}", path.display());
            }
            #[cfg(feature = "checkpoint")]
            if let Some(path) = checkpoint {
                sim.checkpoint().save(&path)?;
                info!("saved checkpoint to {}", path.display());
            }
            Ok(())
        }

        Commands::Gif {
            folder,
            examples_dir,
            milestones,
            output_name,
            duration,
        } => {
            let milestones = milestones.unwrap_or_else(|| wormgrid::DEFAULT_MILESTONES.to_vec());
            let folder = match (folder, examples_dir) {
                (_, Some(root)) => {
                    for out in write_gifs_under(&root, &milestones, &output_name, duration)? {
                        println!("{}", out.display());
                    }
                    return Ok(());
                }
                (Some(folder), None) => resolve_folder(&folder, examples_root)?,
                (None, None) => anyhow::bail!("either FOLDER or --examples-dir is required"),
            };
            let frames: Vec<PathBuf> = milestones
                .into_iter()
                .map(|generation| assets::snapshot_path(&folder, generation))
                .collect();
            let out = folder.join(output_name);
            assets::write_gif(&frames, &out, duration)?;
            println!("{}", out.display());
            Ok(())
        }

        Commands::Check { folder } => {
            let folder = resolve_folder(&folder, examples_root)?;
            for (name, (height, width)) in assets::inspect(&folder)? {
                println!("{}: {}x{} (width x height)", name, width, height);
            }
            Ok(())
        }
    }
}
