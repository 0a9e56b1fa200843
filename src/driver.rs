//! The milestone loop that ties assets, topology and stepping together.

use crate::assets::{self, ExampleAssets};
use crate::{build_topology, Board, Conway, Error, Result, SimConfig, SquareGrid};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[cfg(feature = "checkpoint")]
use crate::Checkpoint;

/// Directory searched for bare example names.
pub const EXAMPLES_DIR: &str = "examples";

/// Accept either an existing directory or the name of one under `examples_root`.
pub fn resolve_folder(folder: &str, examples_root: &Path) -> Result<PathBuf> {
    let direct = PathBuf::from(folder);
    if direct.is_dir() {
        return Ok(direct);
    }
    let candidate = examples_root.join(folder);
    if candidate.is_dir() {
        return Ok(candidate);
    }
    Err(Error::MissingFolder(folder.to_string()))
}

/// Write `output_name` into every example folder under `root`, in name order, using the
/// snapshots of `milestones` as frames. Folders missing a snapshot are skipped with a
/// warning; any other failure aborts. Returns the GIFs written.
pub fn write_gifs_under(
    root: &Path,
    milestones: &[u64],
    output_name: &str,
    frame_ms: u32,
) -> Result<Vec<PathBuf>> {
    let mut folders = Vec::new();
    for entry in std::fs::read_dir(root)? {
        let path = entry?.path();
        if path.is_dir() {
            folders.push(path);
        }
    }
    folders.sort();

    let mut written = Vec::new();
    for folder in folders {
        let frames: Vec<PathBuf> = milestones
            .iter()
            .map(|&generation| assets::snapshot_path(&folder, generation))
            .collect();
        let out = folder.join(output_name);
        match assets::write_gif(&frames, &out, frame_ms) {
            Ok(()) => written.push(out),
            Err(Error::MissingAsset(missing)) => warn!(
                "skipping {}: no snapshot {}",
                folder.display(),
                missing.display()
            ),
            Err(e) => return Err(e),
        }
    }
    Ok(written)
}

/// One example loaded and ready to step.
#[derive(Debug)]
pub struct Simulation {
    grid: SquareGrid<Conway>,
    config: SimConfig,
    output_dir: PathBuf,
}

impl Simulation {
    /// Load the assets of `example` and build its neighbor table.
    pub fn load(example: &Path, config: SimConfig) -> Result<Self> {
        let assets = ExampleAssets::load(example, config.live_policy)?;
        let output_dir = config.output_dir_for(example);
        Self::from_assets(assets, config, output_dir)
    }

    pub fn from_assets(
        assets: ExampleAssets,
        config: SimConfig,
        output_dir: PathBuf,
    ) -> Result<Self> {
        let config = config.normalized()?;
        let (height, width) = assets.board.dim();
        let table = build_topology(height, width, &assets.horizontal, &assets.vertical)?;
        Ok(Self {
            grid: SquareGrid::new(Conway, table, assets.board),
            config,
            output_dir,
        })
    }

    #[inline]
    pub fn grid(&self) -> &SquareGrid<Conway> {
        &self.grid
    }

    #[inline]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    #[inline]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Step up to the last milestone, handing each milestone board to `on_milestone`.
    /// Milestones at or before the current generation are skipped.
    pub fn run_with<F>(&mut self, mut on_milestone: F) -> Result<()>
    where
        F: FnMut(u64, &Board) -> Result<()>,
    {
        let start = self.grid.generation();
        let pending: Vec<u64> = self
            .config
            .milestones
            .iter()
            .copied()
            .filter(|&m| m > start)
            .collect();
        debug!(start, ?pending, "running simulation");
        for milestone in pending {
            while self.grid.generation() < milestone {
                if self.config.parallel {
                    self.grid.step_parallel();
                } else {
                    self.grid.step();
                }
            }
            debug!(
                generation = milestone,
                population = self.grid.population(),
                "reached milestone"
            );
            on_milestone(milestone, self.grid.cells())?;
        }
        Ok(())
    }

    /// Step through every milestone, writing `<generation>.png` into the output directory.
    pub fn run(&mut self) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(&self.output_dir)?;
        let dir = self.output_dir.clone();
        let mut written = Vec::new();
        self.run_with(|generation, board| {
            let path = assets::snapshot_path(&dir, generation);
            assets::save_snapshot(board, &path)?;
            written.push(path);
            Ok(())
        })?;
        info!(
            "finished at generation {} ({} snapshots)",
            self.grid.generation(),
            written.len()
        );
        Ok(written)
    }

    /// The current board and generation.
    #[cfg(feature = "checkpoint")]
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            generation: self.grid.generation(),
            cells: self.grid.cells().clone(),
        }
    }

    /// Continue from a stored board instead of the starting position.
    #[cfg(feature = "checkpoint")]
    pub fn resume(&mut self, checkpoint: Checkpoint) -> Result<()> {
        let expected = self.grid.table().dim();
        if checkpoint.cells.dim() != expected {
            return Err(Error::AssetShape {
                asset: "checkpoint".into(),
                expected,
                found: checkpoint.cells.dim(),
            });
        }
        self.grid = SquareGrid::resume(
            Conway,
            self.grid.table().clone(),
            checkpoint.cells,
            checkpoint.generation,
        );
        info!("resumed at generation {}", checkpoint.generation);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PairMap;

    fn blinker() -> ExampleAssets {
        let board = Board::from_shape_fn((5, 5), |(y, x)| x == 2 && (1..=3).contains(&y));
        ExampleAssets {
            board,
            horizontal: PairMap::new(),
            vertical: PairMap::new(),
        }
    }

    #[test]
    fn visits_each_milestone_once() {
        let config = SimConfig {
            milestones: vec![3, 1, 2, 3],
            ..SimConfig::default()
        };
        let mut sim = Simulation::from_assets(blinker(), config, PathBuf::from(".")).unwrap();
        let mut seen = Vec::new();
        sim.run_with(|generation, board| {
            seen.push((generation, board[(2, 1)]));
            Ok(())
        })
        .unwrap();
        assert_eq!(seen, vec![(1, true), (2, false), (3, true)]);
        assert_eq!(sim.grid().generation(), 3);
    }

    #[test]
    fn missing_folder() {
        let err = resolve_folder("no-such-example", Path::new("no-such-root")).unwrap_err();
        assert!(matches!(err, Error::MissingFolder(_)));
    }

    #[cfg(feature = "checkpoint")]
    #[test]
    fn resume_skips_reached_milestones() {
        let config = SimConfig {
            milestones: vec![1, 2, 4],
            parallel: false,
            ..SimConfig::default()
        };
        let mut sim = Simulation::from_assets(blinker(), config, PathBuf::from(".")).unwrap();
        let mut checkpoint = sim.checkpoint();
        checkpoint.generation = 2;
        sim.resume(checkpoint).unwrap();
        let mut seen = Vec::new();
        sim.run_with(|generation, _| {
            seen.push(generation);
            Ok(())
        })
        .unwrap();
        assert_eq!(seen, vec![4]);
    }
}
