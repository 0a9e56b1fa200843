//! Wormgrid runs Conway's Game of Life on a finite rectangular board whose adjacency is
//! rewired by wormhole portals.
//!
//! The board never wraps. Each cell has up to four orthogonal neighbors, resolved once
//! per board into a [`NeighborTable`] by [`build_topology`]; diagonals are reached by
//! chaining a vertical and a horizontal hop. Every generation is a full recomputation
//! from the previous board via [`advance`], counting each distinct neighboring cell once
//! no matter how many routes lead to it.

mod address;
pub mod assets;
#[cfg(feature = "checkpoint")]
mod checkpoint;
mod config;
mod direction;
pub mod driver;
mod engine;
mod error;
mod neighborhood;
mod portal;
mod topology;

pub use address::*;
pub use assets::{ExampleAssets, LivePolicy};
#[cfg(feature = "checkpoint")]
pub use checkpoint::*;
pub use config::*;
pub use direction::*;
pub use driver::Simulation;
pub use engine::*;
pub use error::*;
pub use neighborhood::*;
pub use portal::*;
pub use topology::*;
