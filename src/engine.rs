use crate::{CellAddress, NeighborTable};
use ndarray::{Array2, Zip};
use tracing::trace;

/// Liveness of every cell, indexed `(row, col)`.
pub type Board = Array2<bool>;

/// A birth/survival rule over the number of distinct live neighbors.
///
/// Every new cell is computed only from the previous board, so update order can never
/// leak into the result.
pub trait Rule {
    fn next_state(&self, alive: bool, live_neighbors: usize) -> bool;
}

/// Conway's Game of Life (B3/S23).
#[derive(Copy, Clone, Debug, Default)]
pub struct Conway;

impl Rule for Conway {
    #[inline]
    fn next_state(&self, alive: bool, live_neighbors: usize) -> bool {
        if alive {
            (2..=3).contains(&live_neighbors)
        } else {
            live_neighbors == 3
        }
    }
}

/// Count the distinct live cells among the eight neighbor slots of `addr`.
#[inline]
pub fn live_neighbors(board: &Board, table: &NeighborTable, addr: CellAddress) -> usize {
    table
        .unique_neighbors(addr)
        .filter(|n| board[n.ix()])
        .count()
}

#[inline]
fn assert_same_shape(board: &Board, table: &NeighborTable) {
    assert_eq!(
        board.dim(),
        table.dim(),
        "wormgrid: board and neighbor table dimensions differ"
    );
}

/// Compute the next Conway generation.
pub fn advance(board: &Board, table: &NeighborTable) -> Board {
    advance_with(&Conway, board, table)
}

/// Compute the next Conway generation, spreading cells across the rayon pool.
pub fn advance_parallel(board: &Board, table: &NeighborTable) -> Board {
    advance_parallel_with(&Conway, board, table)
}

pub fn advance_with<R: Rule>(rule: &R, board: &Board, table: &NeighborTable) -> Board {
    assert_same_shape(board, table);
    Zip::indexed(board).map_collect(|ix, &alive| {
        rule.next_state(alive, live_neighbors(board, table, ix.into()))
    })
}

pub fn advance_parallel_with<R: Rule + Sync>(
    rule: &R,
    board: &Board,
    table: &NeighborTable,
) -> Board {
    assert_same_shape(board, table);
    Zip::indexed(board).par_map_collect(|ix, &alive| {
        rule.next_state(alive, live_neighbors(board, table, ix.into()))
    })
}

/// Represents the state of the simulation.
#[derive(Clone, Debug)]
pub struct SquareGrid<R = Conway> {
    rule: R,
    table: NeighborTable,
    cells: Board,
    generation: u64,
}

impl<R: Rule + Sync> SquareGrid<R> {
    /// Make a new grid at generation 0. Panics if `cells` and `table` differ in shape.
    pub fn new(rule: R, table: NeighborTable, cells: Board) -> Self {
        Self::resume(rule, table, cells, 0)
    }

    /// Make a grid that continues from an already reached generation.
    pub fn resume(rule: R, table: NeighborTable, cells: Board, generation: u64) -> Self {
        assert_same_shape(&cells, &table);
        Self {
            rule,
            table,
            cells,
            generation,
        }
    }

    /// Run the grid for one generation on the current thread.
    pub fn step(&mut self) {
        self.cells = advance_with(&self.rule, &self.cells, &self.table);
        self.generation += 1;
        trace!(generation = self.generation, "stepped");
    }

    /// Run the grid for one generation and parallelize the simulation.
    pub fn step_parallel(&mut self) {
        self.cells = advance_parallel_with(&self.rule, &self.cells, &self.table);
        self.generation += 1;
        trace!(generation = self.generation, "stepped");
    }

    #[inline]
    pub fn cells(&self) -> &Board {
        &self.cells
    }

    #[inline]
    pub fn into_cells(self) -> Board {
        self.cells
    }

    #[inline]
    pub fn table(&self) -> &NeighborTable {
        &self.table
    }

    /// Number of generations computed since generation 0.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }
}
