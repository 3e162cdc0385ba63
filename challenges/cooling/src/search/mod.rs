//! Exhaustive backtracking count of Hamiltonian paths from `start` to `end`.
//!
//! The search extends the path one cell at a time. Before expanding a node it
//! runs two pruning checks, either of which proves that no completion exists:
//!
//! - *minimum degree*: some free cell can no longer be entered and left
//!   (`has_stranded_cell`);
//! - *vertex cut*: the free cells no longer form one connected region
//!   (`is_vertex_cut`).
//!
//! Neither check changes the count, only how much of the tree gets walked.

mod prune;

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::thread;

use log::{debug, trace};

use crate::bits::BitSet;
use crate::error::Error;
use crate::grid::{Cell, Grid};

/// Stack reserved per path cell on the search thread, on top of `BASE_STACK`.
const FRAME_BYTES: usize = 4 * 1024;
const BASE_STACK: usize = 1 << 20;

/// Which pruning checks run before each expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pruning {
    pub min_degree: bool,
    pub vertex_cut: bool,
}

impl Pruning {
    pub const ALL: Pruning = Pruning {
        min_degree: true,
        vertex_cut: true,
    };

    pub const NONE: Pruning = Pruning {
        min_degree: false,
        vertex_cut: false,
    };
}

impl Default for Pruning {
    fn default() -> Self {
        Pruning::ALL
    }
}

/// Counters collected over one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Search nodes entered, the root included.
    pub nodes: u64,
    pub degree_prunes: u64,
    pub cut_prunes: u64,
    /// Complete paths found; the result of the run.
    pub paths: u64,
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "nodes: {}, degree prunes: {}, cut prunes: {}, paths: {}",
            self.nodes, self.degree_prunes, self.cut_prunes, self.paths
        )
    }
}

/// Mutable state of one search: the path built so far and the reachability
/// scratch used by the vertex-cut check.
///
/// `visited` holds exactly `length` usable cells, and the current head is
/// always one of them. Every cell is marked through a [`Visit`] guard, so the
/// path state after [`Search::count`] returns is the state it started with.
pub struct Search<'g> {
    grid: &'g Grid,
    pruning: Pruning,
    visited: BitSet,
    reachable: BitSet,
    stack: Vec<Cell>,
    length: usize,
    stats: SearchStats,
}

impl<'g> Search<'g> {
    /// Allocates all scratch space and places the path on `start`.
    pub fn new(grid: &'g Grid, pruning: Pruning) -> Result<Self, Error> {
        let mut visited = BitSet::try_new(grid.padded_len())?;
        visited.set(grid.start());
        let reachable = BitSet::try_new(grid.padded_len())?;
        let mut stack = Vec::new();
        stack.try_reserve_exact(grid.target_length())?;

        Ok(Search {
            grid,
            pruning,
            visited,
            reachable,
            stack,
            length: 1,
            stats: SearchStats::default(),
        })
    }

    /// Counts the paths from the current head. Resets the counters first.
    ///
    /// Recursion depth reaches `target_length`; see [`search`] for running
    /// on a stack sized to match.
    pub fn count(&mut self) -> u64 {
        self.stats = SearchStats::default();
        debug!(
            "counting paths of length {} at pruning {:?}",
            self.grid.target_length(),
            self.pruning
        );
        let start = self.grid.start();
        self.count_from(start)
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    pub fn visited(&self) -> &BitSet {
        &self.visited
    }

    /// Cells on the path, the head included.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Not blocked and not on the path.
    #[inline(always)]
    pub fn is_free(&self, cell: Cell) -> bool {
        !self.grid.is_blocked(cell) && !self.visited.get(cell)
    }

    fn count_from(&mut self, current: Cell) -> u64 {
        self.stats.nodes += 1;

        // No path continues through `end`, complete or not.
        if current == self.grid.end() {
            if self.length == self.grid.target_length() {
                self.stats.paths += 1;
                return 1;
            }
            return 0;
        }

        if self.pruning.min_degree && self.has_stranded_cell(current) {
            self.stats.degree_prunes += 1;
            trace!("degree prune at {:?}, length {}", self.grid.coords(current), self.length);
            return 0;
        }
        if self.pruning.vertex_cut && self.is_vertex_cut() {
            self.stats.cut_prunes += 1;
            trace!("cut prune at {:?}, length {}", self.grid.coords(current), self.length);
            return 0;
        }

        let mut paths = 0;
        for next in self.grid.neighbors(current) {
            if self.is_free(next) {
                paths += Visit::enter(self, next).count_from(next);
            }
        }
        paths
    }
}

/// Puts a cell on the path for as long as the guard lives.
struct Visit<'s, 'g> {
    search: &'s mut Search<'g>,
    cell: Cell,
}

impl<'s, 'g> Visit<'s, 'g> {
    fn enter(search: &'s mut Search<'g>, cell: Cell) -> Self {
        search.visited.set(cell);
        search.length += 1;
        Visit { search, cell }
    }
}

impl Drop for Visit<'_, '_> {
    fn drop(&mut self) {
        self.search.visited.clear(self.cell);
        self.search.length -= 1;
    }
}

impl<'g> Deref for Visit<'_, 'g> {
    type Target = Search<'g>;

    fn deref(&self) -> &Search<'g> {
        self.search
    }
}

impl<'g> DerefMut for Visit<'_, 'g> {
    fn deref_mut(&mut self) -> &mut Search<'g> {
        self.search
    }
}

/// Counts the Hamiltonian paths from `grid.start()` to `grid.end()` with
/// both pruning checks enabled.
pub fn count_paths(grid: &Grid) -> Result<u64, Error> {
    count_paths_with(grid, Pruning::default())
}

pub fn count_paths_with(grid: &Grid, pruning: Pruning) -> Result<u64, Error> {
    search(grid, pruning).map(|stats| stats.paths)
}

/// Runs a full search on a dedicated thread whose stack fits the recursion,
/// returning the counters of the run.
///
/// Failing to obtain that stack is reported as [`Error::ResourceExhausted`].
/// A panic inside the search is propagated to the caller.
pub fn search(grid: &Grid, pruning: Pruning) -> Result<SearchStats, Error> {
    let stack_size = grid
        .target_length()
        .checked_mul(FRAME_BYTES)
        .and_then(|bytes| bytes.checked_add(BASE_STACK))
        .ok_or_else(|| {
            Error::ResourceExhausted(format!(
                "no stack fits a path of {} cells",
                grid.target_length()
            ))
        })?;

    thread::scope(|scope| {
        let worker = thread::Builder::new()
            .name("cooling-search".to_string())
            .stack_size(stack_size)
            .spawn_scoped(scope, || -> Result<SearchStats, Error> {
                let mut search = Search::new(grid, pruning)?;
                search.count();
                debug!("search finished: {}", search.stats());
                Ok(search.stats())
            })
            .map_err(|err| {
                Error::ResourceExhausted(format!(
                    "cannot spawn search thread with a {} byte stack: {}",
                    stack_size, err
                ))
            })?;

        match worker.join() {
            Ok(result) => result,
            Err(panic) => std::panic::resume_unwind(panic),
        }
    })
}
