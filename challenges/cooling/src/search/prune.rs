use crate::bits::BitSet;
use crate::grid::Cell;

use super::Search;

impl Search<'_> {
    /// True if some free cell other than `end` has fewer than two neighbors
    /// a path could use to pass through it.
    ///
    /// A neighbor counts if it is free or is the head at `current`. The sweep
    /// covers the whole floor, because the last step can strand a cell far
    /// from the head.
    pub(crate) fn has_stranded_cell(&self, current: Cell) -> bool {
        let end = self.grid.end();
        BitSet::zeros_of_union(self.grid.blocked(), &self.visited)
            .filter(|&cell| cell != end)
            .any(|cell| {
                let degree = self
                    .grid
                    .neighbors(cell)
                    .into_iter()
                    .filter(|&n| n == current || self.is_free(n))
                    .count();
                degree < 2
            })
    }

    /// True if the free cells, `end` included, split into more than one
    /// connected region.
    ///
    /// Floods from one free cell through free cells only. Path cells, and
    /// so the head, are walls. The region is whole when the flood reaches
    /// every one of the `target_length - length` free cells.
    pub(crate) fn is_vertex_cut(&mut self) -> bool {
        let Some(seed) = BitSet::zeros_of_union(self.grid.blocked(), &self.visited).next() else {
            return false;
        };
        let free_cells = self.grid.target_length() - self.length;

        self.reachable.copy_from(self.grid.blocked());
        self.reachable.union_with(&self.visited);
        self.reachable.set(seed);
        self.stack.clear();
        self.stack.push(seed);

        let mut reached = 1;
        while let Some(cell) = self.stack.pop() {
            for next in self.grid.neighbors(cell) {
                if !self.reachable.get(next) {
                    self.reachable.set(next);
                    self.stack.push(next);
                    reached += 1;
                }
            }
        }
        reached < free_cells
    }
}

#[cfg(test)]
mod tests {
    use crate::grid::Grid;
    use crate::parse::parse_grid;
    use crate::search::{Pruning, Search};

    #[test]
    fn test_stranded_cell() {
        // S . E
        // # . #
        let grid = parse_grid("3 2 2 0 3 1 0 1").unwrap();
        let search = Search::new(&grid, Pruning::ALL).unwrap();
        assert!(search.has_stranded_cell(grid.start()));
    }

    #[test]
    fn test_head_counts_toward_degree() {
        // S . .
        // . . E
        // (1, 0) touches only (1, 1) and the head
        let grid = parse_grid("3 2 2 0 0 0 0 3").unwrap();
        let search = Search::new(&grid, Pruning::ALL).unwrap();
        assert!(!search.has_stranded_cell(grid.start()));
        // seen from a head elsewhere, (1, 0) would be a dead end
        assert!(search.has_stranded_cell(grid.cell(0, 2)));
    }

    #[test]
    fn test_end_is_exempt() {
        // S . E
        let grid = parse_grid("3 1 2 0 3").unwrap();
        let search = Search::new(&grid, Pruning::ALL).unwrap();
        assert!(!search.has_stranded_cell(grid.start()));
    }

    #[test]
    fn test_vertex_cut() {
        // . . S . .
        // . . # . E
        let grid = parse_grid("5 2 0 0 2 0 0 0 0 1 0 3").unwrap();
        let mut search = Search::new(&grid, Pruning::ALL).unwrap();
        assert!(search.is_vertex_cut());
        assert!(!search.has_stranded_cell(grid.start()));

        // start in a corner leaves one region
        let grid = parse_grid("5 2 2 0 0 0 0 0 0 1 0 3").unwrap();
        let mut search = Search::new(&grid, Pruning::ALL).unwrap();
        assert!(!search.is_vertex_cut());
    }

    #[test]
    fn test_vertex_cut_without_free_cells() {
        let grid = Grid::builder(1, 1).start(0, 0).end(0, 0).build().unwrap();
        let mut search = Search::new(&grid, Pruning::ALL).unwrap();
        assert!(!search.is_vertex_cut());
    }
}
