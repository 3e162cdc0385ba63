//! Property-based tests for the path search.
//!
//! Random small floors are counted with every combination of pruning checks
//! and compared against a plain bounds-checked backtracking count.

use cooling::{count_paths, count_paths_with, Grid, Pruning, Search};
use proptest::prelude::*;
use proptest::sample::Index;

/// A floor in user coordinates, cells in row-major order.
#[derive(Debug, Clone)]
struct Floor {
    width: usize,
    height: usize,
    blocked: Vec<bool>,
    start: usize,
    end: usize,
}

impl Floor {
    fn grid(&self) -> Grid {
        let mut builder = Grid::builder(self.width, self.height);
        for (i, _) in self.blocked.iter().enumerate().filter(|(_, b)| **b) {
            builder.block(i / self.width, i % self.width);
        }
        builder
            .start(self.start / self.width, self.start % self.width)
            .end(self.end / self.width, self.end % self.width)
            .build()
            .unwrap()
    }
}

fn floor() -> impl Strategy<Value = Floor> {
    (1usize..=4, 1usize..=4)
        .prop_flat_map(|(width, height)| {
            (
                Just(width),
                Just(height),
                prop::collection::vec(prop::bool::weighted(0.2), width * height),
                any::<Index>(),
                any::<Index>(),
            )
        })
        .prop_filter_map("needs two usable cells", |(width, height, blocked, s, e)| {
            let usable: Vec<usize> = (0..width * height).filter(|&i| !blocked[i]).collect();
            if usable.len() < 2 {
                return None;
            }
            let start = usable[s.index(usable.len())];
            let others: Vec<usize> = usable.into_iter().filter(|&i| i != start).collect();
            let end = others[e.index(others.len())];
            Some(Floor {
                width,
                height,
                blocked,
                start,
                end,
            })
        })
}

fn brute_force(floor: &Floor) -> u64 {
    let target = floor.blocked.iter().filter(|b| !**b).count();
    let mut visited = floor.blocked.clone();
    visited[floor.start] = true;
    walk(floor, &mut visited, floor.start, 1, target)
}

fn walk(floor: &Floor, visited: &mut [bool], cell: usize, length: usize, target: usize) -> u64 {
    if cell == floor.end {
        return (length == target) as u64;
    }
    let (row, col) = (cell / floor.width, cell % floor.width);
    let mut neighbors = Vec::with_capacity(4);
    if row > 0 {
        neighbors.push(cell - floor.width);
    }
    if col + 1 < floor.width {
        neighbors.push(cell + 1);
    }
    if row + 1 < floor.height {
        neighbors.push(cell + floor.width);
    }
    if col > 0 {
        neighbors.push(cell - 1);
    }

    let mut paths = 0;
    for next in neighbors {
        if !visited[next] {
            visited[next] = true;
            paths += walk(floor, visited, next, length + 1, target);
            visited[next] = false;
        }
    }
    paths
}

const PRUNINGS: [Pruning; 4] = [
    Pruning::ALL,
    Pruning::NONE,
    Pruning {
        min_degree: true,
        vertex_cut: false,
    },
    Pruning {
        min_degree: false,
        vertex_cut: true,
    },
];

proptest! {
    /// Pruning only cuts the tree; every combination agrees with the
    /// unpruned reference count.
    #[test]
    fn prop_pruning_preserves_count(floor in floor()) {
        let grid = floor.grid();
        let expected = brute_force(&floor);
        for pruning in PRUNINGS {
            let actual = count_paths_with(&grid, pruning).unwrap();
            prop_assert_eq!(actual, expected, "pruning {:?} on {}", pruning, grid);
        }
    }

    /// The path state after a run equals the state before it.
    #[test]
    fn prop_search_restores_path_state(floor in floor()) {
        let grid = floor.grid();
        let mut search = Search::new(&grid, Pruning::ALL).unwrap();
        let before = search.visited().clone();
        search.count();
        prop_assert_eq!(search.visited(), &before);
        prop_assert_eq!(search.length(), 1);
    }

    /// A 1xN corridor has a single layout when the endpoints sit at its two
    /// ends, and none otherwise.
    #[test]
    fn prop_corridor(len in 2usize..40, a in any::<Index>(), b in any::<Index>()) {
        let start = a.index(len);
        let mut end = b.index(len - 1);
        if end >= start {
            end += 1;
        }
        let grid = Grid::builder(len, 1).start(0, start).end(0, end).build().unwrap();
        let expected = u64::from(start.min(end) == 0 && start.max(end) == len - 1);
        prop_assert_eq!(count_paths(&grid).unwrap(), expected);
    }
}
