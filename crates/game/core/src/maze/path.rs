//! Breadth-first shortest distances over the walkable subgraph.

use std::collections::VecDeque;

use crate::maze::VisitedSet;
use crate::state::{Grid, Position};

/// Number of steps on the shortest walkable route from `from` to `to`.
///
/// Returns `Some(0)` when `from == to` and `None` when `to` is unreachable.
/// Neighbours are expanded right, down, left, up. The grid is never mutated.
pub fn shortest_distance(grid: &Grid, from: Position, to: Position) -> Option<u32> {
    if from == to {
        return Some(0);
    }
    let (Some(start), Some(_)) = (grid.index(from), grid.index(to)) else {
        return None;
    };

    let mut visited = VisitedSet::new(grid.size() * grid.size());
    visited.insert(start);
    let mut queue = VecDeque::from([(from, 0u32)]);

    while let Some((position, steps)) = queue.pop_front() {
        for next in grid.walkable_neighbors(position) {
            if next == to {
                return Some(steps + 1);
            }
            if let Some(index) = grid.index(next)
                && visited.insert(index)
            {
                queue.push_back((next, steps + 1));
            }
        }
    }

    None
}

/// Every walkable cell reachable from `from` (including `from` if walkable).
pub fn reachable(grid: &Grid, from: Position) -> Vec<Position> {
    let Some(start) = grid.index(from) else {
        return Vec::new();
    };
    if !grid.is_walkable(from) {
        return Vec::new();
    }

    let mut visited = VisitedSet::new(grid.size() * grid.size());
    visited.insert(start);
    let mut queue = VecDeque::from([from]);
    let mut found = Vec::new();

    while let Some(position) = queue.pop_front() {
        found.push(position);
        for next in grid.walkable_neighbors(position) {
            if let Some(index) = grid.index(next)
                && visited.insert(index)
            {
                queue.push_back(next);
            }
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hand_built_three_by_three() {
        // Only route: (0,0) → (1,0) → (2,0) → (2,1) → (2,2)
        let grid = Grid::parse(
            "
            ...
            ##.
            ..+
            ",
        )
        .unwrap();
        assert_eq!(
            shortest_distance(&grid, Position::ORIGIN, grid.exit()),
            Some(4)
        );
        assert_eq!(
            shortest_distance(&grid, Position::new(0, 2), grid.exit()),
            Some(2)
        );
    }

    #[test]
    fn distance_to_self_is_zero() {
        let grid = Grid::parse("..#\n#..\n##.").unwrap();
        for y in 0..3 {
            for x in 0..3 {
                let p = Position::new(x, y);
                assert_eq!(shortest_distance(&grid, p, p), Some(0));
            }
        }
    }

    #[test]
    fn unreachable_exit_is_none() {
        let grid = Grid::parse("..#\n###\n#..").unwrap();
        assert_eq!(shortest_distance(&grid, Position::ORIGIN, grid.exit()), None);
    }

    #[test]
    fn markings_do_not_block_search() {
        let grid = Grid::parse("x$.\n##+\n##.").unwrap();
        assert_eq!(
            shortest_distance(&grid, Position::ORIGIN, grid.exit()),
            Some(4)
        );
    }

    #[test]
    fn search_does_not_mutate_grid() {
        let grid = Grid::parse("...\n.#.\n...").unwrap();
        let before = grid.clone();
        let _ = shortest_distance(&grid, Position::ORIGIN, grid.exit());
        let _ = reachable(&grid, Position::ORIGIN);
        assert_eq!(grid, before);
    }

    #[test]
    fn reachable_lists_connected_component() {
        let grid = Grid::parse("..#\n###\n#..").unwrap();
        assert_eq!(
            reachable(&grid, Position::ORIGIN),
            vec![Position::new(0, 0), Position::new(1, 0)]
        );
    }
}
