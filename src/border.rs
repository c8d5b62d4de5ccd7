//! 4-connected border detection via seeded flood fill.
//!
//! An inner border is the set of member cells touching a non-member; an outer
//! border is the set of non-member cells touching a member. Each contiguous
//! region is flooded once from the first qualifying cell the row-major scan
//! meets, so every cell is visited at most once.

use crate::grid::{Grid, ORTHOGONAL};

/// Flood order: North, South, West, East.
const FLOOD_ORDER: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// Which side of a region boundary to report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BorderSide {
    /// Member cells adjacent to a non-member.
    Inner,
    /// Non-member cells adjacent to a member.
    Outer,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Border4Detector {
    side: BorderSide,
    grid_edge: bool,
}

impl Border4Detector {
    pub fn inner() -> Self {
        Self {
            side: BorderSide::Inner,
            grid_edge: false,
        }
    }

    pub fn outer() -> Self {
        Self {
            side: BorderSide::Outer,
            grid_edge: false,
        }
    }

    /// Also treat the grid edge as a boundary: traced cells on the outermost
    /// row or column qualify even when all their in-grid neighbors match.
    pub fn with_grid_edge(mut self, on: bool) -> Self {
        self.grid_edge = on;
        self
    }

    pub fn side(&self) -> BorderSide {
        self.side
    }

    /// Boolean mask of border cells, same size as `grid`.
    pub fn detect<T: Copy>(&self, grid: &Grid<T>, is_member: impl Fn(T) -> bool) -> Grid<bool> {
        let w = grid.w;
        let h = grid.h;
        // The traced class: members for the inner border, non-members for the outer.
        let traced = |v: T| is_member(v) == (self.side == BorderSide::Inner);
        let class: Grid<bool> = grid.map(traced);

        let mut mask = Grid::filled(w, h, false);
        let mut visited = Grid::filled(w, h, false);
        let mut stack: Vec<(usize, usize)> = Vec::new();

        for y in 0..h {
            for x in 0..w {
                if !class.get(x, y) || visited.get(x, y) {
                    continue;
                }
                if !self.qualifies(&class, x, y) {
                    continue;
                }
                mask.set(x, y, true);
                visited.set(x, y, true);
                stack.push((x, y));

                while let Some((cx, cy)) = stack.pop() {
                    if self.qualifies(&class, cx, cy) {
                        mask.set(cx, cy, true);
                    }
                    // Pushed in reverse so North pops first.
                    for &(dx, dy) in FLOOD_ORDER.iter().rev() {
                        let nx = cx as i32 + dx;
                        let ny = cy as i32 + dy;
                        if !class.get_or(nx, ny, false) {
                            continue;
                        }
                        let (nx, ny) = (nx as usize, ny as usize);
                        if visited.get(nx, ny) {
                            continue;
                        }
                        visited.set(nx, ny, true);
                        stack.push((nx, ny));
                    }
                }
            }
        }

        mask
    }

    /// A traced cell qualifies when an orthogonal neighbor is of the other
    /// class, or, with `grid_edge`, when it lies on the grid edge.
    fn qualifies(&self, class: &Grid<bool>, x: usize, y: usize) -> bool {
        ORTHOGONAL.iter().any(|&(dx, dy)| {
            let nx = x as i32 + dx;
            let ny = y as i32 + dy;
            if class.in_bounds(nx, ny) {
                !class.get(nx as usize, ny as usize)
            } else {
                self.grid_edge
            }
        })
    }
}

/// Member cells touching a non-member.
pub fn inner_border<T: Copy>(grid: &Grid<T>, is_member: impl Fn(T) -> bool) -> Grid<bool> {
    Border4Detector::inner().detect(grid, is_member)
}

/// Non-member cells touching a member.
pub fn outer_border<T: Copy>(grid: &Grid<T>, is_member: impl Fn(T) -> bool) -> Grid<bool> {
    Border4Detector::outer().detect(grid, is_member)
}
