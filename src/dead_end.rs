//! Iterative removal of dead ends: enabled cells with at most one enabled
//! orthogonal neighbor.

use crate::automata::{CellRule, immediate_pass};
use crate::grid::Grid;

struct DeadEndRule<T, E, U> {
    default: T,
    is_enabled: E,
    update: U,
    removed: usize,
}

impl<T, E, U> CellRule<T> for DeadEndRule<T, E, U>
where
    T: Copy,
    E: Fn(T) -> bool,
    U: Fn(T, bool) -> T,
{
    fn next(&mut self, grid: &Grid<T>, x: usize, y: usize) -> T {
        let v = grid.get(x, y);
        if !(self.is_enabled)(v) {
            return v;
        }
        let n = grid.count_orthogonal(x, y, self.default, &self.is_enabled);
        let next = (self.update)(v, n > 1);
        if !(self.is_enabled)(next) {
            self.removed += 1;
        }
        next
    }
}

/// Prunes dead ends from a borrowed grid.
///
/// `update(value, has_multiple_neighbors)` produces every enabled cell's new
/// value; it must return a disabled value when the flag is false. Neighbors
/// outside the grid read as `default`.
pub struct DeadEndRemover<'g, T, E, U> {
    grid: &'g mut Grid<T>,
    rule: DeadEndRule<T, E, U>,
}

impl<'g, T, E, U> DeadEndRemover<'g, T, E, U>
where
    T: Copy + PartialEq,
    E: Fn(T) -> bool,
    U: Fn(T, bool) -> T,
{
    pub fn new(grid: &'g mut Grid<T>, default: T, is_enabled: E, update: U) -> Self {
        Self {
            grid,
            rule: DeadEndRule {
                default,
                is_enabled,
                update,
                removed: 0,
            },
        }
    }

    /// One in-place pass. Removal cascades along a branch within the pass
    /// when the branch runs in scan order. Returns cells disabled.
    pub fn update(&mut self) -> usize {
        self.rule.removed = 0;
        immediate_pass(self.grid, &mut self.rule);
        self.rule.removed
    }

    /// Repeat [`update`](Self::update) until a pass removes nothing. Returns
    /// the total removed; afterwards every enabled cell has at least two
    /// enabled orthogonal neighbors.
    pub fn remove_all(&mut self) -> usize {
        let mut total = 0;
        loop {
            let removed = self.update();
            if removed == 0 {
                return total;
            }
            total += removed;
        }
    }

    pub fn grid(&self) -> &Grid<T> {
        self.grid
    }
}

/// Remove every dead end from a boolean grid where `true` is enabled.
pub fn remove_dead_ends(grid: &mut Grid<bool>) -> usize {
    DeadEndRemover::new(grid, false, |v| v, |_, keep| keep).remove_all()
}
