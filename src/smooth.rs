//! Neighbor-density smoothing with separate remove and add thresholds.
//!
//! Both thresholds count enabled cells among the 8 Moore neighbors (center
//! excluded). Each update is generational: every decision in a pass reads the
//! same snapshot.

use serde::{Deserialize, Serialize};

use crate::automata::{CellRule, buffered_pass};
use crate::grid::Grid;

/// Moore-count thresholds.
///
/// An enabled cell is disabled when its count is **at least**
/// `delete_if_less_than`; a disabled cell is enabled when its count is
/// strictly greater than `add_if_more_than`. A value above 8 turns the
/// corresponding rule off.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmoothThresholds {
    pub delete_if_less_than: usize,
    pub add_if_more_than: usize,
}

struct SmoothRule<T, E, S> {
    default: T,
    is_enabled: E,
    set_value: S,
    thresholds: SmoothThresholds,
    removed: usize,
    added: usize,
}

impl<T, E, S> CellRule<T> for SmoothRule<T, E, S>
where
    T: Copy,
    E: Fn(T) -> bool,
    S: Fn(T, bool) -> T,
{
    fn next(&mut self, grid: &Grid<T>, x: usize, y: usize) -> T {
        let v = grid.get(x, y);
        let n = grid.count_moore(x, y, self.default, &self.is_enabled);
        if (self.is_enabled)(v) {
            if n >= self.thresholds.delete_if_less_than {
                self.removed += 1;
                return (self.set_value)(v, false);
            }
        } else if n > self.thresholds.add_if_more_than {
            self.added += 1;
            return (self.set_value)(v, true);
        }
        v
    }
}

/// Smooths a borrowed grid and keeps running cell counts.
pub struct SmoothGrid<'g, T, E, S> {
    grid: &'g mut Grid<T>,
    scratch: Grid<T>,
    rule: SmoothRule<T, E, S>,
    filled: usize,
    empty: usize,
    removed_total: usize,
    added_total: usize,
}

impl<'g, T, E, S> SmoothGrid<'g, T, E, S>
where
    T: Copy + PartialEq,
    E: Fn(T) -> bool,
    S: Fn(T, bool) -> T,
{
    /// `set_value(value, enabled)` writes the new state into a cell value.
    /// Neighbors outside the grid read as `default`.
    pub fn new(
        grid: &'g mut Grid<T>,
        default: T,
        is_enabled: E,
        set_value: S,
        thresholds: SmoothThresholds,
    ) -> Self {
        let filled = grid.count(&is_enabled);
        let empty = grid.data.len() - filled;
        let scratch = grid.clone();
        Self {
            grid,
            scratch,
            rule: SmoothRule {
                default,
                is_enabled,
                set_value,
                thresholds,
                removed: 0,
                added: 0,
            },
            filled,
            empty,
            removed_total: 0,
            added_total: 0,
        }
    }

    /// One smoothing generation. Returns cells changed.
    pub fn update(&mut self) -> usize {
        let (removed, added) = self.update_and_get_changes();
        removed + added
    }

    /// One smoothing generation. Returns `(removed, added)` for this call.
    pub fn update_and_get_changes(&mut self) -> (usize, usize) {
        self.rule.removed = 0;
        self.rule.added = 0;
        buffered_pass(self.grid, &mut self.scratch, &mut self.rule);
        let (removed, added) = (self.rule.removed, self.rule.added);
        self.filled = self.filled + added - removed;
        self.empty = self.empty + removed - added;
        self.removed_total += removed;
        self.added_total += added;
        (removed, added)
    }

    /// Run until a generation changes nothing or `max_passes` is reached.
    /// Returns the passes run.
    pub fn update_until_stable(&mut self, max_passes: usize) -> usize {
        for pass in 1..=max_passes {
            if self.update() == 0 {
                return pass;
            }
        }
        max_passes
    }

    pub fn filled_cells(&self) -> usize {
        self.filled
    }

    pub fn empty_cells(&self) -> usize {
        self.empty
    }

    /// Cells disabled since construction.
    pub fn removed_cells(&self) -> usize {
        self.removed_total
    }

    /// Cells enabled since construction.
    pub fn added_cells(&self) -> usize {
        self.added_total
    }

    pub fn thresholds(&self) -> SmoothThresholds {
        self.rule.thresholds
    }

    pub fn grid(&self) -> &Grid<T> {
        self.grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bools(template: &str) -> Grid<bool> {
        Grid::parse_lookup_or(template, &[('#', true)], false).unwrap()
    }

    fn text(g: &Grid<bool>) -> String {
        g.to_text(|v| if v { '#' } else { '.' }, "\n")
    }

    const ADD_ONLY: SmoothThresholds = SmoothThresholds {
        delete_if_less_than: 9,
        add_if_more_than: 4,
    };

    #[test]
    fn counters_start_from_scan() {
        let mut g = bools("#..\n.#.\n..#");
        let smooth = SmoothGrid::new(&mut g, false, |v| v, |_, on| on, ADD_ONLY);
        assert_eq!(smooth.filled_cells(), 3);
        assert_eq!(smooth.empty_cells(), 6);
        assert_eq!((smooth.removed_cells(), smooth.added_cells()), (0, 0));
    }

    #[test]
    fn add_fills_crowded_hole() {
        let mut g = bools("#####\n#####\n##.##\n#####\n#####");
        let mut smooth = SmoothGrid::new(&mut g, false, |v| v, |_, on| on, ADD_ONLY);
        assert_eq!(smooth.update_and_get_changes(), (0, 1));
        assert_eq!(smooth.filled_cells(), 25);
        assert_eq!(smooth.empty_cells(), 0);
        assert_eq!(smooth.update_and_get_changes(), (0, 0));
        assert_eq!(smooth.added_cells(), 1);
    }

    #[test]
    fn remove_triggers_at_or_above_threshold() {
        let mut g = bools("###\n###\n###");
        let thresholds = SmoothThresholds {
            delete_if_less_than: 8,
            add_if_more_than: 9,
        };
        let mut smooth = SmoothGrid::new(&mut g, false, |v| v, |_, on| on, thresholds);
        // Only the center has all 8 neighbors enabled.
        assert_eq!(smooth.update_and_get_changes(), (1, 0));
        assert_eq!(text(smooth.grid()), "###\n#.#\n###");
    }

    #[test]
    fn both_rules_read_same_snapshot() {
        let mut g = bools("###\n#.#\n###");
        let thresholds = SmoothThresholds {
            delete_if_less_than: 3,
            add_if_more_than: 7,
        };
        let mut smooth = SmoothGrid::new(&mut g, false, |v| v, |_, on| on, thresholds);
        // Center is added (8 > 7) while corners (2) stay and edges (4) go,
        // all judged on the original ring.
        assert_eq!(smooth.update_and_get_changes(), (4, 1));
        assert_eq!(text(smooth.grid()), "#.#\n.#.\n#.#");
        assert_eq!(smooth.filled_cells() + smooth.empty_cells(), 9);
    }

    #[test]
    fn default_feeds_edge_counts() {
        let mut g = Grid::filled(3, 3, false);
        let thresholds = SmoothThresholds {
            delete_if_less_than: 9,
            add_if_more_than: 4,
        };
        let mut smooth = SmoothGrid::new(&mut g, true, |v| v, |_, on| on, thresholds);
        // Corners see 5 out-of-grid neighbors, edges 3, center none.
        assert_eq!(smooth.update_and_get_changes(), (0, 4));
        assert_eq!(text(smooth.grid()), "#.#\n...\n#.#");
    }

    #[test]
    fn update_until_stable_stops() {
        let mut g = bools("#####\n#.#.#\n#####");
        let mut smooth = SmoothGrid::new(&mut g, false, |v| v, |_, on| on, ADD_ONLY);
        assert_eq!(smooth.update_until_stable(10), 2);
        assert_eq!(smooth.filled_cells(), 15);
        assert_eq!(smooth.thresholds(), ADD_ONLY);
    }
}
