//! Rule-driven cellular automata over a [`Grid`].
//!
//! Rules run in the order they were added. Two update disciplines exist:
//!
//! - [`CellularAutomata::update`] is generational. Every read made while a rule
//!   runs sees the grid as it was before that rule started; the next rule sees
//!   the result.
//! - [`CellularAutomata::single_update`] writes each new value straight into the
//!   grid, so cells visited later in the same row-major pass observe the cells
//!   already rewritten. Erosion-style passes depend on this.
//!
//! ```
//! use gridforge::automata::CellularAutomata;
//! use gridforge::grid::Grid;
//! use gridforge::rules::conway_life;
//!
//! let mut grid = Grid::parse_lookup_or("...\n###\n...", &[('#', true)], false).unwrap();
//! let mut life = CellularAutomata::new();
//! life.add_moore_rule(false, conway_life());
//! life.update(&mut grid);
//! assert_eq!(grid.to_text(|v| if v { '#' } else { '.' }, "\n"), ".#.\n.#.\n.#.");
//! ```

use crate::error::{GridError, Result};
use crate::grid::Grid;

/// Computes the next value of cell `(x, y)` from the grid it lives in.
///
/// Rules must read neighbors through [`Grid::get_or`] or another
/// bounds-aware accessor.
pub trait CellRule<T> {
    fn next(&mut self, grid: &Grid<T>, x: usize, y: usize) -> T;
}

impl<T, F> CellRule<T> for F
where
    F: FnMut(&Grid<T>, usize, usize) -> T,
{
    fn next(&mut self, grid: &Grid<T>, x: usize, y: usize) -> T {
        self(grid, x, y)
    }
}

/// Runs a window function on an odd-sized copy of the cells centered on the
/// target. Cells past the grid edge read as `default`.
pub struct WindowRule<T, F> {
    window: Grid<T>,
    default: T,
    f: F,
}

impl<T: Copy, F> WindowRule<T, F> {
    pub fn new(size: usize, default: T, f: F) -> Result<Self>
    where
        F: FnMut(&Grid<T>) -> T,
    {
        if size % 2 == 0 {
            return Err(GridError::EvenWindow { w: size, h: size });
        }
        Ok(Self {
            window: Grid::filled(size, size, default),
            default,
            f,
        })
    }

    /// 3x3 window: the center plus its Moore neighborhood.
    pub fn moore(default: T, f: F) -> Self
    where
        F: FnMut(&Grid<T>) -> T,
    {
        Self {
            window: Grid::filled(3, 3, default),
            default,
            f,
        }
    }

    pub fn size(&self) -> usize {
        self.window.w
    }
}

impl<T: Copy, F> CellRule<T> for WindowRule<T, F>
where
    F: FnMut(&Grid<T>) -> T,
{
    fn next(&mut self, grid: &Grid<T>, x: usize, y: usize) -> T {
        let half = (self.window.w / 2) as i32;
        grid.copy_to(&mut self.window, x as i32 - half, y as i32 - half, self.default);
        (self.f)(&self.window)
    }
}

/// Evaluate `rule` for every cell against the unchanged grid, then publish all
/// results at once. `scratch` must match the grid's dimensions and ends up
/// holding the previous state. Returns how many cells changed.
pub fn buffered_pass<T, R>(grid: &mut Grid<T>, scratch: &mut Grid<T>, rule: &mut R) -> usize
where
    T: Copy + PartialEq,
    R: CellRule<T> + ?Sized,
{
    debug_assert!(scratch.w == grid.w && scratch.h == grid.h);
    let w = grid.w;
    let mut changed = 0;
    for y in 0..grid.h {
        for x in 0..w {
            let i = y * w + x;
            let v = rule.next(grid, x, y);
            if v != grid.data[i] {
                changed += 1;
            }
            scratch.data[i] = v;
        }
    }
    std::mem::swap(&mut grid.data, &mut scratch.data);
    changed
}

/// Evaluate `rule` cell by cell in row-major order, writing each result
/// before the next cell is evaluated. Returns how many cells changed.
pub fn immediate_pass<T, R>(grid: &mut Grid<T>, rule: &mut R) -> usize
where
    T: Copy + PartialEq,
    R: CellRule<T> + ?Sized,
{
    let w = grid.w;
    let mut changed = 0;
    for y in 0..grid.h {
        for x in 0..w {
            let v = rule.next(grid, x, y);
            let i = y * w + x;
            if v != grid.data[i] {
                grid.data[i] = v;
                changed += 1;
            }
        }
    }
    changed
}

/// Ordered rule set plus the reusable scratch grid for generational updates.
pub struct CellularAutomata<T> {
    rules: Vec<Box<dyn CellRule<T>>>,
    scratch: Option<Grid<T>>,
}

impl<T: Copy + PartialEq + 'static> Default for CellularAutomata<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + PartialEq + 'static> CellularAutomata<T> {
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            scratch: None,
        }
    }

    /// Add a rule that reads the whole grid around its target.
    pub fn add_cell_rule<F>(&mut self, f: F) -> &mut Self
    where
        F: FnMut(&Grid<T>, usize, usize) -> T + 'static,
    {
        self.add_rule(f)
    }

    pub fn add_rule(&mut self, rule: impl CellRule<T> + 'static) -> &mut Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Add a rule that only sees a `size` x `size` window around its target.
    /// Fails for even sizes, which have no center cell.
    pub fn add_window_rule<F>(&mut self, size: usize, default: T, f: F) -> Result<&mut Self>
    where
        F: FnMut(&Grid<T>) -> T + 'static,
    {
        let rule = WindowRule::new(size, default, f)?;
        Ok(self.add_rule(rule))
    }

    /// Add a 3x3 (Moore neighborhood) window rule.
    pub fn add_moore_rule<F>(&mut self, default: T, f: F) -> &mut Self
    where
        F: FnMut(&Grid<T>) -> T + 'static,
    {
        self.add_rule(WindowRule::moore(default, f))
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    pub fn clear_rules(&mut self) {
        self.rules.clear();
    }

    /// One generation: each rule in turn is evaluated against a stable
    /// snapshot. Returns changed cells summed over rules.
    pub fn update(&mut self, grid: &mut Grid<T>) -> usize {
        let mut scratch = match self.scratch.take() {
            Some(s) if s.w == grid.w && s.h == grid.h => s,
            _ => grid.clone(),
        };
        let mut changed = 0;
        for rule in &mut self.rules {
            changed += buffered_pass(grid, &mut scratch, rule.as_mut());
        }
        self.scratch = Some(scratch);
        changed
    }

    /// One in-place pass per rule. Returns changed cells summed over rules.
    pub fn single_update(&mut self, grid: &mut Grid<T>) -> usize {
        self.rules
            .iter_mut()
            .map(|rule| immediate_pass(grid, rule.as_mut()))
            .sum()
    }

    /// Run generations until one changes nothing or `max_generations` is hit.
    /// Returns the number of generations run.
    pub fn update_until_stable(&mut self, grid: &mut Grid<T>, max_generations: usize) -> usize {
        for generation in 1..=max_generations {
            if self.update(grid) == 0 {
                return generation;
            }
        }
        max_generations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::conway_life;

    fn bools(template: &str) -> Grid<bool> {
        Grid::parse_lookup_or(template, &[('#', true)], false).unwrap()
    }

    fn text(g: &Grid<bool>) -> String {
        g.to_text(|v| if v { '#' } else { '.' }, "\n")
    }

    fn copy_left(grid: &Grid<u8>, x: usize, y: usize) -> u8 {
        grid.get_or(x as i32 - 1, y as i32, grid.get(x, y))
    }

    #[test]
    fn isolated_cell_dies() {
        let mut g = Grid::<bool>::new(5, 5);
        g.set(2, 2, true);
        let mut life = CellularAutomata::new();
        life.add_moore_rule(false, conway_life());
        assert_eq!(life.update(&mut g), 1);
        assert_eq!(g.count(|v| v), 0);
    }

    #[test]
    fn blinker_oscillates() {
        let mut g = bools(".....\n..#..\n..#..\n..#..\n.....");
        let start = g.clone();
        let mut life = CellularAutomata::new();
        life.add_window_rule(3, false, conway_life()).unwrap();
        assert_eq!(life.update(&mut g), 4);
        assert_eq!(text(&g), ".....\n.....\n.###.\n.....\n.....");
        life.update(&mut g);
        assert_eq!(g, start);
    }

    #[test]
    fn block_is_stable() {
        let mut g = bools("....\n.##.\n.##.\n....");
        let mut life = CellularAutomata::new();
        life.add_moore_rule(false, conway_life());
        assert_eq!(life.update_until_stable(&mut g, 10), 1);
        assert_eq!(g.count(|v| v), 4);
    }

    #[test]
    fn buffered_reads_previous_state() {
        let mut g = Grid::from_vec(4, 1, vec![1u8, 0, 0, 0]).unwrap();
        let mut ca = CellularAutomata::new();
        ca.add_cell_rule(copy_left);
        assert_eq!(ca.update(&mut g), 1);
        assert_eq!(g.data, vec![1, 1, 0, 0]);
    }

    #[test]
    fn immediate_propagates_within_pass() {
        let mut g = Grid::from_vec(4, 1, vec![1u8, 0, 0, 0]).unwrap();
        let mut ca = CellularAutomata::new();
        ca.add_cell_rule(copy_left);
        assert_eq!(ca.single_update(&mut g), 3);
        assert_eq!(g.data, vec![1, 1, 1, 1]);
    }

    #[test]
    fn later_rules_see_earlier_results() {
        let mut g = Grid::from_vec(3, 1, vec![1u8, 2, 3]).unwrap();
        let mut ca = CellularAutomata::new();
        ca.add_cell_rule(|g: &Grid<u8>, x, y| g.get(x, y) * 2);
        ca.add_cell_rule(|g: &Grid<u8>, x, y| if g.get(x, y) >= 4 { 0 } else { g.get(x, y) });
        assert_eq!(ca.rule_count(), 2);
        // 3 doubled, then 2 of the doubled values cleared.
        assert_eq!(ca.update(&mut g), 5);
        assert_eq!(g.data, vec![2, 0, 0]);
    }

    #[test]
    fn scratch_follows_grid_size() {
        let mut ca = CellularAutomata::new();
        ca.add_moore_rule(false, conway_life());
        let mut small = Grid::<bool>::new(3, 3);
        let mut big = bools("....\n.##.\n.##.\n....");
        ca.update(&mut small);
        assert_eq!(ca.update(&mut big), 0);
        assert_eq!(big.count(|v| v), 4);
    }

    #[test]
    fn even_window_rejected() {
        let mut ca = CellularAutomata::<bool>::new();
        let err = ca.add_window_rule(4, false, |w: &Grid<bool>| w.get(2, 2)).err();
        assert_eq!(err, Some(GridError::EvenWindow { w: 4, h: 4 }));
        assert_eq!(ca.rule_count(), 0);
    }

    #[test]
    fn window_sees_default_outside() {
        let mut g = Grid::filled(2, 2, 1u8);
        let mut ca = CellularAutomata::new();
        ca.add_window_rule(5, 9, |w: &Grid<u8>| w.data.iter().map(|&v| v as u32).sum::<u32>() as u8)
            .unwrap();
        ca.update(&mut g);
        // 4 cells in the grid, 21 defaults of 9.
        assert_eq!(g.data, vec![193; 4]);
    }
}
