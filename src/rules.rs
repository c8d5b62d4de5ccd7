//! Ready-made rules for [`CellularAutomata`](crate::automata::CellularAutomata).

use crate::grid::Grid;

/// Center value of an odd-sized window.
#[inline]
pub fn center<T: Copy>(window: &Grid<T>) -> T {
    window.get(window.w / 2, window.h / 2)
}

/// Window cells matching `pred`, center excluded. For a 3x3 window this is
/// the Moore neighbor count.
pub fn count_around<T: Copy>(window: &Grid<T>, pred: impl Fn(T) -> bool) -> usize {
    let all = window.count(&pred);
    if pred(center(window)) { all - 1 } else { all }
}

/// Birth/survival rule on boolean cells (B3/S23 is Conway's Life).
pub fn life_like(birth: &[usize], survive: &[usize]) -> impl FnMut(&Grid<bool>) -> bool + use<> {
    let birth = birth.to_vec();
    let survive = survive.to_vec();
    move |window| {
        let n = count_around(window, |v| v);
        if center(window) {
            survive.contains(&n)
        } else {
            birth.contains(&n)
        }
    }
}

/// Conway's Game of Life as a 3x3 window rule.
pub fn conway_life() -> impl FnMut(&Grid<bool>) -> bool {
    life_like(&[3], &[2, 3])
}

/// Cell rule that opens a disabled cell when two enabled cells touch only
/// diagonally across it, making them 4-connected.
///
/// Meant for [`single_update`](crate::automata::CellularAutomata::single_update):
/// once one side of a diagonal pair is opened, the opposite cell no longer
/// qualifies in the same pass.
pub fn connect_diagonals<T, E, U>(default: T, is_enabled: E, enable: U) -> impl FnMut(&Grid<T>, usize, usize) -> T
where
    T: Copy,
    E: Fn(T) -> bool,
    U: Fn(T) -> T,
{
    const DIAGONALS: [(i32, i32); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];
    move |grid, x, y| {
        let v = grid.get(x, y);
        if is_enabled(v) {
            return v;
        }
        let (x, y) = (x as i32, y as i32);
        let on = |dx: i32, dy: i32| is_enabled(grid.get_or(x + dx, y + dy, default));
        let bridges = DIAGONALS
            .iter()
            .any(|&(dx, dy)| on(dx, 0) && on(0, dy) && !on(dx, dy));
        if bridges { enable(v) } else { v }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automata::CellularAutomata;

    fn bools(template: &str) -> Grid<bool> {
        Grid::parse_lookup_or(template, &[('#', true)], false).unwrap()
    }

    fn text(g: &Grid<bool>) -> String {
        g.to_text(|v| if v { '#' } else { '.' }, "\n")
    }

    #[test]
    fn counts_exclude_center() {
        let w = bools("#.#\n.##\n#..");
        assert!(center(&w));
        assert_eq!(count_around(&w, |v| v), 4);
        assert_eq!(count_around(&w, |v| !v), 4);
    }

    #[test]
    fn life_like_birth_and_survival() {
        let mut rule = life_like(&[3], &[2, 3]);
        assert!(rule(&bools("##.\n.#.\n...")));
        assert!(!rule(&bools("#..\n.#.\n...")));
        assert!(rule(&bools("###\n...\n...")));
        assert!(!rule(&bools("###\n#..\n...")));
        assert!(!rule(&bools("###\n##.\n...")));
    }

    #[test]
    fn diagonal_contact_opened_once_in_place() {
        let mut g = bools("#.\n.#");
        let mut ca = CellularAutomata::new();
        ca.add_cell_rule(connect_diagonals(false, |v| v, |_| true));
        assert_eq!(ca.single_update(&mut g), 1);
        assert_eq!(text(&g), "##\n.#");
    }

    #[test]
    fn diagonal_contact_opened_twice_buffered() {
        let mut g = bools("#.\n.#");
        let mut ca = CellularAutomata::new();
        ca.add_cell_rule(connect_diagonals(false, |v| v, |_| true));
        assert_eq!(ca.update(&mut g), 2);
        assert_eq!(text(&g), "##\n##");
    }

    #[test]
    fn orthogonal_contact_untouched() {
        let mut g = bools("##.\n.##\n...");
        let mut ca = CellularAutomata::new();
        ca.add_cell_rule(connect_diagonals(false, |v| v, |_| true));
        assert_eq!(ca.single_update(&mut g), 0);
    }
}
