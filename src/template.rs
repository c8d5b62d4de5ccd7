//! Grid literals: build grids from multi-line character templates.
//!
//! ```
//! use gridforge::grid::Grid;
//!
//! let g = Grid::parse_lookup_or("##\n#.", &[('#', true)], false).unwrap();
//! assert!(g.get(0, 0) && !g.get(1, 1));
//! ```

use crate::error::{GridError, Result};
use crate::grid::Grid;

/// The template's rows; empty lines at either end are dropped so raw-string
/// literals can start on their own line. Lines holding only spaces are rows,
/// since a space may be a mapped cell.
fn template_lines(template: &str) -> Result<Vec<&str>> {
    let lines: Vec<&str> = template.lines().collect();
    let first = lines.iter().position(|l| !l.is_empty());
    let last = lines.iter().rposition(|l| !l.is_empty());
    let (Some(first), Some(last)) = (first, last) else {
        return Err(GridError::EmptyTemplate);
    };
    let lines = lines[first..=last].to_vec();

    let expected = lines[0].chars().count();
    for (line, l) in lines.iter().enumerate() {
        let found = l.chars().count();
        if found != expected {
            return Err(GridError::RaggedTemplate {
                line,
                expected,
                found,
            });
        }
    }
    Ok(lines)
}

impl<T: Copy> Grid<T> {
    /// Parse with a per-character mapping; `None` is an unmapped character.
    pub fn parse(template: &str, mut map: impl FnMut(char) -> Option<T>) -> Result<Self> {
        let lines = template_lines(template)?;
        let w = lines[0].chars().count();
        let h = lines.len();
        let mut data = Vec::with_capacity(w * h);
        for (line, l) in lines.iter().enumerate() {
            for (column, ch) in l.chars().enumerate() {
                let v = map(ch).ok_or(GridError::UnmappedChar { ch, line, column })?;
                data.push(v);
            }
        }
        Grid::from_vec(w, h, data)
    }

    /// Parse with a lookup table; characters missing from it are an error.
    pub fn parse_lookup(template: &str, table: &[(char, T)]) -> Result<Self> {
        Self::parse(template, |ch| lookup(table, ch))
    }

    /// Parse with a lookup table; characters missing from it become `default`.
    pub fn parse_lookup_or(template: &str, table: &[(char, T)], default: T) -> Result<Self> {
        Self::parse(template, |ch| Some(lookup(table, ch).unwrap_or(default)))
    }
}

fn lookup<T: Copy>(table: &[(char, T)], ch: char) -> Option<T> {
    table.iter().find(|(c, _)| *c == ch).map(|&(_, v)| v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_parse_to_all_true() {
        let g = Grid::parse_lookup_or("##\n##", &[('#', true)], false).unwrap();
        assert_eq!((g.w, g.h), (2, 2));
        assert!(g.data.iter().all(|&v| v));
    }

    #[test]
    fn missing_entries_take_default() {
        let g = Grid::parse_lookup_or("#.\n.#", &[('#', 1u8)], 0).unwrap();
        assert_eq!(g.data, vec![1, 0, 0, 1]);
    }

    #[test]
    fn strict_lookup_reports_position() {
        let err = Grid::parse_lookup("##\n#?", &[('#', true)]).unwrap_err();
        assert_eq!(err, GridError::UnmappedChar { ch: '?', line: 1, column: 1 });
    }

    #[test]
    fn empty_template_rejected() {
        assert_eq!(Grid::parse_lookup_or("", &[('#', true)], false), Err(GridError::EmptyTemplate));
        assert_eq!(Grid::parse_lookup_or("\n\r\n\n", &[('#', true)], false), Err(GridError::EmptyTemplate));
    }

    #[test]
    fn space_rows_at_edges_are_kept() {
        let g = Grid::parse_lookup_or("   \n###", &[('#', true)], false).unwrap();
        assert_eq!((g.w, g.h), (3, 2));
        assert_eq!(g.data, vec![false, false, false, true, true, true]);

        let src = Grid::from_rows(&[[true, false, true], [false, false, false]]).unwrap();
        let text = src.to_text(|v| if v { '#' } else { ' ' }, "\n");
        assert_eq!(text, "# #\n   ");
        assert_eq!(Grid::parse_lookup(&text, &[('#', true), (' ', false)]), Ok(src));
    }

    #[test]
    fn ragged_template_rejected() {
        let err = Grid::parse_lookup_or("###\n##\n###", &[('#', true)], false).unwrap_err();
        assert_eq!(err, GridError::RaggedTemplate { line: 1, expected: 3, found: 2 });
    }

    #[test]
    fn surrounding_blank_lines_and_crlf() {
        let g = Grid::parse_lookup_or("\r\n#.#\r\n.#.\r\n", &[('#', true)], false).unwrap();
        assert_eq!((g.w, g.h), (3, 2));
        assert_eq!(g.to_text(|v| if v { '#' } else { '.' }, "\n"), "#.#\n.#.");
    }

    #[test]
    fn closure_mapping() {
        let g = Grid::parse("0123", |c| c.to_digit(10)).unwrap();
        assert_eq!(g.data, vec![0, 1, 2, 3]);
    }
}
