use rayon::prelude::*;

use crate::grid::Grid;

pub const WALL: [u8; 4] = [38, 34, 46, 255];
pub const FLOOR: [u8; 4] = [196, 184, 150, 255];
pub const INNER_EDGE: [u8; 4] = [224, 150, 64, 255];
pub const OUTER_EDGE: [u8; 4] = [92, 120, 170, 255];

/// Render the final map: floor and wall, with the inner border drawn over
/// floor and the outer border over wall.
pub fn render_map(open: &Grid<bool>, inner: &Grid<bool>, outer: &Grid<bool>) -> Vec<u8> {
    let w = open.w;
    let mut rgba = vec![0u8; w * open.h * 4];

    rgba.par_chunks_mut(w * 4).enumerate().for_each(|(y, row)| {
        for x in 0..w {
            let color = if inner.get(x, y) {
                INNER_EDGE
            } else if outer.get(x, y) {
                OUTER_EDGE
            } else if open.get(x, y) {
                FLOOR
            } else {
                WALL
            };
            row[x * 4..x * 4 + 4].copy_from_slice(&color);
        }
    });

    rgba
}

/// Diagnostic: one color for set cells, another for the rest.
pub fn render_mask(mask: &Grid<bool>, on: [u8; 4], off: [u8; 4]) -> Vec<u8> {
    let w = mask.w;
    let mut rgba = vec![0u8; w * mask.h * 4];

    rgba.par_chunks_mut(w * 4).enumerate().for_each(|(y, row)| {
        for x in 0..w {
            let color = if mask.get(x, y) { on } else { off };
            row[x * 4..x * 4 + 4].copy_from_slice(&color);
        }
    });

    rgba
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_layers_take_priority() {
        let open = Grid::from_vec(3, 1, vec![true, true, false]).unwrap();
        let inner = Grid::from_vec(3, 1, vec![false, true, false]).unwrap();
        let outer = Grid::from_vec(3, 1, vec![false, false, true]).unwrap();
        let rgba = render_map(&open, &inner, &outer);
        assert_eq!(rgba.len(), 12);
        assert_eq!(&rgba[0..4], &FLOOR);
        assert_eq!(&rgba[4..8], &INNER_EDGE);
        assert_eq!(&rgba[8..12], &OUTER_EDGE);
    }

    #[test]
    fn mask_rows_land_in_order() {
        let mask = Grid::from_vec(2, 2, vec![false, false, true, false]).unwrap();
        let rgba = render_mask(&mask, [255; 4], [0, 0, 0, 255]);
        assert_eq!(&rgba[8..12], &[255; 4]);
        assert_eq!(&rgba[0..4], &[0, 0, 0, 255]);
    }
}
