//! Whole-grid geometric transforms. Each returns a new grid; the source is
//! never touched. Rows of the output are filled in parallel.
//!
//! Rotations and diagonal flips swap width and height.

use rayon::prelude::*;

use crate::grid::Grid;

/// Build a `w` x `h` grid where each output cell reads `src` at `f(x, y)`.
fn remap<T, F>(src: &Grid<T>, w: usize, h: usize, f: F) -> Grid<T>
where
    T: Copy + Send + Sync,
    F: Fn(usize, usize) -> (usize, usize) + Sync,
{
    let mut data = vec![src.data[0]; w * h];
    data.par_chunks_mut(w).enumerate().for_each(|(y, row)| {
        for (x, cell) in row.iter_mut().enumerate() {
            let (sx, sy) = f(x, y);
            *cell = src.get(sx, sy);
        }
    });
    Grid { data, w, h }
}

/// Quarter turn clockwise.
pub fn rotate_90<T: Copy + Send + Sync>(src: &Grid<T>) -> Grid<T> {
    let h = src.h;
    remap(src, src.h, src.w, |x, y| (y, h - 1 - x))
}

/// Quarter turn counter-clockwise.
pub fn rotate_minus_90<T: Copy + Send + Sync>(src: &Grid<T>) -> Grid<T> {
    let w = src.w;
    remap(src, src.h, src.w, |x, y| (w - 1 - y, x))
}

pub fn rotate_180<T: Copy + Send + Sync>(src: &Grid<T>) -> Grid<T> {
    let (w, h) = (src.w, src.h);
    remap(src, w, h, |x, y| (w - 1 - x, h - 1 - y))
}

/// Mirror across the vertical axis: columns swap, rows stay.
pub fn flip_h<T: Copy + Send + Sync>(src: &Grid<T>) -> Grid<T> {
    let w = src.w;
    remap(src, w, src.h, |x, y| (w - 1 - x, y))
}

/// Mirror across the horizontal axis: rows swap, columns stay.
pub fn flip_v<T: Copy + Send + Sync>(src: &Grid<T>) -> Grid<T> {
    let h = src.h;
    remap(src, src.w, h, |x, y| (x, h - 1 - y))
}

/// Copy the left half onto the right half, mirrored.
pub fn mirror_left_to_right<T: Copy + Send + Sync>(src: &Grid<T>) -> Grid<T> {
    let w = src.w;
    remap(src, w, src.h, |x, y| (x.min(w - 1 - x), y))
}

/// Copy the right half onto the left half, mirrored.
pub fn mirror_right_to_left<T: Copy + Send + Sync>(src: &Grid<T>) -> Grid<T> {
    let w = src.w;
    remap(src, w, src.h, |x, y| (x.max(w - 1 - x), y))
}

/// Copy the top half onto the bottom half, mirrored.
pub fn mirror_top_to_bottom<T: Copy + Send + Sync>(src: &Grid<T>) -> Grid<T> {
    let h = src.h;
    remap(src, src.w, h, |x, y| (x, y.min(h - 1 - y)))
}

/// Copy the bottom half onto the top half, mirrored.
pub fn mirror_bottom_to_top<T: Copy + Send + Sync>(src: &Grid<T>) -> Grid<T> {
    let h = src.h;
    remap(src, src.w, h, |x, y| (x, y.max(h - 1 - y)))
}

/// Transpose along the main diagonal (top-left to bottom-right).
pub fn flip_diagonal<T: Copy + Send + Sync>(src: &Grid<T>) -> Grid<T> {
    remap(src, src.h, src.w, |x, y| (y, x))
}

/// Transpose along the secondary diagonal (top-right to bottom-left).
pub fn flip_diagonal_secondary<T: Copy + Send + Sync>(src: &Grid<T>) -> Grid<T> {
    let (w, h) = (src.w, src.h);
    remap(src, h, w, |x, y| (w - 1 - y, h - 1 - x))
}

/// Crop or pad to `w` x `h`, anchored at the origin; new cells get
/// `default`. Hands the input back untouched when the size already matches.
pub fn resize<T: Copy>(src: Grid<T>, w: usize, h: usize, default: T) -> Grid<T> {
    if src.w == w && src.h == h {
        return src;
    }
    let mut out = Grid::filled(w, h, default);
    src.copy_to(&mut out, 0, 0, default);
    out
}
