use std::fmt::{Display, Write as _};
use std::ops::{Index, IndexMut};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};

/// Orthogonal offsets in enumeration order: Up, Right, Down, Left.
pub const ORTHOGONAL: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// Moore offsets in row-major order, center excluded.
pub const MOORE: [(i32, i32); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1, 0),           (1, 0),
    (-1, 1),  (0, 1),  (1, 1),
];

/// Axis-aligned sub-rectangle: origin plus extent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub w: usize,
    pub h: usize,
}

impl Rect {
    pub fn new(x: usize, y: usize, w: usize, h: usize) -> Self {
        Self { x, y, w, h }
    }

    /// Intersection with a `w` x `h` grid anchored at the origin.
    pub fn clip(self, w: usize, h: usize) -> Self {
        let x0 = self.x.min(w);
        let y0 = self.y.min(h);
        let x1 = self.x.saturating_add(self.w).min(w);
        let y1 = self.y.saturating_add(self.h).min(h);
        Self {
            x: x0,
            y: y0,
            w: x1 - x0,
            h: y1 - y0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Cell positions inside the rectangle, row-major.
    pub fn positions(self) -> impl Iterator<Item = (usize, usize)> {
        let Rect { x, y, w, h } = self;
        (y..y + h).flat_map(move |py| (x..x + w).map(move |px| (px, py)))
    }
}

/// Row-major flat grid addressed as `(x, y)`.
///
/// `data.len() == w * h` always holds for grids built through the
/// constructors or deserialized; code that writes the public fields directly
/// must keep it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "RawGrid<T>",
    bound(deserialize = "T: Copy + Deserialize<'de>")
)]
pub struct Grid<T> {
    pub data: Vec<T>,
    pub w: usize,
    pub h: usize,
}

/// Unchecked wire form; becomes a [`Grid`] only through [`Grid::from_vec`].
#[derive(Deserialize)]
struct RawGrid<T> {
    data: Vec<T>,
    w: usize,
    h: usize,
}

impl<T: Copy> TryFrom<RawGrid<T>> for Grid<T> {
    type Error = GridError;

    fn try_from(raw: RawGrid<T>) -> Result<Self> {
        Grid::from_vec(raw.w, raw.h, raw.data)
    }
}

impl<T: Copy + Default> Grid<T> {
    /// Grid filled with `T::default()`. Panics on a zero dimension.
    pub fn new(w: usize, h: usize) -> Self {
        Self::filled(w, h, T::default())
    }
}

impl<T: Copy> Grid<T> {
    /// Grid with every cell set to `value`. Panics on a zero dimension.
    pub fn filled(w: usize, h: usize, value: T) -> Self {
        assert!(w > 0 && h > 0, "grid dimensions must be non-zero, got {w}x{h}");
        Self {
            data: vec![value; w * h],
            w,
            h,
        }
    }

    /// Wrap an existing row-major buffer.
    pub fn from_vec(w: usize, h: usize, data: Vec<T>) -> Result<Self> {
        if w == 0 || h == 0 {
            return Err(GridError::ZeroSize { w, h });
        }
        if data.len() != w * h {
            return Err(GridError::LengthMismatch {
                w,
                h,
                found: data.len(),
            });
        }
        Ok(Self { data, w, h })
    }

    /// Build from nested rows; `rows[y][x]` becomes cell `(x, y)`.
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self> {
        let h = rows.len();
        let w = rows.first().map_or(0, |r| r.as_ref().len());
        if w == 0 || h == 0 {
            return Err(GridError::ZeroSize { w, h });
        }
        let mut data = Vec::with_capacity(w * h);
        for (row, r) in rows.iter().enumerate() {
            let r = r.as_ref();
            if r.len() != w {
                return Err(GridError::RaggedRows {
                    row,
                    expected: w,
                    found: r.len(),
                });
            }
            data.extend_from_slice(r);
        }
        Ok(Self { data, w, h })
    }

    /// Grid whose cells are computed from their coordinates.
    pub fn from_fn(w: usize, h: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        assert!(w > 0 && h > 0, "grid dimensions must be non-zero, got {w}x{h}");
        let mut data = Vec::with_capacity(w * h);
        for y in 0..h {
            for x in 0..w {
                data.push(f(x, y));
            }
        }
        Self { data, w, h }
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.w && y < self.h,
            "position ({x}, {y}) is outside a {}x{} grid",
            self.w,
            self.h
        );
        y * self.w + x
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.w, self.h)
    }

    /// Unchecked read. Panics outside the grid.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> T {
        self.data[self.idx(x, y)]
    }

    /// Unchecked write. Panics outside the grid.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: T) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }

    pub fn try_get(&self, x: usize, y: usize) -> Result<T> {
        if x < self.w && y < self.h {
            Ok(self.data[y * self.w + x])
        } else {
            Err(self.out_of_bounds(x as i64, y as i64))
        }
    }

    pub fn try_set(&mut self, x: usize, y: usize, v: T) -> Result<()> {
        if x < self.w && y < self.h {
            self.data[y * self.w + x] = v;
            Ok(())
        } else {
            Err(self.out_of_bounds(x as i64, y as i64))
        }
    }

    /// Safe read: `default` for any position outside the grid.
    #[inline]
    pub fn get_or(&self, x: i32, y: i32, default: T) -> T {
        if self.in_bounds(x, y) {
            self.data[y as usize * self.w + x as usize]
        } else {
            default
        }
    }

    fn out_of_bounds(&self, x: i64, y: i64) -> GridError {
        GridError::OutOfBounds {
            x,
            y,
            w: self.w,
            h: self.h,
        }
    }

    /// All positions, row-major: y outer, x inner.
    pub fn positions(&self) -> impl Iterator<Item = (usize, usize)> + use<T> {
        self.bounds().positions()
    }

    /// `((x, y), value)` pairs in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = ((usize, usize), T)> + '_ {
        let w = self.w;
        self.data
            .iter()
            .enumerate()
            .map(move |(i, &v)| ((i % w, i / w), v))
    }

    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    /// Fill the part of `rect` that lies inside the grid.
    pub fn fill_rect(&mut self, rect: Rect, value: T) {
        let r = rect.clip(self.w, self.h);
        for y in r.y..r.y + r.h {
            let row = y * self.w;
            self.data[row + r.x..row + r.x + r.w].fill(value);
        }
    }

    pub fn load(&mut self, f: impl FnMut(usize, usize) -> T) {
        self.load_rect(self.bounds(), f);
    }

    pub fn load_rect(&mut self, rect: Rect, mut f: impl FnMut(usize, usize) -> T) {
        for (x, y) in rect.clip(self.w, self.h).positions() {
            let i = y * self.w + x;
            self.data[i] = f(x, y);
        }
    }

    /// Row-parallel `load` for pure, thread-safe value functions.
    pub fn par_load<F>(&mut self, f: F)
    where
        T: Send,
        F: Fn(usize, usize) -> T + Sync,
    {
        let w = self.w;
        self.data.par_chunks_mut(w).enumerate().for_each(|(y, row)| {
            for (x, cell) in row.iter_mut().enumerate() {
                *cell = f(x, y);
            }
        });
    }

    /// Rewrite each cell from its own current value.
    pub fn transform(&mut self, mut f: impl FnMut(T) -> T) {
        for cell in &mut self.data {
            *cell = f(*cell);
        }
    }

    /// Rewrite each cell from its position and current value, row-major.
    pub fn transform_with_pos(&mut self, mut f: impl FnMut(usize, usize, T) -> T) {
        let w = self.w;
        for (i, cell) in self.data.iter_mut().enumerate() {
            *cell = f(i % w, i / w, *cell);
        }
    }

    /// Deep copy with a per-cell conversion.
    pub fn map<U>(&self, f: impl FnMut(T) -> U) -> Grid<U> {
        Grid {
            data: self.data.iter().copied().map(f).collect(),
            w: self.w,
            h: self.h,
        }
    }

    /// Copy into `dest` with this grid's `(ox, oy)` landing on `dest`'s origin.
    /// Destination cells with no source counterpart get `default`.
    pub fn copy_to(&self, dest: &mut Grid<T>, ox: i32, oy: i32, default: T) {
        let dw = dest.w;
        for (i, cell) in dest.data.iter_mut().enumerate() {
            let x = (i % dw) as i32 + ox;
            let y = (i / dw) as i32 + oy;
            *cell = self.get_or(x, y, default);
        }
    }

    /// Fill `window` with the cells centered on `(x, y)`; out-of-grid cells get
    /// `default`. The window must be odd in both dimensions.
    pub fn copy_neighbors(&self, x: usize, y: usize, window: &mut Grid<T>, default: T) -> Result<()> {
        if window.w % 2 == 0 || window.h % 2 == 0 {
            return Err(GridError::EvenWindow {
                w: window.w,
                h: window.h,
            });
        }
        let ox = x as i32 - (window.w / 2) as i32;
        let oy = y as i32 - (window.h / 2) as i32;
        self.copy_to(window, ox, oy, default);
        Ok(())
    }

    /// Allocating variant of [`Grid::copy_neighbors`] for a square window.
    pub fn neighbors(&self, x: usize, y: usize, size: usize, default: T) -> Result<Grid<T>> {
        if size == 0 {
            return Err(GridError::ZeroSize { w: size, h: size });
        }
        let mut window = Grid::filled(size, size, default);
        self.copy_neighbors(x, y, &mut window, default)?;
        Ok(window)
    }

    /// In-grid orthogonal neighbor positions in Up, Right, Down, Left order.
    pub fn orthogonal_neighbors(&self, x: usize, y: usize) -> impl Iterator<Item = (usize, usize)> + use<T> {
        neighbors4(x, y, self.w, self.h)
    }

    /// Orthogonal neighbors whose value satisfies `pred`, same order.
    pub fn orthogonal_neighbors_where<'a>(
        &'a self,
        x: usize,
        y: usize,
        pred: impl Fn(T) -> bool + 'a,
    ) -> impl Iterator<Item = (usize, usize)> + 'a {
        self.orthogonal_neighbors(x, y)
            .filter(move |&(nx, ny)| pred(self.get(nx, ny)))
    }

    pub fn count(&self, pred: impl Fn(T) -> bool) -> usize {
        self.data.iter().filter(|&&v| pred(v)).count()
    }

    /// Orthogonal neighbors matching `pred`; out-of-grid cells read as `default`.
    pub fn count_orthogonal(&self, x: usize, y: usize, default: T, pred: impl Fn(T) -> bool) -> usize {
        count_offsets(self, x, y, &ORTHOGONAL, default, pred)
    }

    /// Moore neighbors matching `pred`; out-of-grid cells read as `default`.
    pub fn count_moore(&self, x: usize, y: usize, default: T, pred: impl Fn(T) -> bool) -> usize {
        count_offsets(self, x, y, &MOORE, default, pred)
    }

    /// Render row-major, one line per row, joined with `line_sep`.
    pub fn to_text<S: Display>(&self, mut cell: impl FnMut(T) -> S, line_sep: &str) -> String {
        let mut out = String::with_capacity((self.w + line_sep.len()) * self.h);
        for y in 0..self.h {
            if y > 0 {
                out.push_str(line_sep);
            }
            for &v in &self.data[y * self.w..(y + 1) * self.w] {
                let _ = write!(out, "{}", cell(v));
            }
        }
        out
    }
}

fn count_offsets<T: Copy>(
    grid: &Grid<T>,
    x: usize,
    y: usize,
    offsets: &[(i32, i32)],
    default: T,
    pred: impl Fn(T) -> bool,
) -> usize {
    offsets
        .iter()
        .filter(|&&(dx, dy)| pred(grid.get_or(x as i32 + dx, y as i32 + dy, default)))
        .count()
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    fn index(&self, (x, y): (usize, usize)) -> &T {
        assert!(x < self.w && y < self.h, "position ({x}, {y}) is outside a {}x{} grid", self.w, self.h);
        &self.data[y * self.w + x]
    }
}

impl<T> IndexMut<(usize, usize)> for Grid<T> {
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut T {
        assert!(x < self.w && y < self.h, "position ({x}, {y}) is outside a {}x{} grid", self.w, self.h);
        &mut self.data[y * self.w + x]
    }
}

/// 4-connected in-bounds neighbors in Up, Right, Down, Left order. No wrapping.
pub fn neighbors4(x: usize, y: usize, w: usize, h: usize) -> impl Iterator<Item = (usize, usize)> {
    let mut out = [(0usize, 0usize); 4];
    let mut n = 0;
    for (dx, dy) in ORTHOGONAL {
        let nx = x as i64 + dx as i64;
        let ny = y as i64 + dy as i64;
        if nx >= 0 && ny >= 0 && (nx as usize) < w && (ny as usize) < h {
            out[n] = (nx as usize, ny as usize);
            n += 1;
        }
    }
    out.into_iter().take(n)
}
