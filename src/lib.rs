//! Grid toolkit for procedural map shaping: a dense grid container, a
//! rule-driven cellular automata engine, border detection, dead-end pruning,
//! density smoothing and geometric transforms, plus a cave generation
//! pipeline that strings them together.

pub mod automata;
pub mod border;
pub mod config;
pub mod dead_end;
pub mod error;
pub mod grid;
pub mod render;
pub mod rng;
pub mod rules;
pub mod smooth;
pub mod template;
pub mod transform;

use std::time::Instant;

use automata::CellularAutomata;
use config::{Params, Symmetry};
use smooth::SmoothGrid;

pub use error::GridError;
pub use grid::{Grid, Rect};

const SALT_FILL: u64 = 0x6772_6964_F111_0001;

pub struct Map {
    pub w: usize,
    pub h: usize,
    /// `true` for open floor.
    pub open: Grid<bool>,
    pub inner_border: Grid<bool>,
    pub outer_border: Grid<bool>,
    pub dead_ends_removed: usize,
    pub rgba: Vec<u8>,
}

pub struct Timing {
    pub name: &'static str,
    pub ms: f64,
}

pub fn generate(seed: u64, w: usize, h: usize, params: &Params) -> (Map, Vec<Timing>) {
    let mut timings = Vec::new();
    let total_start = Instant::now();

    // 1. White-noise fill
    let t = Instant::now();
    let fill_seed = rng::stage_seed(seed, SALT_FILL);
    let density = params.fill_density;
    let mut walls = Grid::<bool>::new(w, h);
    walls.par_load(|x, y| rng::cell_unit(x, y, fill_seed) >= density);
    timings.push(Timing {
        name: "noise_fill",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    // 2. Cave shaping on walls; the outside counts as wall
    let t = Instant::now();
    let mut caves = CellularAutomata::new();
    caves.add_moore_rule(true, rules::life_like(&[5, 6, 7, 8], &[4, 5, 6, 7, 8]));
    for _ in 0..params.cave_generations {
        if caves.update(&mut walls) == 0 {
            break;
        }
    }
    let mut open = walls.map(|wall| !wall);
    timings.push(Timing {
        name: "cave_rule",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    // 3. Optional Life generations on the open cells
    if params.life_generations > 0 {
        let t = Instant::now();
        let mut life = CellularAutomata::new();
        life.add_moore_rule(false, rules::conway_life());
        for _ in 0..params.life_generations {
            life.update(&mut open);
        }
        timings.push(Timing {
            name: "life",
            ms: t.elapsed().as_secs_f64() * 1000.0,
        });
    }

    // 4. Density smoothing
    let t = Instant::now();
    {
        let mut smooth = SmoothGrid::new(&mut open, false, |v| v, |_, on| on, params.smooth);
        for _ in 0..params.smooth_passes {
            if smooth.update() == 0 {
                break;
            }
        }
    }
    timings.push(Timing {
        name: "smooth",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    // 5. Join diagonal-only contacts, then prune dead ends
    let t = Instant::now();
    if params.connect_diagonals {
        let mut connect = CellularAutomata::new();
        connect.add_cell_rule(rules::connect_diagonals(false, |v| v, |_| true));
        connect.single_update(&mut open);
    }
    let dead_ends_removed = if params.prune_dead_ends {
        dead_end::remove_dead_ends(&mut open)
    } else {
        0
    };
    timings.push(Timing {
        name: "cleanup",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    // 6. Symmetry
    let t = Instant::now();
    let open = match params.symmetry {
        Symmetry::None => open,
        Symmetry::Horizontal => transform::mirror_left_to_right(&open),
        Symmetry::Vertical => transform::mirror_top_to_bottom(&open),
        Symmetry::Quad => transform::mirror_top_to_bottom(&transform::mirror_left_to_right(&open)),
    };
    timings.push(Timing {
        name: "symmetry",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    // 7. Borders
    let t = Instant::now();
    let inner_border = border::inner_border(&open, |v| v);
    let outer_border = border::outer_border(&open, |v| v);
    timings.push(Timing {
        name: "borders",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    // 8. Render
    let t = Instant::now();
    let rgba = render::render_map(&open, &inner_border, &outer_border);
    timings.push(Timing {
        name: "render",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    let total_ms = total_start.elapsed().as_secs_f64() * 1000.0;
    timings.push(Timing {
        name: "TOTAL",
        ms: total_ms,
    });

    let map = Map {
        w,
        h,
        open,
        inner_border,
        outer_border,
        dead_ends_removed,
        rgba,
    };

    (map, timings)
}
