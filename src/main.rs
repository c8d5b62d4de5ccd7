use std::path::PathBuf;

use serde::Serialize;

use gridforge::config::Params;
use gridforge::render;

#[derive(Serialize)]
struct Summary {
    seed: u64,
    width: usize,
    height: usize,
    open_cells: usize,
    inner_border_cells: usize,
    outer_border_cells: usize,
    dead_ends_removed: usize,
    params: Params,
    timings_ms: Vec<(String, f64)>,
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let seed: u64 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(42);
    let width: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(160);
    let height: usize = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(90);
    let out_dir: PathBuf = args
        .get(4)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("artifacts"));

    if width == 0 || height == 0 {
        eprintln!("width and height must be non-zero");
        std::process::exit(2);
    }

    std::fs::create_dir_all(&out_dir).expect("failed to create output directory");

    let params = Params::default();

    eprintln!(
        "Generating {}x{} map with seed={}, density={}, cave_generations={}",
        width, height, seed, params.fill_density, params.cave_generations
    );

    let (map, timings) = gridforge::generate(seed, width, height, &params);

    eprintln!("\nTimings:");
    for t in &timings {
        eprintln!("  {:20} {:8.1} ms", t.name, t.ms);
    }

    let save = |name: &str, rgba: &[u8]| {
        let path = out_dir.join(name);
        image::save_buffer(&path, rgba, width as u32, height as u32, image::ColorType::Rgba8)
            .expect("failed to save image");
        eprintln!("Saved {}", path.display());
    };

    save("map.png", &map.rgba);
    save("open.png", &render::render_mask(&map.open, render::FLOOR, render::WALL));
    save(
        "inner_border.png",
        &render::render_mask(&map.inner_border, render::INNER_EDGE, render::WALL),
    );
    save(
        "outer_border.png",
        &render::render_mask(&map.outer_border, render::OUTER_EDGE, render::WALL),
    );

    let summary = Summary {
        seed,
        width,
        height,
        open_cells: map.open.count(|v| v),
        inner_border_cells: map.inner_border.count(|v| v),
        outer_border_cells: map.outer_border.count(|v| v),
        dead_ends_removed: map.dead_ends_removed,
        params,
        timings_ms: timings.iter().map(|t| (t.name.to_string(), t.ms)).collect(),
    };
    let path = out_dir.join("summary.json");
    let json = serde_json::to_string_pretty(&summary).expect("summary serializes");
    std::fs::write(&path, json).expect("failed to write summary");
    eprintln!("Saved {}", path.display());

    if width <= 120 && height <= 60 {
        println!("{}", map.open.to_text(|v| if v { '.' } else { '#' }, "\n"));
    }

    eprintln!("\nDone.");
}
