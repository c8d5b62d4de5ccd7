use std::net::SocketAddr;

use axum::{Json, Router, routing::post};
use base64::Engine;
use image::ImageEncoder;
use image::codecs::png::PngEncoder;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use gridforge::config::Params;
use gridforge::render;

/// Largest accepted side length, keeps a single request bounded.
const MAX_SIDE: usize = 4096;

#[derive(Deserialize)]
struct GenerateRequest {
    seed: Option<u64>,
    width: Option<usize>,
    height: Option<usize>,
    #[serde(flatten)]
    params: Params,
}

#[derive(Serialize)]
struct GenerateResponse {
    layers: Vec<Layer>,
    timings: Vec<TimingEntry>,
    width: usize,
    height: usize,
    open_cells: usize,
    dead_ends_removed: usize,
}

#[derive(Serialize)]
struct Layer {
    name: String,
    data_url: String,
}

#[derive(Serialize)]
struct TimingEntry {
    name: String,
    ms: f64,
}

fn encode_png(rgba: &[u8], w: usize, h: usize) -> String {
    let mut buf = Vec::new();
    let encoder = PngEncoder::new(&mut buf);
    encoder
        .write_image(rgba, w as u32, h as u32, image::ExtendedColorType::Rgba8)
        .expect("PNG encode failed");
    let b64 = base64::engine::general_purpose::STANDARD.encode(&buf);
    format!("data:image/png;base64,{}", b64)
}

async fn generate_handler(Json(req): Json<GenerateRequest>) -> Json<GenerateResponse> {
    let seed = req.seed.unwrap_or(42);
    let width = req.width.unwrap_or(160).clamp(1, MAX_SIDE);
    let height = req.height.unwrap_or(90).clamp(1, MAX_SIDE);
    let params = req.params;

    let response = tokio::task::spawn_blocking(move || {
        let (map, timings) = gridforge::generate(seed, width, height, &params);

        let layers = vec![
            Layer {
                name: "map".into(),
                data_url: encode_png(&map.rgba, width, height),
            },
            Layer {
                name: "open".into(),
                data_url: encode_png(
                    &render::render_mask(&map.open, render::FLOOR, render::WALL),
                    width,
                    height,
                ),
            },
            Layer {
                name: "inner_border".into(),
                data_url: encode_png(
                    &render::render_mask(&map.inner_border, render::INNER_EDGE, render::WALL),
                    width,
                    height,
                ),
            },
            Layer {
                name: "outer_border".into(),
                data_url: encode_png(
                    &render::render_mask(&map.outer_border, render::OUTER_EDGE, render::WALL),
                    width,
                    height,
                ),
            },
        ];

        let timing_entries = timings
            .iter()
            .map(|t| TimingEntry {
                name: t.name.to_string(),
                ms: t.ms,
            })
            .collect();

        GenerateResponse {
            layers,
            timings: timing_entries,
            width,
            height,
            open_cells: map.open.count(|v| v),
            dead_ends_removed: map.dead_ends_removed,
        }
    })
    .await
    .unwrap();

    Json(response)
}

#[tokio::main]
async fn main() {
    let app = Router::new()
        .route("/api/generate", post(generate_handler))
        .layer(CorsLayer::permissive());

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    eprintln!("gridforge server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
