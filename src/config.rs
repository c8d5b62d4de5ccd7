use serde::{Deserialize, Serialize};

use crate::smooth::SmoothThresholds;

/// Whole-map symmetry applied after shaping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Symmetry {
    #[default]
    None,
    /// Left half reflected onto the right.
    Horizontal,
    /// Top half reflected onto the bottom.
    Vertical,
    /// Top-left quadrant reflected into all four.
    Quad,
}

/// All tunable parameters of the generation pipeline.
/// Missing JSON fields fall back to the defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    // Noise
    /// Chance that a cell starts open.
    pub fill_density: f32,

    // Shaping
    /// Generations of the wall rule (B5678/S45678 on walls).
    pub cave_generations: usize,
    /// Generations of Conway's Life on the open cells.
    pub life_generations: usize,
    pub smooth: SmoothThresholds,
    pub smooth_passes: usize,

    // Cleanup
    pub connect_diagonals: bool,
    pub prune_dead_ends: bool,
    pub symmetry: Symmetry,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            fill_density: 0.55,
            cave_generations: 5,
            life_generations: 0,
            smooth: SmoothThresholds {
                // Above 8: removal off.
                delete_if_less_than: 9,
                add_if_more_than: 5,
            },
            smooth_passes: 2,
            connect_diagonals: true,
            prune_dead_ends: true,
            symmetry: Symmetry::None,
        }
    }
}
