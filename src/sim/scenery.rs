//! Static decorations: trees and the camp tent
//!
//! Placed once per game. Nothing moves them and nothing collides with them.

use glam::Vec2;
use rand::Rng;
use serde::Serialize;

use crate::tuning::{SceneryLayout, Tuning};

/// A pine tree (drawn as stacked triangles)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tree {
    pub pos: Vec2,
    pub size: f32,
}

/// The camp tent, anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tent {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scenery {
    pub trees: Vec<Tree>,
    pub tent: Tent,
}

/// Hand-placed trees as (x, y, size)
const FIXED_TREES: [(f32, f32, f32); 3] = [
    (100.0, 100.0, 40.0),
    (300.0, 200.0, 50.0),
    (500.0, 150.0, 45.0),
];

/// Keep scattered trees this far from the field edges
const TREE_EDGE_INSET: f32 = 50.0;

impl Scenery {
    /// Lay out scenery for the configured layout
    pub fn generate(tuning: &Tuning, rng: &mut impl Rng) -> Self {
        let trees = match tuning.scenery {
            SceneryLayout::Fixed => FIXED_TREES
                .iter()
                .map(|&(x, y, size)| Tree {
                    pos: Vec2::new(x, y),
                    size,
                })
                .collect(),
            SceneryLayout::Scattered { trees } => {
                let max_x = (tuning.field_width - TREE_EDGE_INSET).max(TREE_EDGE_INSET + 1.0);
                let max_y = (tuning.field_height - TREE_EDGE_INSET).max(TREE_EDGE_INSET + 1.0);
                (0..trees)
                    .map(|_| Tree {
                        pos: Vec2::new(
                            rng.random_range(TREE_EDGE_INSET..max_x),
                            rng.random_range(TREE_EDGE_INSET..max_y),
                        ),
                        size: rng.random_range(30.0f32..50.0),
                    })
                    .collect()
            }
        };

        Self {
            trees,
            tent: Tent {
                pos: Vec2::new(tuning.field_width - 150.0, 100.0),
                width: 100.0,
                height: 80.0,
            },
        }
    }
}
