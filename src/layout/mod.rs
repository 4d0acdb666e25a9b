mod glossary;
mod grid;
mod linear;
mod mirror;
pub(crate) mod types;
pub use types::*;
use glossary::*;
use grid::*;
use linear::*;
use mirror::*;

use crate::canvas::Node;
use crate::config::LayoutConfig;
use crate::sequencer::RenderUnit;

/// Turn a render sequence into concrete geometry under one strategy.
/// Pure and total: missing node geometry falls back to a fixed size.
pub fn compute_plan(
    sequence: &[RenderUnit],
    strategy: Strategy,
    viewport: Viewport,
    config: &LayoutConfig,
) -> LayoutPlan {
    let mut plan = match strategy {
        Strategy::Mirror => compute_mirror_plan(sequence, viewport, config),
        Strategy::Grid => compute_grid_plan(sequence, config),
        Strategy::Glossary => compute_glossary_plan(sequence, config),
        Strategy::Linear => compute_linear_plan(sequence, viewport, config),
    };
    plan.recompute_extents();
    plan
}

/// Resolve a strategy by name. An unrecognized name yields an empty
/// plan instead of an error, so a misconfigured viewer still loads.
pub fn compute_plan_named(
    sequence: &[RenderUnit],
    strategy: &str,
    viewport: Viewport,
    config: &LayoutConfig,
) -> LayoutPlan {
    match Strategy::from_name(strategy) {
        Some(strategy) => compute_plan(sequence, strategy, viewport, config),
        None => {
            tracing::warn!(strategy, "unknown layout strategy, producing empty plan");
            LayoutPlan::default()
        }
    }
}

pub(super) fn node_size(node: &Node, config: &LayoutConfig) -> (f32, f32) {
    node.size()
        .unwrap_or((config.fallback_width, config.fallback_height))
}

/// Width and height one unit occupies when composed as a row.
pub(super) fn row_extent(unit: &RenderUnit, config: &LayoutConfig) -> (f32, f32) {
    let mut width = 0.0f32;
    let mut height = 0.0f32;
    for node in unit.nodes() {
        let (w, h) = node_size(node, config);
        width += w;
        height = height.max(h);
    }
    (width, height)
}

/// Place a unit's members as one horizontal row starting at `origin_x`.
/// Placements stay in member order; `RightToLeft` reverses the
/// positions, not the list.
pub(super) fn compose_row(
    unit: &RenderUnit,
    origin_x: f32,
    y: f32,
    orientation: Orientation,
    config: &LayoutConfig,
) -> Vec<NodePlacement> {
    let (row_width, _) = row_extent(unit, config);
    let mut placements = Vec::new();
    let mut offset = 0.0f32;
    for node in unit.nodes() {
        let (width, height) = node_size(node, config);
        let x = match orientation {
            Orientation::LeftToRight => origin_x + offset,
            Orientation::RightToLeft => origin_x + row_width - offset - width,
        };
        placements.push(NodePlacement {
            id: node.id.clone(),
            x,
            y,
            width,
            height,
        });
        offset += width;
    }
    placements
}
