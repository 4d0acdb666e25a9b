use super::*;

/// Serpentine narrative flow: glossary composition with rows centered
/// on the viewport, row direction alternating on every successive
/// cluster. Standalone units keep the current direction without
/// flipping it.
pub(super) fn compute_linear_plan(
    sequence: &[RenderUnit],
    viewport: Viewport,
    config: &LayoutConfig,
) -> LayoutPlan {
    let mut plan = LayoutPlan::default();
    let mut y = config.border_size;
    let mut orientation = Orientation::LeftToRight;
    for (index, unit) in sequence.iter().enumerate() {
        let (row_width, row_height) = row_extent(unit, config);
        let origin_x = ((viewport.width - row_width) / 2.0).max(0.0);
        let nodes = compose_row(unit, origin_x, y, orientation, config);
        plan.placements.push(UnitPlacement {
            unit: index,
            orientation,
            nodes,
        });
        if unit.is_cluster() {
            orientation = orientation.flipped();
        }
        y += row_height + config.row_spacing;
    }
    plan
}
