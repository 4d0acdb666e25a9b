use super::*;

/// Vertical stack from the border offset. A cluster renders as a
/// left-to-right row, anchor media beside its attachment text; the
/// stack advances by the tallest member plus the row spacing.
pub(super) fn compute_glossary_plan(sequence: &[RenderUnit], config: &LayoutConfig) -> LayoutPlan {
    let mut plan = LayoutPlan::default();
    let mut y = config.border_size;
    for (index, unit) in sequence.iter().enumerate() {
        let (_, row_height) = row_extent(unit, config);
        let nodes = compose_row(unit, config.border_size, y, Orientation::LeftToRight, config);
        plan.placements.push(UnitPlacement {
            unit: index,
            orientation: Orientation::LeftToRight,
            nodes,
        });
        y += row_height + config.row_spacing;
    }
    plan
}
