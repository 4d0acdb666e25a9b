use super::*;

/// Mirror the authoring tool's free-form coordinates onto the viewport:
/// canvas origin maps to the viewport center, y axis flips. Clustering
/// is ignored; every node keeps its stored position.
pub(super) fn compute_mirror_plan(
    sequence: &[RenderUnit],
    viewport: Viewport,
    config: &LayoutConfig,
) -> LayoutPlan {
    let mut plan = LayoutPlan::default();
    for (index, unit) in sequence.iter().enumerate() {
        let nodes = unit
            .nodes()
            .into_iter()
            .map(|node| {
                let (x, y) = node.position().unwrap_or((0.0, 0.0));
                let (width, height) = node_size(node, config);
                NodePlacement {
                    id: node.id.clone(),
                    x: x + viewport.width / 2.0,
                    y: viewport.height / 2.0 - y,
                    width,
                    height,
                }
            })
            .collect();
        plan.placements.push(UnitPlacement {
            unit: index,
            orientation: Orientation::LeftToRight,
            nodes,
        });
    }
    plan
}
