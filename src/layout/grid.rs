use super::*;

/// Tile units into fixed-size cells, ignoring stored geometry. The
/// column wraps after `items_per_row`; cluster members split their
/// cell's width evenly.
pub(super) fn compute_grid_plan(sequence: &[RenderUnit], config: &LayoutConfig) -> LayoutPlan {
    let items_per_row = config.items_per_row.max(1);
    let mut plan = LayoutPlan::default();
    let mut col = 0usize;
    let mut row = 0usize;
    for (index, unit) in sequence.iter().enumerate() {
        let cell_x =
            config.border_size + col as f32 * (config.cell_width + config.horizontal_spacing);
        let cell_y =
            config.border_size + row as f32 * (config.cell_height + config.vertical_spacing);
        let members = unit.nodes();
        let member_width = config.cell_width / members.len() as f32;
        let nodes = members
            .iter()
            .enumerate()
            .map(|(slot, node)| NodePlacement {
                id: node.id.clone(),
                x: cell_x + slot as f32 * member_width,
                y: cell_y,
                width: member_width,
                height: config.cell_height,
            })
            .collect();
        plan.placements.push(UnitPlacement {
            unit: index,
            orientation: Orientation::LeftToRight,
            nodes,
        });
        col += 1;
        if col >= items_per_row {
            col = 0;
            row += 1;
        }
    }
    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{Node, NodeContent};
    use crate::sequencer::Cluster;

    fn node(id: &str) -> Node {
        Node {
            id: id.to_string(),
            content: NodeContent::Text {
                text: String::new(),
            },
            geometry: None,
        }
    }

    fn singles(count: usize) -> Vec<RenderUnit> {
        (0..count)
            .map(|i| RenderUnit::Single(node(&format!("n{i}"))))
            .collect()
    }

    fn viewport() -> Viewport {
        Viewport {
            width: 1200.0,
            height: 800.0,
        }
    }

    #[test]
    fn fifth_unit_wraps_to_the_second_row() {
        let plan = compute_plan(
            &singles(5),
            Strategy::Grid,
            viewport(),
            &LayoutConfig::default(),
        );
        let placed = &plan.placements[4].nodes[0];
        assert_eq!(placed.x, 50.0);
        assert_eq!(placed.y, 500.0);
    }

    #[test]
    fn columns_advance_by_cell_plus_spacing() {
        let plan = compute_plan(
            &singles(2),
            Strategy::Grid,
            viewport(),
            &LayoutConfig::default(),
        );
        assert_eq!(plan.placements[0].nodes[0].x, 50.0);
        assert_eq!(plan.placements[1].nodes[0].x, 500.0);
        assert_eq!(plan.placements[1].nodes[0].y, 50.0);
    }

    #[test]
    fn cluster_members_split_the_cell_width() {
        let sequence = vec![RenderUnit::Cluster(Cluster {
            anchor: node("a"),
            attachments: vec![node("t")],
        })];
        let plan = compute_plan(
            &sequence,
            Strategy::Grid,
            viewport(),
            &LayoutConfig::default(),
        );
        let nodes = &plan.placements[0].nodes;
        assert_eq!(nodes[0].width, 200.0);
        assert_eq!(nodes[1].x, 250.0);
        assert_eq!(nodes[1].width, 200.0);
    }

    #[test]
    fn zero_items_per_row_does_not_divide_by_zero() {
        let config = LayoutConfig {
            items_per_row: 0,
            ..LayoutConfig::default()
        };
        let plan = compute_plan(&singles(3), Strategy::Grid, viewport(), &config);
        // Degenerate config clamps to one column.
        assert_eq!(plan.placements[1].nodes[0].y, 500.0);
        assert_eq!(plan.placements[2].nodes[0].y, 950.0);
    }
}
