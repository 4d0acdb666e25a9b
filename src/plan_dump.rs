use crate::adapter::{DefinitionTextProvider, MediaSource, resolve_media};
use crate::layout::{LayoutPlan, Orientation, Viewport};
use crate::listing::DirectoryListing;
use crate::sequencer::RenderUnit;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Serializable snapshot of one computed plan, the adapter-facing
/// output of the pipeline: geometry plus resolved media per node.
#[derive(Debug, Serialize)]
pub struct PlanDump {
    pub strategy: String,
    pub viewport: Viewport,
    pub width: f32,
    pub height: f32,
    pub units: Vec<UnitDump>,
}

#[derive(Debug, Serialize)]
pub struct UnitDump {
    pub index: usize,
    pub orientation: Orientation,
    pub nodes: Vec<NodeDump>,
}

#[derive(Debug, Serialize)]
pub struct NodeDump {
    pub id: String,
    pub repo: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<MediaSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
}

impl PlanDump {
    pub fn from_plan(
        plan: &LayoutPlan,
        sequence: &[RenderUnit],
        strategy: &str,
        viewport: Viewport,
        listing: Option<&DirectoryListing>,
        definitions: Option<&dyn DefinitionTextProvider>,
    ) -> Self {
        let units = plan
            .placements
            .iter()
            .map(|placement| {
                let unit = sequence.get(placement.unit);
                let nodes = placement
                    .nodes
                    .iter()
                    .map(|placed| {
                        let node = unit.and_then(|unit| {
                            unit.nodes().into_iter().find(|node| node.id == placed.id)
                        });
                        let repo = node
                            .map(|node| node.repo_name().to_string())
                            .unwrap_or_else(|| placed.id.clone());
                        let media = match (node, listing) {
                            (Some(node), Some(listing)) => Some(resolve_media(node, listing)),
                            _ => None,
                        };
                        let definition = definitions
                            .map(|provider| provider.definition_html(&repo));
                        NodeDump {
                            id: placed.id.clone(),
                            repo,
                            x: placed.x,
                            y: placed.y,
                            width: placed.width,
                            height: placed.height,
                            media,
                            definition,
                        }
                    })
                    .collect();
                UnitDump {
                    index: placement.unit,
                    orientation: placement.orientation,
                    nodes,
                }
            })
            .collect();

        PlanDump {
            strategy: strategy.to_string(),
            viewport,
            width: plan.width,
            height: plan.height,
            units,
        }
    }
}

pub fn write_plan_dump(path: &Path, dump: &PlanDump) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, dump)?;
    Ok(())
}
