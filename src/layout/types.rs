use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Mirror,
    Grid,
    Glossary,
    Linear,
}

impl Strategy {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "mirror" => Some(Self::Mirror),
            "grid" => Some(Self::Grid),
            "glossary" => Some(Self::Glossary),
            "linear" => Some(Self::Linear),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Mirror => "mirror",
            Self::Grid => "grid",
            Self::Glossary => "glossary",
            Self::Linear => "linear",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

/// Row direction hint for the presentation layer. Only the Linear
/// strategy ever emits `RightToLeft`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Orientation {
    LeftToRight,
    RightToLeft,
}

impl Orientation {
    pub fn flipped(self) -> Self {
        match self {
            Self::LeftToRight => Self::RightToLeft,
            Self::RightToLeft => Self::LeftToRight,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodePlacement {
    pub id: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitPlacement {
    /// Index of the render unit in the sequence this plan was built from.
    pub unit: usize,
    pub orientation: Orientation,
    pub nodes: Vec<NodePlacement>,
}

/// Concrete geometry for one render sequence under one strategy.
/// `width`/`height` are the maximal placement extents.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LayoutPlan {
    pub placements: Vec<UnitPlacement>,
    pub width: f32,
    pub height: f32,
}

impl LayoutPlan {
    pub(crate) fn recompute_extents(&mut self) {
        let mut width = 0.0f32;
        let mut height = 0.0f32;
        for unit in &self.placements {
            for node in &unit.nodes {
                width = width.max(node.x + node.width);
                height = height.max(node.y + node.height);
            }
        }
        self.width = width;
        self.height = height;
    }
}
