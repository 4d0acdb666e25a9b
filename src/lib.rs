pub mod adapter;
pub mod canvas;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod layout;
pub mod listing;
pub mod markdown;
pub mod parser;
pub mod plan_dump;
pub mod sequencer;

#[cfg(feature = "cli")]
pub use cli::run;

pub use canvas::{Edge, EdgeKind, Geometry, GraphModel, Node, NodeContent};
pub use error::CanvasError;
pub use config::{Config, LayoutConfig, load_config};
pub use layout::{LayoutPlan, Strategy, Viewport, compute_plan, compute_plan_named};
pub use parser::{load_canvas, parse_canvas};
pub use sequencer::{RenderSequence, RenderUnit, compute_sequence};
