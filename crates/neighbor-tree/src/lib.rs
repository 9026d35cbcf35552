pub mod builder;
pub mod layout;
pub mod walkers;
pub mod wire;

pub use builder::{BuildStats, BuiltTree, EdgeInsertion, TreeBuilder, build_tree, validate_graph};
pub use layout::{MIN_PANEL_HEIGHT, ROW_HEIGHT, panel_height};
pub use walkers::{flatten_names, top_level_names, top_level_names_json};
pub use wire::{PayloadNode, WIRE_FORMAT_VERSION, to_json, to_json_pretty, to_payload};
