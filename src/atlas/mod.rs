mod error;
mod graph;
mod load;
mod parse;

#[cfg(test)]
pub use graph::Mark;
pub use graph::{Atlas, Marks, SystemRecord};
pub use load::{LoadedAtlas, export_atlas, load_atlas, parse_overlay_bytes, read_overlay};
