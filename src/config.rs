use std::path::PathBuf;

use clap::Parser;

#[derive(Clone, Debug, Parser)]
#[command(author, version, about)]
pub struct MapConfig {
    /// System document: JSON object keyed by system id.
    #[arg(long, default_value = "json/systemData.json")]
    pub data: PathBuf,

    /// Optional mark document grouping systems into claims.
    #[arg(long)]
    pub marks: Option<PathBuf>,

    /// System the camera starts on and that is drawn in gold.
    #[arg(long, default_value = "The Citadel")]
    pub home: String,

    /// Overlay merged into the system document once it has loaded.
    #[arg(long)]
    pub overlay: Option<PathBuf>,

    /// Where the Export action writes the current atlas.
    #[arg(long, default_value = "planetData.json")]
    pub export_path: PathBuf,

    #[arg(long, default_value_t = 1440.0)]
    pub width: f32,

    #[arg(long, default_value_t = 920.0)]
    pub height: f32,
}
