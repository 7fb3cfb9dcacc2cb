use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::error::AtlasError;
use super::graph::{Atlas, Marks};
use super::parse::{parse_atlas_document, parse_marks_document};

const JSON_MIME: &str = "application/json";

#[derive(Clone, Debug)]
pub struct LoadedAtlas {
    pub atlas: Atlas,
    pub marks: Marks,
}

fn read_text(path: &Path) -> Result<String, AtlasError> {
    fs::read_to_string(path).map_err(|source| AtlasError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn ensure_json(name: &str, mime: Option<&str>) -> Result<(), AtlasError> {
    let accepted = match mime.filter(|mime| !mime.is_empty()) {
        Some(mime) => mime == JSON_MIME,
        None => Path::new(name)
            .extension()
            .is_some_and(|extension| extension.eq_ignore_ascii_case("json")),
    };

    if accepted {
        Ok(())
    } else {
        Err(AtlasError::ContentType {
            name: name.to_owned(),
        })
    }
}

/// Loads the system document and, when given, the mark document. Either both
/// load or the whole call fails.
pub fn load_atlas(data_path: &Path, marks_path: Option<&Path>) -> Result<LoadedAtlas> {
    let raw = read_text(data_path)?;
    let atlas = parse_atlas_document(&raw)
        .with_context(|| format!("failed to parse system data {}", data_path.display()))?;

    let marks = match marks_path {
        Some(path) => {
            let raw = read_text(path)?;
            parse_marks_document(&raw)
                .with_context(|| format!("failed to parse marks {}", path.display()))?
        }
        None => Marks::default(),
    };

    info!(
        systems = atlas.len(),
        links = atlas.link_count(),
        marks = marks.len(),
        "loaded atlas from {}",
        data_path.display()
    );

    Ok(LoadedAtlas { atlas, marks })
}

pub fn read_overlay(path: &Path) -> Result<Atlas, AtlasError> {
    ensure_json(&path.to_string_lossy(), None)?;
    let raw = read_text(path)?;
    parse_atlas_document(&raw)
}

/// Parses an overlay handed over as raw bytes (a file dropped on the window).
pub fn parse_overlay_bytes(name: &str, mime: Option<&str>, bytes: &[u8]) -> Result<Atlas, AtlasError> {
    ensure_json(name, mime)?;
    let raw = std::str::from_utf8(bytes).map_err(|error| AtlasError::Io {
        path: name.into(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidData, error),
    })?;
    parse_atlas_document(raw)
}

pub fn export_atlas(atlas: &Atlas, path: &Path) -> Result<()> {
    let document = serde_json::Value::Object(atlas.to_document().context("failed to serialize atlas")?);
    let rendered = serde_json::to_string_pretty(&document).context("failed to render atlas")?;
    fs::write(path, rendered).with_context(|| format!("failed to write {}", path.display()))?;
    info!(systems = atlas.len(), "exported atlas to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    const BASE: &str = r#"{
        "a": { "name": "A", "position": [0, 0], "links": ["b"] },
        "b": { "name": "B", "position": [10, 0], "faction": "Guild" }
    }"#;

    fn json_file(contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".json")
            .tempfile()
            .expect("temp file");
        file.write_all(contents.as_bytes()).expect("write temp file");
        file
    }

    #[test]
    fn load_reads_systems_and_optional_marks() {
        let data = json_file(BASE);
        let marks = json_file(r#"{ "m": { "systems": ["a", "b"] } }"#);

        let loaded = load_atlas(data.path(), Some(marks.path())).expect("loads");
        assert_eq!(loaded.atlas.len(), 2);
        assert_eq!(loaded.marks.len(), 1);

        let without_marks = load_atlas(data.path(), None).expect("loads");
        assert!(without_marks.marks.is_empty());
    }

    #[test]
    fn load_fails_as_a_whole_when_marks_are_broken() {
        let data = json_file(BASE);
        let marks = json_file("{ broken");

        assert!(load_atlas(data.path(), Some(marks.path())).is_err());
    }

    #[test]
    fn overlay_rejects_non_json_files() {
        let mut text = tempfile::Builder::new()
            .suffix(".txt")
            .tempfile()
            .expect("temp file");
        text.write_all(BASE.as_bytes()).expect("write");

        assert!(matches!(
            read_overlay(text.path()),
            Err(AtlasError::ContentType { .. })
        ));
        assert!(matches!(
            parse_overlay_bytes("drop.json", Some("text/plain"), BASE.as_bytes()),
            Err(AtlasError::ContentType { .. })
        ));
        assert!(parse_overlay_bytes("drop", Some(JSON_MIME), BASE.as_bytes()).is_ok());
    }

    #[test]
    fn failed_overlay_leaves_nothing_to_merge() {
        let broken = json_file(r#"{ "c": { "name": "C" } }"#);
        assert!(read_overlay(broken.path()).is_err());
    }

    #[test]
    fn export_round_trips_through_load() {
        let data = json_file(BASE);
        let loaded = load_atlas(data.path(), None).expect("loads");
        let out = tempfile::Builder::new()
            .suffix(".json")
            .tempfile()
            .expect("temp file");

        export_atlas(&loaded.atlas, out.path()).expect("exports");
        let reloaded = read_overlay(out.path()).expect("reloads");

        assert_eq!(reloaded.systems(), loaded.atlas.systems());
    }
}
