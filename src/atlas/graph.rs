use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SystemRecord {
    #[serde(skip)]
    pub id: String,
    pub name: String,
    pub position: [f32; 2],
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<String>,
    #[serde(
        default,
        deserialize_with = "attribute",
        skip_serializing_if = "Option::is_none"
    )]
    pub security: Option<String>,
    #[serde(
        default,
        deserialize_with = "attribute",
        skip_serializing_if = "Option::is_none"
    )]
    pub spice: Option<String>,
    #[serde(
        default,
        rename = "spectralClass",
        deserialize_with = "attribute",
        skip_serializing_if = "Option::is_none"
    )]
    pub spectral_class: Option<String>,
    #[serde(
        default,
        deserialize_with = "attribute",
        skip_serializing_if = "Option::is_none"
    )]
    pub region: Option<String>,
    #[serde(
        default,
        deserialize_with = "attribute",
        skip_serializing_if = "Option::is_none"
    )]
    pub sector: Option<String>,
    #[serde(
        default,
        deserialize_with = "attribute",
        skip_serializing_if = "Option::is_none"
    )]
    pub faction: Option<String>,
    /// Fields the map does not interpret, kept so exports stay faithful.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Categorical attributes arrive as strings in most documents, but some
/// exports carry numeric codes; both are kept in textual form.
fn attribute<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text),
        Some(other) => Some(other.to_string()),
    })
}

#[cfg(test)]
impl SystemRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, position: [f32; 2]) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            position,
            links: Vec::new(),
            security: None,
            spice: None,
            spectral_class: None,
            region: None,
            sector: None,
            faction: None,
            extra: Map::new(),
        }
    }

    pub fn with_links<I, S>(mut self, links: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.links = links.into_iter().map(Into::into).collect();
        self
    }
}

impl SystemRecord {
    /// The entry's own `id` field, which can differ from its document key.
    pub fn entry_id(&self) -> Option<String> {
        match self.extra.get("id")? {
            Value::Null => None,
            Value::String(text) => Some(text.clone()),
            other => Some(other.to_string()),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MergeSummary {
    pub replaced: usize,
    pub added: usize,
}

/// The loaded star map, kept in document order.
///
/// Document order is observable: hit-testing and name resolution both walk
/// systems in this order and take the first match.
#[derive(Clone, Debug, Default)]
pub struct Atlas {
    systems: Vec<SystemRecord>,
    index_by_id: HashMap<String, usize>,
}

impl Atlas {
    pub fn from_records(records: impl IntoIterator<Item = SystemRecord>) -> Self {
        let mut atlas = Self::default();
        for record in records {
            atlas.upsert(record);
        }
        atlas
    }

    fn upsert(&mut self, record: SystemRecord) -> bool {
        if let Some(&slot) = self.index_by_id.get(&record.id) {
            self.systems[slot] = record;
            true
        } else {
            self.index_by_id
                .insert(record.id.clone(), self.systems.len());
            self.systems.push(record);
            false
        }
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    pub fn systems(&self) -> &[SystemRecord] {
        &self.systems
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index_by_id.get(id).copied()
    }

    pub fn get(&self, id: &str) -> Option<&SystemRecord> {
        self.index_of(id).map(|slot| &self.systems[slot])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index_by_id.contains_key(id)
    }

    /// Links whose target exists in the atlas.
    pub fn link_count(&self) -> usize {
        self.systems
            .iter()
            .map(|system| {
                system
                    .links
                    .iter()
                    .filter(|target| self.contains(target))
                    .count()
            })
            .sum()
    }

    /// Overlays `incoming` by id: matching ids are replaced in place, new ids
    /// are appended in the overlay's order, nothing is removed.
    pub fn merge(&mut self, incoming: Atlas) -> MergeSummary {
        let mut summary = MergeSummary::default();
        for record in incoming.systems {
            if self.upsert(record) {
                summary.replaced += 1;
            } else {
                summary.added += 1;
            }
        }
        summary
    }

    /// The id-keyed document shape the atlas was loaded from.
    pub fn to_document(&self) -> Result<Map<String, Value>, serde_json::Error> {
        let mut document = Map::with_capacity(self.systems.len());
        for system in &self.systems {
            document.insert(system.id.clone(), serde_json::to_value(system)?);
        }
        Ok(document)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mark {
    pub id: String,
    pub systems: Vec<String>,
}

/// Groups of mutually associated systems, read-only for the session.
#[derive(Clone, Debug, Default)]
pub struct Marks {
    marks: Vec<Mark>,
}

impl Marks {
    pub fn new(marks: Vec<Mark>) -> Self {
        Self { marks }
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    pub fn containing<'a>(&'a self, system_id: &'a str) -> impl Iterator<Item = &'a Mark> + 'a {
        self.marks
            .iter()
            .filter(move |mark| mark.systems.iter().any(|id| id == system_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn system(id: &str, x: f32) -> SystemRecord {
        SystemRecord::new(id, id.to_uppercase(), [x, 0.0])
    }

    #[test]
    fn merge_replaces_by_id_and_appends_new_ids() {
        let mut base = Atlas::from_records([system("a", 1.0), system("b", 2.0)]);
        let overlay = Atlas::from_records([system("b", 20.0), system("c", 30.0)]);

        let summary = base.merge(overlay);

        assert_eq!(summary, MergeSummary { replaced: 1, added: 1 });
        let ids = base.systems().iter().map(|s| s.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, ["a", "b", "c"]);
        assert_eq!(base.get("a").map(|s| s.position), Some([1.0, 0.0]));
        assert_eq!(base.get("b").map(|s| s.position), Some([20.0, 0.0]));
        assert_eq!(base.get("c").map(|s| s.position), Some([30.0, 0.0]));
    }

    #[test]
    fn entry_id_reads_the_embedded_field_not_the_key() {
        let mut system = system("The Citadel", 0.0);
        assert_eq!(system.entry_id(), None);

        system.extra.insert("id".to_owned(), Value::from(42));
        assert_eq!(system.entry_id().as_deref(), Some("42"));

        system.extra.insert("id".to_owned(), Value::from("planet-7"));
        assert_eq!(system.entry_id().as_deref(), Some("planet-7"));
        assert_eq!(system.id, "The Citadel");
    }

    #[test]
    fn link_count_ignores_dangling_targets() {
        let atlas = Atlas::from_records([
            system("a", 0.0).with_links(["b", "missing"]),
            system("b", 1.0).with_links(["a"]),
        ]);

        assert_eq!(atlas.link_count(), 2);
    }

    #[test]
    fn marks_containing_filters_by_membership() {
        let marks = Marks::new(vec![
            Mark {
                id: "north".to_owned(),
                systems: vec!["a".to_owned(), "b".to_owned()],
            },
            Mark {
                id: "south".to_owned(),
                systems: vec!["c".to_owned()],
            },
        ]);

        let ids = marks.containing("b").map(|m| m.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, ["north"]);
        assert_eq!(marks.containing("zzz").count(), 0);
    }
}
