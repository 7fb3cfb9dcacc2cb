use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::atlas::Atlas;

const MISS_SUGGESTIONS: usize = 5;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(in crate::app) struct SearchMiss {
    pub(in crate::app) query: String,
    pub(in crate::app) suggestions: Vec<String>,
}

/// Exact, case-sensitive lookup: an id match wins, then the first system in
/// document order whose name matches.
pub(in crate::app) fn resolve_system(atlas: &Atlas, query: &str) -> Option<usize> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }

    atlas.index_of(query).or_else(|| {
        atlas
            .systems()
            .iter()
            .position(|system| system.name == query)
    })
}

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}

pub(in crate::app) fn search_miss(atlas: &Atlas, query: &str) -> SearchMiss {
    let query = query.trim();
    let matcher = SkimMatcherV2::default();
    let mut scored = atlas
        .systems()
        .iter()
        .enumerate()
        .filter_map(|(slot, system)| {
            fuzzy_match_score(&matcher, &system.name, query).map(|score| (score, slot))
        })
        .collect::<Vec<_>>();
    scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));

    SearchMiss {
        query: query.to_owned(),
        suggestions: scored
            .into_iter()
            .take(MISS_SUGGESTIONS)
            .map(|(_, slot)| atlas.systems()[slot].name.clone())
            .collect(),
    }
}

/// Prefix suggestions for the search box with keyboard focus.
#[derive(Debug, Default)]
pub(in crate::app) struct Autocomplete {
    query: String,
    matches: Vec<usize>,
    focus: Option<usize>,
}

impl Autocomplete {
    /// Recomputes matches when `text` changed since the last call.
    pub(in crate::app) fn refresh(&mut self, atlas: &Atlas, text: &str) {
        if self.query == text {
            return;
        }
        self.query = text.to_owned();
        self.focus = None;
        self.matches.clear();

        if text.is_empty() {
            return;
        }

        let prefix = text.to_lowercase();
        self.matches.extend(
            atlas
                .systems()
                .iter()
                .enumerate()
                .filter(|(_, system)| system.name.to_lowercase().starts_with(&prefix))
                .map(|(slot, _)| slot),
        );
    }

    /// Forces the next `refresh` to recompute, e.g. after an overlay merge.
    pub(in crate::app) fn invalidate(&mut self) {
        self.query.clear();
        self.matches.clear();
        self.focus = None;
    }

    /// Hides the list until the text differs from `text`.
    pub(in crate::app) fn close(&mut self, text: &str) {
        text.clone_into(&mut self.query);
        self.matches.clear();
        self.focus = None;
    }

    pub(in crate::app) fn matches(&self) -> &[usize] {
        &self.matches
    }

    pub(in crate::app) fn focus(&self) -> Option<usize> {
        self.focus
    }

    pub(in crate::app) fn focused_slot(&self) -> Option<usize> {
        self.focus.and_then(|row| self.matches.get(row).copied())
    }

    pub(in crate::app) fn focus_next(&mut self) {
        if self.matches.is_empty() {
            return;
        }
        self.focus = Some(match self.focus {
            Some(row) if row + 1 < self.matches.len() => row + 1,
            Some(_) => 0,
            None => 0,
        });
    }

    pub(in crate::app) fn focus_previous(&mut self) {
        if self.matches.is_empty() {
            return;
        }
        self.focus = Some(match self.focus {
            Some(row) if row > 0 => row - 1,
            _ => self.matches.len() - 1,
        });
    }
}

#[cfg(test)]
mod tests {
    use crate::atlas::SystemRecord;

    use super::*;

    fn atlas() -> Atlas {
        Atlas::from_records([
            SystemRecord::new("sys-1", "Arrakis", [0.0, 0.0]),
            SystemRecord::new("sys-2", "Arcadia", [1.0, 0.0]),
            SystemRecord::new("Arcadia", "Caladan", [2.0, 0.0]),
            SystemRecord::new("sys-4", "Giedi Prime", [3.0, 0.0]),
        ])
    }

    #[test]
    fn resolution_is_exact_and_case_sensitive() {
        let atlas = atlas();

        assert_eq!(resolve_system(&atlas, "sys-4"), Some(3));
        assert_eq!(resolve_system(&atlas, "  Arrakis "), Some(0));
        assert_eq!(resolve_system(&atlas, "arrakis"), None);
        assert_eq!(resolve_system(&atlas, "Arra"), None);
        assert_eq!(resolve_system(&atlas, ""), None);
    }

    #[test]
    fn id_matches_take_priority_over_names() {
        assert_eq!(resolve_system(&atlas(), "Arcadia"), Some(2));
    }

    #[test]
    fn misses_offer_fuzzy_suggestions() {
        let miss = search_miss(&atlas(), "giedi");

        assert_eq!(miss.query, "giedi");
        assert_eq!(miss.suggestions.first().map(String::as_str), Some("Giedi Prime"));
    }

    #[test]
    fn prefix_suggestions_ignore_case() {
        let atlas = atlas();
        let mut autocomplete = Autocomplete::default();

        autocomplete.refresh(&atlas, "aR");
        assert_eq!(autocomplete.matches(), [0, 1]);

        autocomplete.refresh(&atlas, "");
        assert!(autocomplete.matches().is_empty());
    }

    #[test]
    fn keyboard_focus_wraps_both_ways() {
        let atlas = atlas();
        let mut autocomplete = Autocomplete::default();
        autocomplete.refresh(&atlas, "ar");

        autocomplete.focus_previous();
        assert_eq!(autocomplete.focused_slot(), Some(1));
        autocomplete.focus_next();
        assert_eq!(autocomplete.focus(), Some(0));
        autocomplete.focus_next();
        autocomplete.focus_next();
        assert_eq!(autocomplete.focus(), Some(0));
    }

    #[test]
    fn closing_holds_until_the_text_changes() {
        let atlas = atlas();
        let mut autocomplete = Autocomplete::default();
        autocomplete.refresh(&atlas, "Ar");

        autocomplete.close("Arrakis");
        autocomplete.refresh(&atlas, "Arrakis");
        assert!(autocomplete.matches().is_empty());

        autocomplete.refresh(&atlas, "Arr");
        assert_eq!(autocomplete.matches(), [0]);
    }

    #[test]
    fn invalidate_forces_a_recompute() {
        let mut atlas = atlas();
        let mut autocomplete = Autocomplete::default();
        autocomplete.refresh(&atlas, "Ca");
        assert_eq!(autocomplete.matches(), [2]);

        atlas.merge(Atlas::from_records([SystemRecord::new("sys-5", "Canopus", [4.0, 0.0])]));
        autocomplete.refresh(&atlas, "Ca");
        assert_eq!(autocomplete.matches(), [2]);

        autocomplete.invalidate();
        autocomplete.refresh(&atlas, "Ca");
        assert_eq!(autocomplete.matches(), [2, 4]);
    }
}
