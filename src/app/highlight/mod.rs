use std::collections::HashSet;

use crate::atlas::{Atlas, Marks};

mod collect;

use self::collect::collect_group_pairs;

/// Supplemental edges drawn while a system is selected.
#[derive(Debug, Default)]
pub(in crate::app) struct HighlightState {
    pub(in crate::app) group_edges: Vec<(usize, usize)>,
}

pub(in crate::app) fn build_highlight_state(
    atlas: &Atlas,
    marks: &Marks,
    selected_id: &str,
) -> Option<HighlightState> {
    if !atlas.contains(selected_id) {
        return None;
    }

    let mut state = HighlightState::default();
    let mut seen = HashSet::new();

    for mark in marks.containing(selected_id) {
        collect_group_pairs(
            atlas,
            &mark.systems,
            &mut seen,
            &mut state.group_edges,
        );
    }

    Some(state)
}
