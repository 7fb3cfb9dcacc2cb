use std::collections::HashSet;

use crate::atlas::Atlas;

/// Adds an edge for every unordered pair of `members` present in the atlas.
pub(super) fn collect_group_pairs(
    atlas: &Atlas,
    members: &[String],
    seen: &mut HashSet<(usize, usize)>,
    edges: &mut Vec<(usize, usize)>,
) {
    let slots = members
        .iter()
        .filter_map(|id| atlas.index_of(id))
        .collect::<Vec<_>>();

    for (position, &a) in slots.iter().enumerate() {
        for &b in &slots[position + 1..] {
            if a == b {
                continue;
            }
            let pair = (a.min(b), a.max(b));
            if seen.insert(pair) {
                edges.push(pair);
            }
        }
    }
}
