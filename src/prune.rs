//! Empty element pruning.

use log::debug;

use crate::tags::{Tag, STRUCTURAL_VOID_TAGS};
use crate::tree::{NodeId, Tree};

/// Remove elements that render nothing.
///
/// An element is empty when it has no non-whitespace text, no `<br>` and no
/// `<img>` descendant. `<br>` itself is never removed; an `<img>` is removed
/// but still keeps its ancestors. Elements are visited in document order, so
/// an empty element goes together with its (equally empty) subtree and a
/// removed subtree counts once.
///
/// Returns the number of removed elements.
pub fn prune_empty_elements(tree: &mut Tree) -> usize {
    let mut removed = 0;

    for id in tree.elements() {
        if tree.is_tag(id, Tag::Br.as_str()) || !tree.is_attached(id) {
            continue;
        }
        if is_empty_element(tree, id) {
            tree.detach(id);
            removed += 1;
        }
    }

    if removed > 0 {
        debug!(target: "cleanpaste::prune", "removed {removed} empty elements");
    }
    removed
}

/// Whether `id` has no text and no structurally significant descendant.
#[must_use]
pub fn is_empty_element(tree: &Tree, id: NodeId) -> bool {
    !tree.has_text(id) && !tree.has_descendant_tag(id, |t| STRUCTURAL_VOID_TAGS.contains(&t))
}
