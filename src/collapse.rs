//! Inter-paragraph line break collapsing.
//!
//! Editors often separate paragraphs with a stray `<br>` or with a paragraph
//! that holds nothing but `<br>`. Both render as extra blank lines once the
//! paragraph margins are back in place, so this optional pass removes them.

use log::debug;

use crate::tags::Tag;
use crate::tree::{NodeId, Tree};

/// Counters reported by [`collapse_paragraph_breaks`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct CollapseStats {
    /// `<br>` elements removed from between two paragraphs.
    pub spacer_breaks: usize,
    /// `<br>` elements removed from break-only paragraphs.
    pub blank_paragraph_breaks: usize,
}

/// Run both collapsing passes.
///
/// Break-only paragraphs are left empty, not removed; run the pruner
/// afterwards to drop them.
pub fn collapse_paragraph_breaks(tree: &mut Tree) -> CollapseStats {
    let stats = CollapseStats {
        spacer_breaks: remove_spacer_breaks(tree),
        blank_paragraph_breaks: empty_break_only_paragraphs(tree),
    };
    if stats != CollapseStats::default() {
        debug!(target: "cleanpaste::collapse", "{stats:?}");
    }
    stats
}

/// Remove each `<br>` whose nearest significant siblings are both `<p>`.
pub fn remove_spacer_breaks(tree: &mut Tree) -> usize {
    let breaks: Vec<NodeId> = tree
        .elements()
        .into_iter()
        .filter(|&id| tree.is_tag(id, Tag::Br.as_str()))
        .collect();

    let mut removed = 0;
    for br in breaks {
        let before = significant_sibling(tree, br, Tree::prev_sibling);
        let after = significant_sibling(tree, br, Tree::next_sibling);
        let between_paragraphs = before.is_some_and(|n| tree.is_tag(n, Tag::P.as_str()))
            && after.is_some_and(|n| tree.is_tag(n, Tag::P.as_str()));
        if between_paragraphs {
            tree.detach(br);
            removed += 1;
        }
    }
    removed
}

/// Strip the `<br>` children of paragraphs made only of breaks and whitespace.
pub fn empty_break_only_paragraphs(tree: &mut Tree) -> usize {
    let paragraphs: Vec<NodeId> = tree
        .elements()
        .into_iter()
        .filter(|&id| tree.is_tag(id, Tag::P.as_str()) && is_break_only(tree, id))
        .collect();

    let mut removed = 0;
    for p in paragraphs {
        let breaks: Vec<NodeId> = tree
            .children(p)
            .iter()
            .copied()
            .filter(|&c| tree.is_tag(c, Tag::Br.as_str()))
            .collect();
        removed += breaks.len();
        for br in breaks {
            tree.detach(br);
        }
    }
    removed
}

fn is_break_only(tree: &Tree, id: NodeId) -> bool {
    let children = tree.children(id);
    children.iter().any(|&c| tree.is_tag(c, Tag::Br.as_str()))
        && children.iter().all(|&c| tree.is_tag(c, Tag::Br.as_str()) || is_blank_text(tree, c))
}

fn is_blank_text(tree: &Tree, id: NodeId) -> bool {
    tree.text(id).is_some_and(|t| t.trim().is_empty())
}

/// First sibling in the given direction that is not whitespace-only text.
fn significant_sibling(
    tree: &Tree,
    id: NodeId,
    step: fn(&Tree, NodeId) -> Option<NodeId>,
) -> Option<NodeId> {
    let mut current = step(tree, id);
    while let Some(sibling) = current {
        if !is_blank_text(tree, sibling) {
            return Some(sibling);
        }
        current = step(tree, sibling);
    }
    None
}
