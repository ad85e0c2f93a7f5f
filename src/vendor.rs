//! Vendor wrapper stripping.
//!
//! Google Docs wraps pasted content in structural elements such as
//! `<b id="docs-internal-guid-...">` or `<span class="c">`. They carry no
//! meaning and would confuse formatting inference (the `b` wrapper is not
//! bold) and emptiness checks, so they are unwrapped before normalization.

use log::debug;

use crate::options::Options;
use crate::tree::{NodeId, Tree};

/// Unwrap every vendor wrapper in `tree`, keeping children in place.
///
/// Returns the number of wrappers removed.
pub fn strip_vendor_wrappers(tree: &mut Tree, options: &Options) -> usize {
    let wrappers: Vec<NodeId> = tree
        .elements()
        .into_iter()
        .filter(|&id| is_vendor_wrapper(tree, id, options))
        .collect();

    for &id in &wrappers {
        tree.unwrap(id);
    }

    if !wrappers.is_empty() {
        debug!(target: "cleanpaste::vendor", "unwrapped {} vendor wrappers", wrappers.len());
    }
    wrappers.len()
}

/// Whether `id` carries a vendor id prefix or a vendor marker class.
#[must_use]
pub fn is_vendor_wrapper(tree: &Tree, id: NodeId, options: &Options) -> bool {
    let id_match = tree.attr(id, "id").is_some_and(|value| {
        options
            .vendor_id_prefixes
            .iter()
            .any(|prefix| !prefix.is_empty() && value.starts_with(prefix.as_str()))
    });
    if id_match {
        return true;
    }

    tree.attr(id, "class").is_some_and(|classes| {
        classes
            .split_whitespace()
            .any(|class| options.vendor_classes.iter().any(|marker| marker == class))
    })
}
