//! The cleaning pipeline.
//!
//! parse -> strip vendor wrappers -> normalize -> prune -> collapse (optional)
//! -> serialize -> decode entities (optional), with the plain-text rendering
//! taken from the final tree.

use log::debug;

use crate::collapse::collapse_paragraph_breaks;
use crate::dom;
use crate::entities::decode_entities;
use crate::error::{Error, Result};
use crate::normalize::normalize_elements;
use crate::options::Options;
use crate::prune::prune_empty_elements;
use crate::result::{CleanResult, CleanStats};
use crate::style::{InlineStyleInspector, StyleInspector};
use crate::text::render_plain_text;
use crate::tree::Tree;
use crate::vendor::strip_vendor_wrappers;

/// Main entry point for markup cleaning.
pub(crate) fn clean_markup(html: &str, options: &Options) -> Result<CleanResult> {
    if html.trim().is_empty() {
        return Err(Error::EmptyInput);
    }
    debug!(target: "cleanpaste::clean", "cleaning {} bytes of markup", html.len());

    let mut tree = dom::parse_fragment(html);
    let stats = clean_tree(&mut tree, options);

    let mut html = dom::serialize(&tree);
    if options.decode_entities {
        html = decode_entities(&html);
    }
    let text = render_plain_text(&tree);

    debug!(target: "cleanpaste::clean", "done: {stats:?}");
    Ok(CleanResult { html, text, stats })
}

/// Run every tree pass with the built-in inline style inspector.
pub(crate) fn clean_tree(tree: &mut Tree, options: &Options) -> CleanStats {
    let vendor_wrappers = strip_vendor_wrappers(tree, options);
    // Snapshot after the wrappers are gone so their styles are not inherited.
    let inspector = InlineStyleInspector::capture(tree);
    let mut stats = clean_tree_after_vendor(tree, options, &inspector);
    stats.vendor_wrappers = vendor_wrappers;
    stats
}

/// Run every tree pass with a host-supplied inspector.
pub(crate) fn clean_tree_with_inspector<S: StyleInspector + ?Sized>(
    tree: &mut Tree,
    options: &Options,
    inspector: &S,
) -> CleanStats {
    let vendor_wrappers = strip_vendor_wrappers(tree, options);
    let mut stats = clean_tree_after_vendor(tree, options, inspector);
    stats.vendor_wrappers = vendor_wrappers;
    stats
}

fn clean_tree_after_vendor<S: StyleInspector + ?Sized>(
    tree: &mut Tree,
    options: &Options,
    inspector: &S,
) -> CleanStats {
    let normalized = normalize_elements(tree, options, inspector);
    let mut pruned = prune_empty_elements(tree);

    // Pruning can bring a spacer `<br>` next to a paragraph, so alternate
    // until neither pass removes anything.
    let mut collapsed_breaks = 0;
    if options.collapse_paragraph_breaks {
        loop {
            let collapsed = collapse_paragraph_breaks(tree);
            let removed = collapsed.spacer_breaks + collapsed.blank_paragraph_breaks;
            if removed == 0 {
                break;
            }
            collapsed_breaks += removed;
            pruned += prune_empty_elements(tree);
        }
    }

    CleanStats {
        vendor_wrappers: 0,
        rewritten: normalized.rewritten,
        unwrapped: normalized.unwrapped,
        dropped: normalized.dropped,
        pruned,
        collapsed_breaks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_rejected() {
        assert!(matches!(clean_markup("", &Options::default()), Err(Error::EmptyInput)));
        assert!(matches!(clean_markup(" \n\t ", &Options::default()), Err(Error::EmptyInput)));
    }

    #[test]
    fn test_stats_cover_every_pass() {
        let html = r#"<b id="docs-internal-guid-1" style="font-weight:normal"><p><span style="font-weight:700">a</span></p><br><p><br></p><p>b</p></b>"#;
        let result = match clean_markup(html, &Options::extended()) {
            Ok(r) => r,
            Err(e) => panic!("expected Ok(_), got Err({e:?})"),
        };
        assert_eq!(result.html, "<p><strong>a</strong></p><p>b</p>");
        assert_eq!(result.stats.vendor_wrappers, 1);
        assert_eq!(result.stats.rewritten, 1);
        assert_eq!(result.stats.collapsed_breaks, 2);
        assert_eq!(result.stats.pruned, 1);
    }

    #[test]
    fn test_spacer_exposed_by_pruning_is_collapsed() {
        let html = "<p>a</p><br><div><p><br></p></div><p>b</p>";
        let result = match clean_markup(html, &Options::extended()) {
            Ok(r) => r,
            Err(e) => panic!("expected Ok(_), got Err({e:?})"),
        };
        assert_eq!(result.html, "<p>a</p><p>b</p>");
        assert_eq!(result.stats.collapsed_breaks, 2);
        assert_eq!(result.stats.pruned, 1);
    }

    #[test]
    fn test_break_only_paragraph_is_pruned_after_collapse() {
        let html = "<p>a</p><p><br></p><p>b</p>";
        let extended = clean_markup(html, &Options::extended()).map(|r| r.html).ok();
        assert_eq!(extended.as_deref(), Some("<p>a</p><p>b</p>"));

        let base = clean_markup(html, &Options::default()).map(|r| r.html).ok();
        assert_eq!(base.as_deref(), Some("<p>a</p><p><br></p><p>b</p>"));
    }
}
