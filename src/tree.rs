//! Owned Element Tree
//!
//! A detached, arena-backed element tree that the cleaning passes rewrite in
//! place. The tree is produced by the [`crate::dom`] adapter from a parsed
//! `dom_query` document and serialized back through the same adapter.
//!
//! ## Model
//!
//! Every node lives in a single `Vec` owned by [`Tree`] and is addressed by a
//! [`NodeId`]. A node is either an element (lowercase tag name plus an ordered
//! attribute list) or a text node. The arena always starts with a synthetic
//! fragment root named [`ROOT_NAME`]; its children are the pasted content.
//!
//! Removing a node only unlinks it from its parent. Detached nodes stay in
//! the arena but are unreachable from the root, so a `NodeId` never dangles.

/// Name of the synthetic fragment root element.
pub const ROOT_NAME: &str = "#root";

/// Handle to a node stored in a [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Payload of a tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    /// Element with a lowercase tag name and ordered attributes.
    Element {
        name: String,
        attrs: Vec<(String, String)>,
    },
    /// Character data.
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    data: NodeData,
}

/// Arena-backed element tree with a synthetic fragment root.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    /// Create an empty tree containing only the fragment root.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                data: NodeData::Element {
                    name: ROOT_NAME.to_string(),
                    attrs: Vec::new(),
                },
            }],
        }
    }

    /// The fragment root. Never normalized, pruned or serialized itself.
    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    #[inline]
    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    #[inline]
    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    // === Construction ===

    /// Allocate a detached element. The tag name is stored lowercase.
    pub fn new_element(&mut self, name: &str) -> NodeId {
        self.push(NodeData::Element {
            name: name.to_ascii_lowercase(),
            attrs: Vec::new(),
        })
    }

    /// Allocate a detached text node.
    pub fn new_text(&mut self, text: &str) -> NodeId {
        self.push(NodeData::Text(text.to_string()))
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: None,
            children: Vec::new(),
            data,
        });
        id
    }

    // === Inspection ===

    #[inline]
    #[must_use]
    pub fn data(&self, id: NodeId) -> &NodeData {
        &self.node(id).data
    }

    #[inline]
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Tag name of an element, `None` for text nodes.
    #[must_use]
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).data {
            NodeData::Element { name, .. } => Some(name.as_str()),
            NodeData::Text(_) => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_element(&self, id: NodeId) -> bool {
        matches!(self.node(id).data, NodeData::Element { .. })
    }

    /// Check whether `id` is an element with the given (lowercase) tag.
    #[inline]
    #[must_use]
    pub fn is_tag(&self, id: NodeId, tag: &str) -> bool {
        self.tag(id) == Some(tag)
    }

    /// Character data of a text node, `None` for elements.
    #[must_use]
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).data {
            NodeData::Text(text) => Some(text.as_str()),
            NodeData::Element { .. } => None,
        }
    }

    /// Whether the node is still reachable from the fragment root.
    #[must_use]
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        current == self.root()
    }

    /// Position of `id` among its parent's children.
    #[must_use]
    pub fn index_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|&c| c == id)
    }

    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let index = self.index_in_parent(id)?;
        index.checked_sub(1).map(|i| self.children(parent)[i])
    }

    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let index = self.index_in_parent(id)?;
        self.children(parent).get(index + 1).copied()
    }

    /// Ancestors of `id`, nearest first, excluding the fragment root.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let root = self.root();
        std::iter::successors(self.parent(id), move |&p| self.parent(p))
            .take_while(move |&p| p != root)
    }

    /// All descendants of `id` in document (pre-)order, excluding `id`.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        out
    }

    /// All attached elements below the fragment root, in document order.
    #[must_use]
    pub fn elements(&self) -> Vec<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .filter(|&id| self.is_element(id))
            .collect()
    }

    /// Whether any descendant element satisfies `pred` on its tag name.
    pub fn has_descendant_tag(&self, id: NodeId, pred: impl Fn(&str) -> bool) -> bool {
        self.descendants(id)
            .into_iter()
            .any(|d| self.tag(d).is_some_and(&pred))
    }

    /// Concatenated character data of `id` and all its descendants.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        if let Some(text) = self.text(id) {
            return text.to_string();
        }
        self.descendants(id)
            .into_iter()
            .filter_map(|d| self.text(d))
            .collect()
    }

    /// Whether `id` contains any non-whitespace character data.
    #[must_use]
    pub fn has_text(&self, id: NodeId) -> bool {
        if let Some(text) = self.text(id) {
            return !text.trim().is_empty();
        }
        self.descendants(id)
            .into_iter()
            .filter_map(|d| self.text(d))
            .any(|t| !t.trim().is_empty())
    }

    // === Attributes ===

    /// Attributes of an element; empty for text nodes.
    #[must_use]
    pub fn attrs(&self, id: NodeId) -> &[(String, String)] {
        match &self.node(id).data {
            NodeData::Element { attrs, .. } => attrs,
            NodeData::Text(_) => &[],
        }
    }

    #[must_use]
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.attrs(id)
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    #[inline]
    #[must_use]
    pub fn has_attr(&self, id: NodeId, name: &str) -> bool {
        self.attr(id, name).is_some()
    }

    /// Set an attribute, replacing an existing value in place.
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        if let NodeData::Element { attrs, .. } = &mut self.node_mut(id).data {
            if let Some(slot) = attrs.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(name)) {
                slot.1 = value.to_string();
            } else {
                attrs.push((name.to_ascii_lowercase(), value.to_string()));
            }
        }
    }

    /// Remove an attribute, returning its previous value.
    pub fn remove_attr(&mut self, id: NodeId, name: &str) -> Option<String> {
        if let NodeData::Element { attrs, .. } = &mut self.node_mut(id).data {
            let index = attrs.iter().position(|(k, _)| k.eq_ignore_ascii_case(name))?;
            return Some(attrs.remove(index).1);
        }
        None
    }

    pub fn clear_attrs(&mut self, id: NodeId) {
        if let NodeData::Element { attrs, .. } = &mut self.node_mut(id).data {
            attrs.clear();
        }
    }

    // === Mutation ===

    /// Unlink `id` from its parent. No-op for detached nodes.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.node(id).parent {
            self.node_mut(parent).children.retain(|&c| c != id);
            self.node_mut(id).parent = None;
        }
    }

    /// Append `child` as the last child of `parent`, detaching it first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.node_mut(child).parent = Some(parent);
        self.node_mut(parent).children.push(child);
    }

    /// Insert `child` immediately before `reference` among its siblings.
    ///
    /// No-op when `reference` is detached.
    pub fn insert_before(&mut self, reference: NodeId, child: NodeId) {
        if reference == child {
            return;
        }
        self.detach(child);
        let Some(parent) = self.parent(reference) else {
            return;
        };
        let Some(index) = self.index_in_parent(reference) else {
            return;
        };
        self.node_mut(child).parent = Some(parent);
        self.node_mut(parent).children.insert(index, child);
    }

    /// Remove `id` while splicing its children into its former position.
    ///
    /// Returns the relocated children in order. A detached node keeps its
    /// children and an empty list is returned.
    pub fn unwrap(&mut self, id: NodeId) -> Vec<NodeId> {
        let Some(parent) = self.parent(id) else {
            return Vec::new();
        };
        let Some(index) = self.index_in_parent(id) else {
            return Vec::new();
        };
        let children = std::mem::take(&mut self.node_mut(id).children);
        for &child in &children {
            self.node_mut(child).parent = Some(parent);
        }
        self.node_mut(parent)
            .children
            .splice(index..=index, children.iter().copied());
        self.node_mut(id).parent = None;
        children
    }

    /// Substitute `id` with a freshly created element named `name`.
    ///
    /// The children of `id` move to the new element, which takes over the
    /// position of `id`. The new element carries no attributes.
    pub fn replace_with_element(&mut self, id: NodeId, name: &str) -> NodeId {
        let replacement = self.new_element(name);
        let children = std::mem::take(&mut self.node_mut(id).children);
        for &child in &children {
            self.node_mut(child).parent = Some(replacement);
        }
        self.node_mut(replacement).children = children;

        if let (Some(parent), Some(index)) = (self.parent(id), self.index_in_parent(id)) {
            self.node_mut(parent).children[index] = replacement;
            self.node_mut(replacement).parent = Some(parent);
            self.node_mut(id).parent = None;
        }
        replacement
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Tree, NodeId, NodeId) {
        // <div>a<span>b</span>c</div>
        let mut tree = Tree::new();
        let div = tree.new_element("DIV");
        let a = tree.new_text("a");
        let span = tree.new_element("span");
        let b = tree.new_text("b");
        let c = tree.new_text("c");
        tree.append_child(tree.root(), div);
        tree.append_child(div, a);
        tree.append_child(div, span);
        tree.append_child(span, b);
        tree.append_child(div, c);
        (tree, div, span)
    }

    #[test]
    fn test_new_element_lowercases_tag() {
        let (tree, div, _) = sample();
        assert_eq!(tree.tag(div), Some("div"));
        assert!(tree.is_tag(div, "div"));
    }

    #[test]
    fn test_text_content_is_recursive() {
        let (tree, div, span) = sample();
        assert_eq!(tree.text_content(div), "abc");
        assert_eq!(tree.text_content(span), "b");
    }

    #[test]
    fn test_unwrap_splices_children_in_place() {
        let (mut tree, div, span) = sample();
        let moved = tree.unwrap(span);

        assert_eq!(moved.len(), 1);
        assert_eq!(tree.children(div).len(), 3);
        assert_eq!(tree.text(tree.children(div)[1]), Some("b"));
        assert_eq!(tree.parent(moved[0]), Some(div));
        assert!(!tree.is_attached(span));
    }

    #[test]
    fn test_replace_with_element_transfers_children() {
        let (mut tree, div, span) = sample();
        tree.set_attr(span, "style", "font-weight:700");
        let strong = tree.replace_with_element(span, "strong");

        assert_eq!(tree.children(div)[1], strong);
        assert_eq!(tree.text_content(strong), "b");
        assert!(tree.attrs(strong).is_empty());
        assert!(tree.children(span).is_empty());
    }

    #[test]
    fn test_attribute_roundtrip() {
        let (mut tree, div, _) = sample();
        tree.set_attr(div, "ID", "x");
        assert_eq!(tree.attr(div, "id"), Some("x"));

        tree.set_attr(div, "id", "y");
        assert_eq!(tree.attrs(div).len(), 1);
        assert_eq!(tree.remove_attr(div, "id"), Some("y".to_string()));
        assert!(!tree.has_attr(div, "id"));
    }

    #[test]
    fn test_siblings_and_insert_before() {
        let (mut tree, div, span) = sample();
        let em = tree.new_element("em");
        tree.insert_before(span, em);

        assert_eq!(tree.next_sibling(em), Some(span));
        assert_eq!(tree.prev_sibling(span), Some(em));
        assert_eq!(tree.children(div).len(), 4);
    }

    #[test]
    fn test_has_text_ignores_whitespace() {
        let mut tree = Tree::new();
        let p = tree.new_element("p");
        let ws = tree.new_text(" \n\u{a0}");
        tree.append_child(tree.root(), p);
        tree.append_child(p, ws);
        assert!(!tree.has_text(p));
    }

    #[test]
    fn test_ancestors_stop_before_root() {
        let (tree, div, span) = sample();
        let b = tree.children(span)[0];
        let ancestors: Vec<_> = tree.ancestors(b).collect();
        assert_eq!(ancestors, vec![span, div]);
    }
}
