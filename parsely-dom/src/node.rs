//! The generic node tree produced by the tree builder.

use indexmap::IndexMap;

/// A node in the document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// An element with non-empty text, already trimmed.
    Scalar(String),
    /// An element with child elements and no text.
    Composite(Fields),
}

impl Node {
    /// Returns the text, if this is a `Scalar`.
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Node::Scalar(text) => Some(text),
            Node::Composite(_) => None,
        }
    }

    /// Returns the children, if this is a `Composite`.
    pub fn as_composite(&self) -> Option<&Fields> {
        match self {
            Node::Scalar(_) => None,
            Node::Composite(fields) => Some(fields),
        }
    }

    /// Short description for error messages.
    pub fn describe(&self) -> String {
        match self {
            Node::Scalar(text) => format!("text {text:?}"),
            Node::Composite(_) => "element".to_string(),
        }
    }
}

/// What a tag maps to inside its parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// The tag occurred once.
    Single(Node),
    /// The tag occurred two or more times; nodes in document order.
    Sequence(Vec<Node>),
}

impl Entry {
    /// Returns the node, if the tag occurred once.
    pub fn as_single(&self) -> Option<&Node> {
        match self {
            Entry::Single(node) => Some(node),
            Entry::Sequence(_) => None,
        }
    }

    /// Every node of this entry, in document order.
    pub fn nodes(&self) -> &[Node] {
        match self {
            Entry::Single(node) => std::slice::from_ref(node),
            Entry::Sequence(nodes) => nodes,
        }
    }

    /// Short description for error messages.
    pub fn describe(&self) -> String {
        match self {
            Entry::Single(node) => node.describe(),
            Entry::Sequence(nodes) => format!("sequence of {}", nodes.len()),
        }
    }
}

/// The children of a composite node: tag to entry, in first-occurrence order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields {
    entries: IndexMap<String, Entry>,
}

impl Fields {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a child node under `tag`, collapsing repeated tags.
    ///
    /// The first occurrence is stored as [`Entry::Single`]. The second turns
    /// the entry into a two-element [`Entry::Sequence`]; later ones append.
    pub fn push(&mut self, tag: impl Into<String>, node: Node) {
        use indexmap::map::Entry as MapEntry;

        match self.entries.entry(tag.into()) {
            MapEntry::Vacant(slot) => {
                slot.insert(Entry::Single(node));
            }
            MapEntry::Occupied(mut slot) => {
                let entry = slot.get_mut();
                let nodes = match std::mem::replace(entry, Entry::Sequence(Vec::new())) {
                    Entry::Single(first) => vec![first, node],
                    Entry::Sequence(mut nodes) => {
                        nodes.push(node);
                        nodes
                    }
                };
                *entry = Entry::Sequence(nodes);
            }
        }
    }

    /// Look up the entry for a tag.
    pub fn get(&self, tag: &str) -> Option<&Entry> {
        self.entries.get(tag)
    }

    /// Number of distinct tags.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no children.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over tags and entries in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate over tags in first-occurrence order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// A parsed document.
///
/// The top-level mapping holds at most one entry, keyed by the root tag. It
/// is empty when the root element itself had no text and no children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root_tag: String,
    fields: Fields,
}

impl Document {
    pub(crate) fn new(root_tag: String, fields: Fields) -> Self {
        Self { root_tag, fields }
    }

    /// The tag of the root element.
    pub fn root_tag(&self) -> &str {
        &self.root_tag
    }

    /// The root entry, or `None` if the root element was empty.
    pub fn root(&self) -> Option<&Entry> {
        self.fields.get(&self.root_tag)
    }

    /// The top-level mapping (`{root_tag: entry}` or empty).
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Returns true if the root element was dropped for being empty.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
