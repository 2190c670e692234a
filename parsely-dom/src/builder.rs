//! Turns a stream of DOM events into a [`Document`].

use crate::error::{DomDeserializeError, StructureError};
use crate::tracing_macros::trace;
use crate::{Document, DomEvent, DomParser, Fields, Node};

/// An element that has started but not yet ended.
#[derive(Debug)]
struct Frame {
    tag: String,
    children: Fields,
    text: String,
}

/// Incremental tree builder.
///
/// Feed it element starts, character data and element ends (or hand it a
/// whole [`DomParser`] via [`TreeBuilder::build`]), then call
/// [`finish`](Self::finish). On element end the frame becomes:
///
/// - `Node::Scalar(trimmed text)` if the trimmed text is non-empty,
/// - otherwise `Node::Composite(children)` if it has children,
/// - otherwise nothing, and the element is dropped from its parent.
///
/// ```
/// use parsely_dom::{Entry, Node, TreeBuilder};
///
/// let mut builder = TreeBuilder::new();
/// builder.start_element("tags")?;
/// for tag in ["a", "b"] {
///     builder.start_element("tag")?;
///     builder.characters(tag)?;
///     builder.end_element()?;
/// }
/// builder.end_element()?;
///
/// let document = builder.finish()?;
/// let Some(Entry::Single(Node::Composite(tags))) = document.root() else {
///     panic!("expected a composite root");
/// };
/// assert_eq!(tags.get("tag").map(Entry::nodes).map(<[Node]>::len), Some(2));
/// # Ok::<(), parsely_dom::StructureError>(())
/// ```
#[derive(Debug)]
pub struct TreeBuilder {
    stack: Vec<Frame>,
    root_tag: Option<String>,
    document: Fields,
    max_depth: usize,
}

/// Deepest element nesting a [`TreeBuilder`] accepts unless told otherwise.
///
/// Deeper documents fail with [`StructureError::TooDeep`].
pub const DEFAULT_MAX_DEPTH: usize = 1024;

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::with_max_depth(DEFAULT_MAX_DEPTH)
    }
}

impl TreeBuilder {
    /// Create an empty builder with [`DEFAULT_MAX_DEPTH`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty builder that rejects elements nested deeper than
    /// `max_depth` (the root is at depth 1).
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            stack: Vec::new(),
            root_tag: None,
            document: Fields::new(),
            max_depth,
        }
    }

    /// Read every event from `parser` and build the document.
    pub fn build<'de, P: DomParser<'de>>(
        parser: P,
    ) -> Result<Document, DomDeserializeError<P::Error>> {
        Self::new().consume(parser)
    }

    /// Feed every event from `parser` into this builder and finish it.
    pub fn consume<'de, P: DomParser<'de>>(
        mut self,
        mut parser: P,
    ) -> Result<Document, DomDeserializeError<P::Error>> {
        while let Some(event) = parser.next_event().map_err(DomDeserializeError::Parser)? {
            match event {
                DomEvent::NodeStart { tag } => self.start_element(tag)?,
                DomEvent::Text(text) => self.characters(&text)?,
                DomEvent::NodeEnd => self.end_element()?,
            }
        }
        Ok(self.finish()?)
    }

    /// Open a new element.
    pub fn start_element(&mut self, tag: impl Into<String>) -> Result<(), StructureError> {
        let tag = tag.into();
        if self.stack.is_empty() && self.root_tag.is_some() {
            return Err(StructureError::MultipleRoots { tag });
        }
        if self.stack.len() >= self.max_depth {
            return Err(StructureError::TooDeep {
                tag,
                limit: self.max_depth,
            });
        }
        trace!(tag = %tag, depth = self.stack.len(), "element start");
        self.stack.push(Frame {
            tag,
            children: Fields::new(),
            text: String::new(),
        });
        Ok(())
    }

    /// Append character data to the innermost open element.
    ///
    /// Whitespace outside the root is ignored; any other text there fails.
    pub fn characters(&mut self, text: &str) -> Result<(), StructureError> {
        match self.stack.last_mut() {
            Some(frame) => {
                frame.text.push_str(text);
                Ok(())
            }
            None if text.trim().is_empty() => Ok(()),
            None => Err(StructureError::TextOutsideRoot),
        }
    }

    /// Close the innermost open element and merge it into its parent.
    pub fn end_element(&mut self) -> Result<(), StructureError> {
        let frame = self.stack.pop().ok_or(StructureError::UnexpectedEnd)?;

        let text = frame.text.trim();
        let node = if !text.is_empty() {
            Some(Node::Scalar(text.to_string()))
        } else if !frame.children.is_empty() {
            Some(Node::Composite(frame.children))
        } else {
            None
        };
        trace!(tag = %frame.tag, kept = node.is_some(), "element end");

        let parent = match self.stack.last_mut() {
            Some(parent) => &mut parent.children,
            None => {
                self.root_tag = Some(frame.tag.clone());
                &mut self.document
            }
        };
        if let Some(node) = node {
            parent.push(frame.tag, node);
        }
        Ok(())
    }

    /// Finish building.
    ///
    /// Fails if an element is still open or no element was ever seen.
    pub fn finish(self) -> Result<Document, StructureError> {
        if let Some(frame) = self.stack.last() {
            return Err(StructureError::Unclosed {
                tag: frame.tag.clone(),
            });
        }
        let root_tag = self.root_tag.ok_or(StructureError::EmptyDocument)?;
        Ok(Document::new(root_tag, self.document))
    }
}
