//! DOM event types for tree-based parsing.

use std::borrow::Cow;

/// Events emitted by a DOM parser.
///
/// Each element produces a `NodeStart`, then any mix of `Text` and nested
/// elements, then a `NodeEnd`:
///
/// ```text
/// NodeStart { tag: "customer" }
///   NodeStart { tag: "name" }
///     Text("Kim")
///   NodeEnd
///   Text("\n")
/// NodeEnd
/// ```
///
/// Entity and character references are already resolved; a single run of
/// text may arrive split over several `Text` events.
#[derive(Debug, Clone, PartialEq)]
pub enum DomEvent<'a> {
    /// Start of an element.
    NodeStart {
        /// The tag name.
        tag: Cow<'a, str>,
    },

    /// Character data inside the current element (CDATA included).
    Text(Cow<'a, str>),

    /// End of the innermost open element.
    NodeEnd,
}
