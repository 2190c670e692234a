//! Decoder configuration.

use std::fmt;
use std::sync::Arc;

use crate::DEFAULT_MAX_DEPTH;
use crate::observer::{DecodeObserver, NoopObserver};

/// What a sequence field does when its tag occurred exactly once.
///
/// A single occurrence is stored bare in the tree, so a sequence field meets
/// a lone node rather than a `Sequence` entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SequencePolicy {
    /// Treat the lone node as a one-element sequence.
    #[default]
    Lenient,
    /// Reject the lone node with a type mismatch.
    Strict,
}

/// How the outer shape is matched against the document's root element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RootPolicy {
    /// If the shape's only field is named after the root tag, apply it to
    /// the top-level `{root_tag: entry}` mapping; otherwise descend into the
    /// root element.
    #[default]
    Auto,
    /// Always apply the shape to the top-level mapping.
    Wrapped,
    /// Always descend into the root element.
    Unwrapped,
}

/// Options for decoding a document against a shape.
///
/// ```
/// use parsely_dom::{DeserializeOptions, RootPolicy, SequencePolicy};
///
/// let options = DeserializeOptions::new()
///     .sequence_policy(SequencePolicy::Strict)
///     .root_policy(RootPolicy::Unwrapped);
/// assert_eq!(options.sequence_policy, SequencePolicy::Strict);
/// ```
#[derive(Clone)]
pub struct DeserializeOptions {
    /// How sequence fields treat a single occurrence.
    pub sequence_policy: SequencePolicy,

    /// How the outer shape meets the root element.
    pub root: RootPolicy,

    /// Receives decode progress events. Defaults to [`NoopObserver`].
    pub observer: Arc<dyn DecodeObserver>,

    /// Deepest element nesting accepted while building the tree.
    pub max_depth: usize,
}

impl DeserializeOptions {
    /// Create new options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sequence policy.
    pub fn sequence_policy(mut self, policy: SequencePolicy) -> Self {
        self.sequence_policy = policy;
        self
    }

    /// Set the root policy.
    pub fn root_policy(mut self, policy: RootPolicy) -> Self {
        self.root = policy;
        self
    }

    /// Set the maximum element nesting depth.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Install a decode observer.
    pub fn observer(mut self, observer: impl DecodeObserver + 'static) -> Self {
        self.observer = Arc::new(observer);
        self
    }
}

impl Default for DeserializeOptions {
    fn default() -> Self {
        Self {
            sequence_policy: SequencePolicy::default(),
            root: RootPolicy::default(),
            observer: Arc::new(NoopObserver),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl fmt::Debug for DeserializeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeserializeOptions")
            .field("sequence_policy", &self.sequence_policy)
            .field("root", &self.root)
            .field("max_depth", &self.max_depth)
            .finish_non_exhaustive()
    }
}
