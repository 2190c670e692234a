//! DOM parser trait.

use crate::DomEvent;

/// A parser that emits DOM events from a tree-structured document.
///
/// `parsely-xml` implements this over quick-xml. Implementations report
/// syntax problems (bad tokens, mismatched end tags, encoding failures)
/// through their own error type; the tree builder checks structure on top.
pub trait DomParser<'de> {
    /// The error type for parsing failures.
    type Error: std::error::Error + 'static;

    /// Get the next event from the document.
    ///
    /// Returns `Ok(None)` when the document is fully parsed.
    fn next_event(&mut self) -> Result<Option<DomEvent<'de>>, Self::Error>;
}

impl<'de, P: DomParser<'de> + ?Sized> DomParser<'de> for &mut P {
    type Error = P::Error;

    fn next_event(&mut self) -> Result<Option<DomEvent<'de>>, Self::Error> {
        (**self).next_event()
    }
}
