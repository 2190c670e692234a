//! DomParser implementation for XML using quick-xml.

use std::borrow::Cow;
use std::fmt;
use std::io::Cursor;

use parsely_dom::{DomEvent, DomParser};
use quick_xml::Reader;
use quick_xml::escape::resolve_xml_entity;
use quick_xml::events::Event;

use crate::tracing_macros::trace;

/// XML parsing error.
///
/// Positions are byte offsets into the input.
#[derive(Debug, Clone, PartialEq)]
pub enum XmlError {
    /// Error from quick-xml (bad token, mismatched end tag, ...).
    Parse {
        /// quick-xml's description of the problem.
        message: String,
        /// Where the problem was detected.
        position: u64,
    },
    /// The input ended while an element was still open.
    UnexpectedEof {
        /// Length of the input.
        position: u64,
    },
    /// An end tag with no matching start tag.
    UnbalancedTags {
        /// Where the end tag starts.
        position: u64,
    },
    /// A reference to an entity that is neither predefined nor a character reference.
    UnknownEntity {
        /// The entity name, without `&` and `;`.
        name: String,
        /// Where the reference starts.
        position: u64,
    },
    /// Invalid UTF-8.
    InvalidUtf8(std::str::Utf8Error),
}

impl XmlError {
    /// Byte offset of the error, if known.
    pub fn position(&self) -> Option<u64> {
        match self {
            XmlError::Parse { position, .. }
            | XmlError::UnexpectedEof { position }
            | XmlError::UnbalancedTags { position }
            | XmlError::UnknownEntity { position, .. } => Some(*position),
            XmlError::InvalidUtf8(_) => None,
        }
    }

    /// Returns an error code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            XmlError::Parse { .. } => "xml::parse",
            XmlError::UnexpectedEof { .. } => "xml::unexpected_eof",
            XmlError::UnbalancedTags { .. } => "xml::unbalanced_tags",
            XmlError::UnknownEntity { .. } => "xml::unknown_entity",
            XmlError::InvalidUtf8(_) => "xml::invalid_utf8",
        }
    }
}

impl fmt::Display for XmlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XmlError::Parse { message, position } => {
                write!(f, "XML parse error at byte {position}: {message}")
            }
            XmlError::UnexpectedEof { position } => {
                write!(f, "Unexpected end of XML at byte {position}")
            }
            XmlError::UnbalancedTags { position } => {
                write!(f, "Unbalanced XML tags at byte {position}")
            }
            XmlError::UnknownEntity { name, position } => {
                write!(f, "Unknown entity &{name}; at byte {position}")
            }
            XmlError::InvalidUtf8(e) => write!(f, "Invalid UTF-8 in XML: {e}"),
        }
    }
}

impl std::error::Error for XmlError {}

#[cfg(feature = "miette")]
impl miette::Diagnostic for XmlError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(XmlError::code(self)))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            XmlError::UnexpectedEof { .. } => Some(Box::new("every start tag needs a matching end tag")),
            XmlError::UnknownEntity { .. } => Some(Box::new(
                "only &lt; &gt; &amp; &apos; &quot; and character references are supported",
            )),
            _ => None,
        }
    }
}

/// XML parser implementing `DomParser`.
///
/// Emits one `NodeStart`/`NodeEnd` pair per element (self-closing elements
/// included) and `Text` for character data, CDATA sections and resolved
/// references. Comments, processing instructions, the XML declaration and
/// DOCTYPE are skipped. Attributes and namespace prefixes are not
/// interpreted; a prefixed tag keeps its full `prefix:name`.
pub struct XmlParser<'de> {
    reader: Reader<Cursor<&'de [u8]>>,
    /// Buffer for quick-xml events
    buf: Vec<u8>,
    /// Number of open elements
    depth: usize,
    /// Set after a self-closing element, which still owes a `NodeEnd`
    pending_end: bool,
}

impl<'de> XmlParser<'de> {
    /// Create a new XML parser.
    pub fn new(input: &'de [u8]) -> Self {
        trace!(input_len = input.len(), "creating XML parser");

        Self {
            reader: Reader::from_reader(Cursor::new(input)),
            buf: Vec::new(),
            depth: 0,
            pending_end: false,
        }
    }

    fn read_next(&mut self) -> Result<Option<DomEvent<'de>>, XmlError> {
        if self.pending_end {
            self.pending_end = false;
            self.depth -= 1;
            return Ok(Some(DomEvent::NodeEnd));
        }

        loop {
            self.buf.clear();
            let position = self.reader.buffer_position();
            let event = self
                .reader
                .read_event_into(&mut self.buf)
                .map_err(|e| parse_error(&self.reader, e))?;

            match event {
                Event::Start(ref e) | Event::Empty(ref e) => {
                    let name = e.name();
                    let tag = std::str::from_utf8(name.as_ref())
                        .map_err(XmlError::InvalidUtf8)?
                        .to_string();

                    self.depth += 1;
                    self.pending_end = matches!(event, Event::Empty(_));
                    return Ok(Some(DomEvent::NodeStart {
                        tag: Cow::Owned(tag),
                    }));
                }
                Event::End(_) => {
                    if self.depth == 0 {
                        return Err(XmlError::UnbalancedTags { position });
                    }
                    self.depth -= 1;
                    return Ok(Some(DomEvent::NodeEnd));
                }
                Event::Text(e) => {
                    let text = e.decode().map_err(|e| parse_error(&self.reader, e))?;
                    if !text.is_empty() {
                        return Ok(Some(DomEvent::Text(Cow::Owned(text.into_owned()))));
                    }
                }
                Event::CData(e) => {
                    let text = std::str::from_utf8(e.as_ref()).map_err(XmlError::InvalidUtf8)?;
                    if !text.is_empty() {
                        return Ok(Some(DomEvent::Text(Cow::Owned(text.to_string()))));
                    }
                }
                Event::GeneralRef(e) => {
                    let raw = e.decode().map_err(|e| parse_error(&self.reader, e))?;
                    let resolved = resolve_entity(&raw, position)?;
                    return Ok(Some(DomEvent::Text(Cow::Owned(resolved))));
                }
                Event::Comment(_) | Event::PI(_) | Event::Decl(_) | Event::DocType(_) => {}
                Event::Eof => {
                    if self.depth > 0 {
                        return Err(XmlError::UnexpectedEof {
                            position: self.reader.buffer_position(),
                        });
                    }
                    return Ok(None);
                }
            }
        }
    }
}

impl<'de> DomParser<'de> for XmlParser<'de> {
    type Error = XmlError;

    fn next_event(&mut self) -> Result<Option<DomEvent<'de>>, Self::Error> {
        self.read_next()
    }
}

fn parse_error(reader: &Reader<Cursor<&[u8]>>, e: impl fmt::Display) -> XmlError {
    XmlError::Parse {
        message: e.to_string(),
        position: reader.error_position(),
    }
}

/// Resolve a general entity reference.
fn resolve_entity(raw: &str, position: u64) -> Result<String, XmlError> {
    if let Some(resolved) = resolve_xml_entity(raw) {
        return Ok(resolved.into());
    }

    if let Some(rest) = raw.strip_prefix('#') {
        let invalid = |message: String| XmlError::Parse { message, position };
        let code = if let Some(hex) = rest.strip_prefix('x').or_else(|| rest.strip_prefix('X')) {
            u32::from_str_radix(hex, 16)
                .map_err(|_| invalid(format!("Invalid hex character reference: #{rest}")))?
        } else {
            rest.parse::<u32>()
                .map_err(|_| invalid(format!("Invalid decimal character reference: #{rest}")))?
        };

        let ch = char::from_u32(code).ok_or_else(|| invalid(format!("Invalid Unicode: {code}")))?;
        return Ok(ch.to_string());
    }

    Err(XmlError::UnknownEntity {
        name: raw.to_string(),
        position,
    })
}
