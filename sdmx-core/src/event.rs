//! Owned XML events and the pull-style source that produces them.
//!
//! Both cursor backends are fed from an [`EventSource`]: the tree cursor
//! drains it once to build a [`crate::tree::Document`], the stream cursor
//! pulls from it one event at a time.

use crate::error::Result;
use crate::name::QName;
use std::fmt;

/// Start tag of an element with its attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Resolved element name.
    pub name: QName,
    /// Attributes in document order, keyed by their name as written
    /// (`COUNTRY`, `xml:lang`). Namespace declarations are not included.
    pub attributes: Vec<(String, String)>,
}

impl Element {
    /// Creates an element without attributes.
    #[must_use]
    pub fn new(name: QName) -> Self {
        Self {
            name,
            attributes: Vec::new(),
        }
    }

    /// Adds an attribute, builder style.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Looks up an attribute value by name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// One event of a forward-only XML reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlEvent {
    /// An element was opened. Empty elements produce `Start` followed by `End`.
    Start(Element),
    /// An element was closed.
    End(QName),
    /// Character data (text, CDATA or resolved references).
    Text(String),
    /// The source is exhausted.
    Eof,
}

impl XmlEvent {
    /// Returns the kind of this event.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::Start(_) => EventKind::Start,
            Self::End(_) => EventKind::End,
            Self::Text(_) => EventKind::Text,
            Self::Eof => EventKind::Eof,
        }
    }
}

impl fmt::Display for XmlEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start(element) => write!(f, "start of {}", element.name),
            Self::End(name) => write!(f, "end of {}", name),
            Self::Text(text) => write!(f, "text {:?}", text),
            Self::Eof => f.write_str("end of document"),
        }
    }
}

/// Discriminant of an [`XmlEvent`], used to declare which events a seek may
/// pass over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Element start.
    Start,
    /// Element end.
    End,
    /// Character data.
    Text,
    /// End of input.
    Eof,
}

/// Pull-style producer of XML events.
pub trait EventSource {
    /// Returns the next event. After [`XmlEvent::Eof`] every call returns `Eof`
    /// again.
    ///
    /// # Errors
    /// Returns an error if the input is not well-formed or cannot be read.
    fn next_event(&mut self) -> Result<XmlEvent>;
}

impl<S: EventSource + ?Sized> EventSource for &mut S {
    fn next_event(&mut self) -> Result<XmlEvent> {
        (**self).next_event()
    }
}

impl<S: EventSource + ?Sized> EventSource for Box<S> {
    fn next_event(&mut self) -> Result<XmlEvent> {
        (**self).next_event()
    }
}

/// Event source replaying a prepared list of events.
#[derive(Debug, Clone, Default)]
pub struct VecEvents {
    events: std::collections::VecDeque<XmlEvent>,
}

impl VecEvents {
    /// Creates a source from events in document order.
    #[must_use]
    pub fn new(events: Vec<XmlEvent>) -> Self {
        Self {
            events: events.into(),
        }
    }
}

impl EventSource for VecEvents {
    fn next_event(&mut self) -> Result<XmlEvent> {
        Ok(self.events.pop_front().unwrap_or(XmlEvent::Eof))
    }
}
