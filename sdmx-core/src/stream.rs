//! Forward-only cursor over an [`EventSource`].
//!
//! The stream cursor never buffers beyond the current event; the only state
//! it keeps is the stack of open element names. Every operation is a guarded
//! transition: once an operation fails the cursor refuses all further work,
//! since a forward-only position cannot be rewound.

use crate::cursor::Cursor;
use crate::error::{Error, Result};
use crate::event::{Element, EventKind, EventSource, XmlEvent};
use crate::name::{NamePattern, QName};
use std::fmt;

/// Position of a [`StreamCursor`] within the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    /// No element has been opened yet.
    BeforeDocument,
    /// Inside the root element or one of its descendants.
    InElement,
    /// The root element has been closed.
    AfterDocument,
    /// An earlier operation failed; the cursor is unusable.
    Failed,
}

/// Single-pass cursor pulling events on demand.
pub struct StreamCursor<S> {
    source: S,
    open: Vec<QName>,
    state: CursorState,
    skipped: u64,
}

impl<S: EventSource> StreamCursor<S> {
    /// Creates a cursor positioned before the root element.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            source,
            open: Vec::new(),
            state: CursorState::BeforeDocument,
            skipped: 0,
        }
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> CursorState {
        self.state
    }

    /// Number of elements passed over without being read.
    #[must_use]
    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    /// Advances until an event satisfies `predicate` and returns it.
    ///
    /// Events whose kind is listed in `ignore` are consumed silently. Any
    /// other event arriving first is a structural mismatch and leaves the
    /// cursor in [`CursorState::Failed`].
    ///
    /// # Errors
    /// Returns [`Error::StructuralMismatch`] on an unexpected event, or the
    /// underlying read error.
    pub fn seek<P>(
        &mut self,
        expected: impl fmt::Display,
        predicate: P,
        ignore: &[EventKind],
    ) -> Result<XmlEvent>
    where
        P: Fn(&XmlEvent) -> bool,
    {
        loop {
            let event = self.pull()?;
            if predicate(&event) {
                return Ok(event);
            }
            if !ignore.contains(&event.kind()) {
                self.state = CursorState::Failed;
                return Err(Error::mismatch(expected.to_string(), event.to_string()));
            }
        }
    }

    /// Reads one event and applies its depth transition.
    fn pull(&mut self) -> Result<XmlEvent> {
        if self.state == CursorState::Failed {
            return Err(Error::CursorFailed);
        }

        let event = match self.source.next_event() {
            Ok(event) => event,
            Err(err) => {
                self.state = CursorState::Failed;
                return Err(err);
            }
        };

        match &event {
            XmlEvent::Start(element) => {
                if self.state == CursorState::AfterDocument {
                    self.state = CursorState::Failed;
                    return Err(Error::mismatch(
                        "end of document",
                        format!("second root element {}", element.name),
                    ));
                }
                self.open.push(element.name.clone());
                self.state = CursorState::InElement;
            }
            XmlEvent::End(name) => {
                if self.open.pop().is_none() {
                    self.state = CursorState::Failed;
                    return Err(Error::mismatch("start tag", format!("end of {}", name)));
                }
                if self.open.is_empty() {
                    self.state = CursorState::AfterDocument;
                }
            }
            XmlEvent::Text(_) => {}
            XmlEvent::Eof => {
                if let Some(name) = self.open.last() {
                    let context = name.to_string();
                    self.state = CursorState::Failed;
                    return Err(Error::eof(context));
                }
                self.state = CursorState::AfterDocument;
            }
        }

        Ok(event)
    }

    /// Consumes events until only `depth` elements remain open, collecting
    /// character data when `text` is given.
    fn consume_to(&mut self, depth: usize, mut text: Option<&mut String>) -> Result<()> {
        while self.open.len() > depth {
            if let XmlEvent::Text(chunk) = self.pull()? {
                if let Some(out) = text.as_deref_mut() {
                    out.push_str(&chunk);
                }
            }
        }
        Ok(())
    }
}

impl<S: EventSource> Cursor for StreamCursor<S> {
    fn depth(&self) -> usize {
        self.open.len()
    }

    fn next_child(&mut self) -> Result<Option<Element>> {
        if self.state == CursorState::AfterDocument {
            return Ok(None);
        }
        let event = self.seek(
            "child element or end tag",
            |event| event.kind() != EventKind::Text,
            &[EventKind::Text],
        )?;
        match event {
            XmlEvent::Start(element) => Ok(Some(element)),
            _ => Ok(None),
        }
    }

    fn seek_child(&mut self, pattern: &NamePattern) -> Result<Element> {
        let event = self.seek(
            format_args!("start of {}", pattern),
            |event| matches!(event, XmlEvent::Start(element) if pattern.matches(&element.name)),
            &[EventKind::Text],
        )?;
        match event {
            XmlEvent::Start(element) => Ok(element),
            other => {
                self.state = CursorState::Failed;
                Err(Error::mismatch(format!("start of {}", pattern), other.to_string()))
            }
        }
    }

    fn inner_text(&mut self) -> Result<String> {
        let Some(depth) = self.open.len().checked_sub(1) else {
            return Err(Error::mismatch("open element", "document level"));
        };
        let mut text = String::new();
        self.consume_to(depth, Some(&mut text))?;
        Ok(text)
    }

    fn leave(&mut self) -> Result<()> {
        let Some(depth) = self.open.len().checked_sub(1) else {
            return Ok(());
        };
        if let Some(name) = self.open.last() {
            tracing::trace!(element = %name, depth = depth + 1, "leaving element");
        }
        self.consume_to(depth, None)
    }

    fn next_child_matching(&mut self, pattern: &NamePattern) -> Result<Option<Element>> {
        while let Some(element) = self.next_child()? {
            if pattern.matches(&element.name) {
                return Ok(Some(element));
            }
            tracing::trace!(element = %element.name, wanted = %pattern, "skipping element");
            self.skipped += 1;
            self.leave()?;
        }
        Ok(None)
    }
}
