//! Traversal contract shared by the tree and stream backends.
//!
//! A cursor is always positioned inside an element (or at document level,
//! depth 0). [`Cursor::next_child`] enters the next child element of the
//! current one; [`Cursor::leave`] and [`Cursor::inner_text`] finish the
//! current element and return to its parent. The decoding layers are written
//! once against this trait; whether the document is held in memory or read
//! in a single forward pass is decided when the cursor is constructed.

use crate::error::Result;
use crate::event::Element;
use crate::name::NamePattern;

/// Depth-tracking traversal over an XML document.
pub trait Cursor {
    /// Number of currently open elements. Zero at document level.
    fn depth(&self) -> usize;

    /// Enters the next child element of the current element.
    ///
    /// Returns `None` once the current element has no further children; the
    /// current element is then closed and the cursor is back at its parent.
    /// At document level `None` means the document is exhausted.
    ///
    /// # Errors
    /// Returns an error if the input is malformed or the cursor has failed.
    fn next_child(&mut self) -> Result<Option<Element>>;

    /// Enters the next child element, which must match `pattern`.
    ///
    /// Only character data may precede it. Anything else is a structural
    /// mismatch, which is fatal for forward-only cursors.
    ///
    /// # Errors
    /// Returns [`crate::Error::StructuralMismatch`] if the next child does not
    /// match or the current element ends first.
    fn seek_child(&mut self, pattern: &NamePattern) -> Result<Element>;

    /// Concatenates the remaining character data of the current element,
    /// including that of nested elements, and closes it.
    ///
    /// # Errors
    /// Returns an error if called at document level or the input is
    /// malformed.
    fn inner_text(&mut self) -> Result<String>;

    /// Skips the remainder of the current element and closes it.
    ///
    /// # Errors
    /// Returns an error if the input is malformed or the cursor has failed.
    fn leave(&mut self) -> Result<()>;

    /// Enters the next child matching `pattern`, skipping over children that
    /// do not match.
    ///
    /// # Errors
    /// Propagates errors from [`Cursor::next_child`] and [`Cursor::leave`].
    fn next_child_matching(&mut self, pattern: &NamePattern) -> Result<Option<Element>> {
        while let Some(element) = self.next_child()? {
            if pattern.matches(&element.name) {
                return Ok(Some(element));
            }
            tracing::trace!(element = %element.name, wanted = %pattern, "skipping element");
            self.leave()?;
        }
        Ok(None)
    }

    /// Closes open elements until the cursor is back at `depth`.
    ///
    /// # Errors
    /// Propagates errors from [`Cursor::leave`].
    fn unwind_to(&mut self, depth: usize) -> Result<()> {
        while self.depth() > depth {
            self.leave()?;
        }
        Ok(())
    }
}

impl<C: Cursor + ?Sized> Cursor for &mut C {
    fn depth(&self) -> usize {
        (**self).depth()
    }

    fn next_child(&mut self) -> Result<Option<Element>> {
        (**self).next_child()
    }

    fn seek_child(&mut self, pattern: &NamePattern) -> Result<Element> {
        (**self).seek_child(pattern)
    }

    fn inner_text(&mut self) -> Result<String> {
        (**self).inner_text()
    }

    fn leave(&mut self) -> Result<()> {
        (**self).leave()
    }

    fn next_child_matching(&mut self, pattern: &NamePattern) -> Result<Option<Element>> {
        (**self).next_child_matching(pattern)
    }

    fn unwind_to(&mut self, depth: usize) -> Result<()> {
        (**self).unwind_to(depth)
    }
}
