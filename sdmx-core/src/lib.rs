//! # SDMX Core
//!
//! XML reading primitives shared by the SDMX-ML structure and data readers.
//!
//! This crate provides:
//! - Owned XML events and a quick-xml backed, namespace-aware event source
//! - A fully materialized [`Document`] with path and descendant search
//! - The [`Cursor`] traversal contract with two backends: [`TreeCursor`]
//!   (random access, restartable) and [`StreamCursor`] (single forward pass)
//! - Qualified names, name patterns and the SDMX-ML 2.0 namespaces

pub mod cursor;
pub mod error;
pub mod event;
pub mod name;
pub mod stream;
pub mod tree;
pub mod xml;

pub use cursor::Cursor;
pub use error::{Error, Result};
pub use event::{Element, EventKind, EventSource, VecEvents, XmlEvent};
pub use name::{NamePattern, QName, ns};
pub use stream::{CursorState, StreamCursor};
pub use tree::{Document, NodeRef, TreeCursor};
pub use xml::XmlReader;
