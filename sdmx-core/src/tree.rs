//! Fully materialized documents and the random-access tree cursor.

use crate::cursor::Cursor;
use crate::error::{Error, Result};
use crate::event::{Element, EventSource, XmlEvent};
use crate::name::{NamePattern, QName};
use crate::xml::XmlReader;
use std::io::BufRead;
use std::sync::Arc;

#[derive(Debug, Clone)]
enum Content {
    Element(usize),
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    element: Element,
    content: Vec<Content>,
}

/// An XML document held in memory.
///
/// Elements live in an arena in document order; the root is always the
/// first entry and children refer to their nodes by index.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    /// Parses a document from a string.
    ///
    /// # Errors
    /// Returns an error if the XML is malformed or has no root element.
    pub fn parse(xml: &str) -> Result<Self> {
        Self::from_events(XmlReader::from_bytes(xml.as_bytes()))
    }

    /// Parses a document from a buffered byte source.
    ///
    /// # Errors
    /// Returns an error if the input cannot be read or is malformed.
    pub fn read<R: BufRead>(source: R) -> Result<Self> {
        Self::from_events(XmlReader::new(source))
    }

    /// Builds a document by draining an event source.
    ///
    /// # Errors
    /// Returns an error if the events do not form exactly one root element.
    pub fn from_events<S: EventSource>(mut source: S) -> Result<Self> {
        let mut nodes: Vec<Node> = Vec::new();
        let mut open: Vec<usize> = Vec::new();

        loop {
            match source.next_event()? {
                XmlEvent::Start(element) => {
                    let id = nodes.len();
                    match open.last() {
                        Some(&parent) => nodes[parent].content.push(Content::Element(id)),
                        None if !nodes.is_empty() => {
                            return Err(Error::mismatch(
                                "end of document",
                                format!("second root element {}", element.name),
                            ));
                        }
                        None => {}
                    }
                    nodes.push(Node {
                        element,
                        content: Vec::new(),
                    });
                    open.push(id);
                }
                XmlEvent::End(name) => {
                    if open.pop().is_none() {
                        return Err(Error::mismatch("start tag", format!("end of {}", name)));
                    }
                }
                XmlEvent::Text(text) => {
                    // Whitespace around the root element is not content.
                    if let Some(&current) = open.last() {
                        nodes[current].content.push(Content::Text(text));
                    }
                }
                XmlEvent::Eof => {
                    if let Some(&current) = open.last() {
                        return Err(Error::eof(nodes[current].element.name.to_string()));
                    }
                    break;
                }
            }
        }

        if nodes.is_empty() {
            return Err(Error::mismatch("root element", "end of document"));
        }
        Ok(Self { nodes })
    }

    /// Returns the root element.
    #[must_use]
    pub fn root(&self) -> NodeRef<'_> {
        NodeRef {
            document: self,
            id: 0,
        }
    }

    /// Number of elements in the document.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a parsed document has at least its root element.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn node(&self, id: usize) -> NodeRef<'_> {
        NodeRef { document: self, id }
    }

    /// Appends the text of `id` starting at content index `from`.
    fn collect_text(&self, id: usize, from: usize, out: &mut String) {
        let mut stack = vec![(id, from)];
        while let Some((node, index)) = stack.pop() {
            let content = &self.nodes[node].content;
            let mut index = index;
            while index < content.len() {
                match &content[index] {
                    Content::Text(text) => out.push_str(text),
                    Content::Element(child) => {
                        stack.push((node, index + 1));
                        stack.push((*child, 0));
                        break;
                    }
                }
                index += 1;
            }
        }
    }
}

/// Borrowed handle to an element of a [`Document`].
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    document: &'a Document,
    id: usize,
}

impl<'a> NodeRef<'a> {
    /// Returns the element's start tag.
    #[must_use]
    pub fn element(&self) -> &'a Element {
        &self.document.nodes[self.id].element
    }

    /// Returns the element's name.
    #[must_use]
    pub fn name(&self) -> &'a QName {
        &self.element().name
    }

    /// Looks up an attribute value by name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.element().attribute(name)
    }

    /// Iterates over the direct child elements.
    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a>> + use<'a> {
        let document = self.document;
        document.nodes[self.id]
            .content
            .iter()
            .filter_map(move |content| match content {
                Content::Element(id) => Some(document.node(*id)),
                Content::Text(_) => None,
            })
    }

    /// Returns the first element reached by following `path` from this one,
    /// one step per child level.
    #[must_use]
    pub fn find(&self, path: &[NamePattern]) -> Option<NodeRef<'a>> {
        self.find_all(path).into_iter().next()
    }

    /// Returns every element reached by following `path`, in document order.
    #[must_use]
    pub fn find_all(&self, path: &[NamePattern]) -> Vec<NodeRef<'a>> {
        let mut current = vec![*self];
        for pattern in path {
            current = current
                .iter()
                .flat_map(|node| node.children())
                .filter(|child| pattern.matches(child.name()))
                .collect();
        }
        current
    }

    /// Returns every descendant matching `pattern`, at any depth, in
    /// document order.
    #[must_use]
    pub fn descendants(&self, pattern: &NamePattern) -> Vec<NodeRef<'a>> {
        let mut found = Vec::new();
        let mut stack: Vec<NodeRef<'a>> = self.children().collect();
        stack.reverse();
        while let Some(node) = stack.pop() {
            if pattern.matches(node.name()) {
                found.push(node);
            }
            let mut children: Vec<NodeRef<'a>> = node.children().collect();
            children.reverse();
            stack.extend(children);
        }
        found
    }

    /// Concatenated character data of this element and all its descendants.
    #[must_use]
    pub fn inner_text(&self) -> String {
        let mut text = String::new();
        self.document.collect_text(self.id, 0, &mut text);
        text
    }
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    node: usize,
    next: usize,
}

/// Cursor over a [`Document`].
///
/// Cloning a tree cursor forks the traversal; a fresh cursor over the same
/// shared document restarts it.
#[derive(Debug, Clone)]
pub struct TreeCursor {
    document: Arc<Document>,
    frames: Vec<Frame>,
    root_visited: bool,
}

impl TreeCursor {
    /// Creates a cursor at document level.
    #[must_use]
    pub fn new(document: Arc<Document>) -> Self {
        Self {
            document,
            frames: Vec::new(),
            root_visited: false,
        }
    }

    /// Returns the document being traversed.
    #[must_use]
    pub fn document(&self) -> &Arc<Document> {
        &self.document
    }

    /// Returns the element the cursor is currently inside.
    #[must_use]
    pub fn current(&self) -> Option<NodeRef<'_>> {
        self.frames.last().map(|frame| self.document.node(frame.node))
    }
}

impl Cursor for TreeCursor {
    fn depth(&self) -> usize {
        self.frames.len()
    }

    fn next_child(&mut self) -> Result<Option<Element>> {
        let Some(frame) = self.frames.last_mut() else {
            if self.root_visited {
                return Ok(None);
            }
            self.root_visited = true;
            self.frames.push(Frame { node: 0, next: 0 });
            return Ok(Some(self.document.nodes[0].element.clone()));
        };

        let content = &self.document.nodes[frame.node].content;
        while frame.next < content.len() {
            let index = frame.next;
            frame.next += 1;
            if let Content::Element(child) = content[index] {
                self.frames.push(Frame {
                    node: child,
                    next: 0,
                });
                return Ok(Some(self.document.nodes[child].element.clone()));
            }
        }

        self.frames.pop();
        Ok(None)
    }

    fn seek_child(&mut self, pattern: &NamePattern) -> Result<Element> {
        let parent = self
            .current()
            .map_or_else(|| "document".to_string(), |node| node.name().to_string());
        match self.next_child()? {
            Some(element) if pattern.matches(&element.name) => Ok(element),
            Some(element) => Err(Error::mismatch(
                format!("start of {}", pattern),
                format!("start of {}", element.name),
            )),
            None => Err(Error::mismatch(
                format!("start of {}", pattern),
                format!("end of {}", parent),
            )),
        }
    }

    fn inner_text(&mut self) -> Result<String> {
        let frame = self
            .frames
            .pop()
            .ok_or_else(|| Error::mismatch("open element", "document level"))?;
        let mut text = String::new();
        self.document.collect_text(frame.node, frame.next, &mut text);
        Ok(text)
    }

    fn leave(&mut self) -> Result<()> {
        self.frames.pop();
        Ok(())
    }
}
