//! quick-xml backed [`EventSource`].

use crate::error::{Error, Result};
use crate::event::{Element, EventSource, XmlEvent};
use crate::name::QName;
use quick_xml::NsReader;
use quick_xml::escape::{resolve_predefined_entity, unescape};
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use std::io::BufRead;

/// Namespace-aware XML tokenizer producing owned [`XmlEvent`]s.
///
/// Empty elements are expanded into a start/end pair, comments, processing
/// instructions and the prolog are dropped, and entity references are
/// resolved into text.
pub struct XmlReader<R> {
    reader: NsReader<R>,
    buf: Vec<u8>,
    finished: bool,
}

impl<'a> XmlReader<&'a [u8]> {
    /// Creates a reader over an in-memory document.
    #[must_use]
    pub fn from_bytes(xml: &'a [u8]) -> Self {
        Self::new(xml)
    }
}

impl<R: BufRead> XmlReader<R> {
    /// Creates a reader over a buffered byte source.
    #[must_use]
    pub fn new(source: R) -> Self {
        let mut reader = NsReader::from_reader(source);
        reader.config_mut().expand_empty_elements = true;

        Self {
            reader,
            buf: Vec::new(),
            finished: false,
        }
    }
}

impl<R: BufRead> EventSource for XmlReader<R> {
    fn next_event(&mut self) -> Result<XmlEvent> {
        if self.finished {
            return Ok(XmlEvent::Eof);
        }

        loop {
            self.buf.clear();
            let (resolved, event) = self.reader.read_resolved_event_into(&mut self.buf)?;
            match event {
                Event::Start(ref start) => {
                    let name = resolve_name(resolved, start.local_name().as_ref())?;
                    return Ok(XmlEvent::Start(read_element(name, start)?));
                }
                Event::End(ref end) => {
                    let name = resolve_name(resolved, end.local_name().as_ref())?;
                    return Ok(XmlEvent::End(name));
                }
                Event::Text(ref text) => {
                    return Ok(XmlEvent::Text(std::str::from_utf8(text)?.to_string()));
                }
                Event::CData(ref data) => {
                    return Ok(XmlEvent::Text(std::str::from_utf8(data)?.to_string()));
                }
                Event::GeneralRef(ref reference) => {
                    let body = std::str::from_utf8(reference)?;
                    return Ok(XmlEvent::Text(resolve_reference(body)?));
                }
                Event::Eof => {
                    self.finished = true;
                    return Ok(XmlEvent::Eof);
                }
                _ => {}
            }
        }
    }
}

fn resolve_name(resolved: ResolveResult<'_>, local_name: &[u8]) -> Result<QName> {
    let local_name = std::str::from_utf8(local_name)?.to_string();
    let namespace = match resolved {
        ResolveResult::Bound(namespace) => {
            Some(std::str::from_utf8(namespace.as_ref())?.to_string())
        }
        // Undeclared prefixes are treated as unqualified names.
        _ => None,
    };
    Ok(QName {
        namespace,
        local_name,
    })
}

fn read_element(name: QName, start: &BytesStart<'_>) -> Result<Element> {
    let mut element = Element::new(name);

    for attr in start.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let key = std::str::from_utf8(attr.key.as_ref())?;
        if key == "xmlns" || key.starts_with("xmlns:") {
            continue;
        }
        let raw = std::str::from_utf8(&attr.value)?;
        element
            .attributes
            .push((key.to_string(), unescape(raw)?.into_owned()));
    }

    Ok(element)
}

fn resolve_reference(body: &str) -> Result<String> {
    if let Some(number) = body.strip_prefix('#') {
        let code = match number.strip_prefix('x') {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => number.parse().ok(),
        };
        return code
            .and_then(char::from_u32)
            .map(String::from)
            .ok_or_else(|| Error::InvalidCharRef {
                reference: body.to_string(),
            });
    }

    resolve_predefined_entity(body)
        .map(str::to_string)
        .ok_or_else(|| Error::InvalidCharRef {
            reference: body.to_string(),
        })
}
