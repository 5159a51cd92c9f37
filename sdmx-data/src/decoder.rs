//! Decoding session.

use crate::builder::DecoderBuilder;
use crate::error::{DecodeError, Result};
use crate::fetch::FetchCache;
use crate::format::Format;
use crate::model::Message;
use crate::reader::MessageReader;
use sdmx_core::{Document, StreamCursor, TreeCursor, XmlReader};
use sdmx_structure::MetadataDocument;
use std::io::BufRead;
use std::sync::Arc;

/// A configured decoding session.
///
/// The session owns the metadata cache, so every message decoded through
/// it shares fetched metadata documents. A `Decoder` is `Sync`; readers
/// borrow it immutably and several can run at once.
#[derive(Debug)]
pub struct Decoder {
    pub(crate) format: Format,
    pub(crate) default_metadata: Option<Arc<MetadataDocument>>,
    pub(crate) cache: FetchCache,
}

impl Decoder {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> DecoderBuilder {
        DecoderBuilder::new()
    }

    /// Format of the messages this session decodes.
    #[must_use]
    pub fn format(&self) -> Format {
        self.format
    }

    /// Metadata used for datasets without a `keyFamilyURI`.
    #[must_use]
    pub fn default_metadata(&self) -> Option<&Arc<MetadataDocument>> {
        self.default_metadata.as_ref()
    }

    /// Metadata documents fetched so far.
    #[must_use]
    pub fn cache(&self) -> &FetchCache {
        &self.cache
    }

    /// Reads a message in a single forward pass.
    ///
    /// Memory use is bounded by the largest element, not the message.
    pub fn stream<R: BufRead>(
        &self,
        source: R,
    ) -> MessageReader<'_, StreamCursor<XmlReader<R>>, Format> {
        MessageReader::new(StreamCursor::new(XmlReader::new(source)), self.format, self)
    }

    /// Streams a message held in memory.
    pub fn stream_bytes<'a>(
        &'a self,
        xml: &'a [u8],
    ) -> MessageReader<'a, StreamCursor<XmlReader<&'a [u8]>>, Format> {
        MessageReader::new(StreamCursor::new(XmlReader::from_bytes(xml)), self.format, self)
    }

    /// Reads a message from a parsed document.
    ///
    /// The document is not consumed; a fresh reader over the same document
    /// starts again from the beginning.
    pub fn tree(&self, document: Arc<Document>) -> MessageReader<'_, TreeCursor, Format> {
        MessageReader::new(TreeCursor::new(document), self.format, self)
    }

    /// Decodes a whole message into owned values.
    ///
    /// `lang` is needed only if a dataset's time dimension is coded.
    ///
    /// # Errors
    /// Returns the first error encountered.
    pub fn read<R: BufRead>(&self, source: R, lang: Option<&str>) -> Result<Message> {
        self.stream(source).read_all(lang)
    }

    /// Decodes a whole message held in a string.
    ///
    /// # Errors
    /// Returns the first error encountered.
    pub fn read_str(&self, xml: &str, lang: Option<&str>) -> Result<Message> {
        self.stream_bytes(xml.as_bytes()).read_all(lang)
    }

    /// Metadata for the dataset at position `index`.
    ///
    /// A `keyFamilyURI` takes precedence over the default document.
    pub(crate) fn metadata_for(
        &self,
        uri: Option<&str>,
        index: usize,
    ) -> Result<Arc<MetadataDocument>> {
        match (uri.map(str::trim).filter(|uri| !uri.is_empty()), &self.default_metadata) {
            (Some(uri), _) => self.cache.fetch(uri),
            (None, Some(metadata)) => Ok(Arc::clone(metadata)),
            (None, None) => Err(DecodeError::MissingMetadata { dataset: index }),
        }
    }
}
