//! Decoder configuration.

use crate::decoder::Decoder;
use crate::error::Result;
use crate::fetch::{FetchCache, MetadataSource};
use crate::format::Format;
use sdmx_structure::{MetadataDocument, parse_structure, validate_structure};
use std::sync::Arc;

/// Builder for configuring and creating a [`Decoder`].
#[derive(Default)]
pub struct DecoderBuilder {
    format: Format,
    default_metadata: Option<MetadataDocument>,
    default_metadata_xml: Option<String>,
    source: Option<Arc<dyn MetadataSource>>,
    validate: bool,
}

impl DecoderBuilder {
    /// Creates a builder for generic messages with no metadata configured.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the message format.
    #[must_use]
    pub fn format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    /// Sets the metadata used for datasets without a `keyFamilyURI`.
    #[must_use]
    pub fn default_metadata(mut self, metadata: MetadataDocument) -> Self {
        self.default_metadata = Some(metadata);
        self.default_metadata_xml = None;
        self
    }

    /// Sets the default metadata from an unparsed document. Parsing happens
    /// in [`DecoderBuilder::build`].
    #[must_use]
    pub fn default_metadata_bytes(mut self, xml: impl Into<String>) -> Self {
        self.default_metadata_xml = Some(xml.into());
        self.default_metadata = None;
        self
    }

    /// Sets the source used to retrieve documents named by `keyFamilyURI`.
    #[must_use]
    pub fn source(mut self, source: impl MetadataSource + 'static) -> Self {
        self.source = Some(Arc::new(source));
        self
    }

    /// Validates every metadata document before it is used.
    #[must_use]
    pub fn validate_metadata(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    /// Builds the decoder.
    ///
    /// # Errors
    /// Returns an error if the default metadata cannot be parsed, or fails
    /// validation when validation is enabled.
    pub fn build(self) -> Result<Decoder> {
        let default_metadata = match (self.default_metadata, self.default_metadata_xml) {
            (Some(metadata), _) => Some(metadata),
            (None, Some(xml)) => Some(parse_structure(&xml)?),
            (None, None) => None,
        };
        if self.validate
            && let Some(metadata) = &default_metadata
        {
            validate_structure(metadata)?;
        }

        tracing::debug!(
            format = ?self.format,
            default_metadata = default_metadata.is_some(),
            source = self.source.is_some(),
            validate = self.validate,
            "decoder configured"
        );
        Ok(Decoder {
            format: self.format,
            default_metadata: default_metadata.map(Arc::new),
            cache: FetchCache::new(self.source).with_validation(self.validate),
        })
    }
}

impl std::fmt::Debug for DecoderBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecoderBuilder")
            .field("format", &self.format)
            .field(
                "default_metadata",
                &(self.default_metadata.is_some() || self.default_metadata_xml.is_some()),
            )
            .field("source", &self.source.is_some())
            .field("validate", &self.validate)
            .finish()
    }
}
