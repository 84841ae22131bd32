//! The document codec boundary.
//!
//! The core requires a stable, round-trippable in-memory representation of
//! the document; the byte-level file format lives behind this trait. The
//! bundled [`JsonCodec`] is the reference implementation, used for tests
//! and local persistence.

use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::error::CodecError;

pub trait DocumentCodec {
    fn decode(&self, bytes: &[u8]) -> Result<Document, CodecError>;
    fn encode(&self, document: &Document) -> Result<Vec<u8>, CodecError>;
}

/// Bumped whenever the serialized document shape changes incompatibly.
const FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct Envelope {
    version: u32,
    document: Document,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl DocumentCodec for JsonCodec {
    fn decode(&self, bytes: &[u8]) -> Result<Document, CodecError> {
        let envelope: Envelope = serde_json::from_slice(bytes).map_err(CodecError::Decode)?;

        if envelope.version != FORMAT_VERSION {
            return Err(CodecError::UnsupportedVersion(envelope.version));
        }

        if envelope.document.pages.is_empty() {
            return Err(CodecError::EmptyDocument);
        }

        Ok(envelope.document)
    }

    fn encode(&self, document: &Document) -> Result<Vec<u8>, CodecError> {
        let envelope = Envelope {
            version: FORMAT_VERSION,
            document: document.clone(),
        };

        serde_json::to_vec(&envelope).map_err(CodecError::Encode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unknown_versions() {
        let bytes = br#"{"version": 99, "document": {"pages": [], "shared_styles": [], "shared_text_styles": []}}"#;

        assert!(matches!(
            JsonCodec.decode(bytes),
            Err(CodecError::UnsupportedVersion(99))
        ));
    }

    #[test]
    fn rejects_documents_with_no_pages() {
        let bytes = br#"{"version": 1, "document": {"pages": [], "shared_styles": [], "shared_text_styles": []}}"#;

        assert!(matches!(
            JsonCodec.decode(bytes),
            Err(CodecError::EmptyDocument)
        ));
    }

    #[test]
    fn rejects_malformed_bytes() {
        assert!(matches!(
            JsonCodec.decode(b"not json"),
            Err(CodecError::Decode(_))
        ));
    }
}
