use crate::{
    wire::{ResponseEnvelope, WireDocument},
    Document, DocumentMetadata, NimbleError,
};

/// Parses a raw response body into documents.
///
/// Missing metadata fields never fail decoding; they fall back to the
/// defaults declared on the wire types (`""` for strings, `-1` for position).
/// An empty or missing `body` array yields an empty Vec.
pub(crate) fn decode_documents(body: &str) -> Result<Vec<Document>, NimbleError> {
    let envelope = serde_json::from_str::<ResponseEnvelope>(body).map_err(|err| {
        NimbleError::Decode(format!("invalid response JSON: {err}; body: {body}"))
    })?;
    Ok(envelope.body.into_iter().map(into_document).collect())
}

fn into_document(doc: WireDocument) -> Document {
    Document {
        page_content: doc.page_content,
        metadata: DocumentMetadata {
            title: doc.metadata.title,
            snippet: doc.metadata.snippet,
            url: doc.metadata.url,
            position: doc.metadata.position,
            entity_type: doc.metadata.entity_type,
        },
    }
}
