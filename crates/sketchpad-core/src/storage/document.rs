//! Document persistence on top of a blob store.

use super::{BlobStore, StorageError, StorageResult};
use crate::canvas::CanvasDocument;

/// Key the document payload is stored under.
pub const STORAGE_KEY: &str = "SKETCH/canvasElements";

/// Owns the live document and writes it through to a [`BlobStore`].
pub struct DocumentStore<S: BlobStore> {
    storage: S,
    key: String,
    document: CanvasDocument,
}

impl<S: BlobStore> DocumentStore<S> {
    /// Load the document stored under `key`.
    ///
    /// A missing blob yields an empty document. A blob that does not parse is
    /// discarded and an empty document is used instead; read failures are
    /// returned.
    pub fn open(storage: S, key: &str, default_background: &str) -> StorageResult<Self> {
        let document = match storage.get(key)? {
            None => CanvasDocument::with_background(default_background),
            Some(bytes) => match CanvasDocument::from_bytes(&bytes) {
                Ok(doc) => {
                    log::debug!("Loaded {} elements from '{}'", doc.len(), key);
                    doc
                }
                Err(e) => {
                    log::warn!("Discarding malformed document under '{}': {}", key, e);
                    CanvasDocument::with_background(default_background)
                }
            },
        };
        Ok(Self {
            storage,
            key: key.to_string(),
            document,
        })
    }

    pub fn document(&self) -> &CanvasDocument {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut CanvasDocument {
        &mut self.document
    }

    /// Write the full document to the store.
    pub fn persist(&self) -> StorageResult<()> {
        let bytes = self
            .document
            .to_bytes()
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.storage.set(&self.key, &bytes)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Element, Rectangle};
    use crate::storage::MemoryStorage;
    use kurbo::Point;

    #[test]
    fn test_open_missing_is_empty() {
        let store = DocumentStore::open(MemoryStorage::new(), STORAGE_KEY, "#ffffff").unwrap();
        assert!(store.document().is_empty());
        assert_eq!(store.document().background, "#ffffff");
    }

    #[test]
    fn test_persist_and_reopen() {
        let storage = MemoryStorage::new();
        let mut store = DocumentStore::open(&storage, STORAGE_KEY, "#ffffff").unwrap();
        store.document_mut().background = "#eeeeee".to_string();
        store
            .document_mut()
            .push(Element::Rect(Rectangle::new(Point::new(1.0, 1.0), 5.0, 5.0, "#000000", 2)));
        store.persist().unwrap();

        let reopened = DocumentStore::open(&storage, STORAGE_KEY, "#ffffff").unwrap();
        assert_eq!(reopened.document(), store.document());
    }

    #[test]
    fn test_malformed_payload_fails_closed() {
        let storage = MemoryStorage::new();
        storage.set(STORAGE_KEY, b"{not json").unwrap();
        let store = DocumentStore::open(&storage, STORAGE_KEY, "#ffffff").unwrap();
        assert!(store.document().is_empty());

        storage
            .set(STORAGE_KEY, br##"[[{"type":"rect","x":1}],"#000"]"##)
            .unwrap();
        let store = DocumentStore::open(&storage, STORAGE_KEY, "#ffffff").unwrap();
        assert!(store.document().is_empty());
        assert_eq!(store.document().background, "#ffffff");
    }
}
