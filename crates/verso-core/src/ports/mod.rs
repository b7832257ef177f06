pub mod document_store;

pub use document_store::{Document, DocumentPath, DocumentStore, FieldFilter, StoreError};
