mod read_document;

pub use read_document::{collect_document_paths, read_documents, ReadDocumentError, SourceDocument};
