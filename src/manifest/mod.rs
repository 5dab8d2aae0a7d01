mod decoder;

pub use decoder::decode_documents;
