// file: src/parser/mod.rs
// description: document parsing module exports
// reference: internal module structure

pub mod normalizer;
pub mod pdf;

pub use normalizer::PageTextNormalizer;
pub use pdf::{PdfDocument, PdfExtractor};
