// Extractors for the supported document formats

pub mod doc;
pub mod docx;
pub mod pdf;
pub mod txt;

pub use doc::{DocExtractor, OfficeSession};
pub use docx::DocxExtractor;
pub use pdf::PdfExtractor;
pub use txt::TxtExtractor;
