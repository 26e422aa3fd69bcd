// Processors that turn extracted text into output artifacts

pub mod text_writer;

pub use text_writer::TextWriter;
