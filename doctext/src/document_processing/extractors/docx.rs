// DOCX extractor
use anyhow::{Context, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;

/// Elements whose nested runs are not body paragraph text. Office Math
/// (`m:oMath`) has its own `m:r`/`m:t` runs that share local names with
/// WordprocessingML runs.
const EXCLUDED_CONTAINERS: [&[u8]; 5] = [b"txbxContent", b"del", b"moveFrom", b"oMathPara", b"oMath"];

pub struct DocxExtractor;

impl DocxExtractor {
    /// Extract the body paragraphs of a DOCX file, joined with newlines
    ///
    /// DOCX files are ZIP archives containing XML files.
    /// The main content is in word/document.xml
    pub fn extract(docx_path: impl AsRef<Path>) -> Result<String> {
        let paragraphs = Self::extract_paragraphs(docx_path)?;
        Ok(paragraphs.join("\n"))
    }

    /// Extract the text of each body paragraph, in document order
    pub fn extract_paragraphs(docx_path: impl AsRef<Path>) -> Result<Vec<String>> {
        let docx_path = docx_path.as_ref();

        // Open the DOCX file as a ZIP archive
        let file = File::open(docx_path)
            .with_context(|| format!("Failed to open DOCX file: {}", docx_path.display()))?;

        let mut archive = ZipArchive::new(file)
            .with_context(|| format!("Failed to read DOCX as ZIP: {}", docx_path.display()))?;

        let xml_content = if let Ok(mut document_xml) = archive.by_name("word/document.xml") {
            let mut xml_content = String::new();
            document_xml
                .read_to_string(&mut xml_content)
                .context("Failed to read word/document.xml")?;
            xml_content
        } else {
            return Err(anyhow::anyhow!(
                "Invalid DOCX file: word/document.xml not found in {}",
                docx_path.display()
            ));
        };

        let paragraphs = Self::paragraphs_from_xml(&xml_content)
            .with_context(|| format!("Malformed word/document.xml in {}", docx_path.display()))?;

        tracing::debug!(
            path = %docx_path.display(),
            paragraphs = paragraphs.len(),
            "extracted DOCX paragraphs"
        );

        Ok(paragraphs)
    }

    /// Collect the text of every `<w:p>` that is a direct child of `<w:body>`
    ///
    /// Paragraphs nested in tables, text boxes or other containers are
    /// skipped. Inside a body paragraph, run text is concatenated, with tabs
    /// mapped to `\t` and line breaks to `\n`. Page and column breaks add
    /// nothing.
    fn paragraphs_from_xml(xml: &str) -> Result<Vec<String>> {
        let mut reader = Reader::from_str(xml);

        let mut stack: Vec<Vec<u8>> = Vec::new();
        let mut paragraphs = Vec::new();
        let mut current: Option<String> = None;
        // Stack depth outside the open body paragraph
        let mut paragraph_depth = 0;
        // Open excluded containers inside the current paragraph
        let mut excluded = 0usize;

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    let name = e.local_name().as_ref().to_vec();
                    if current.is_none() {
                        if name == b"p" && parent_is(&stack, b"body") {
                            current = Some(String::new());
                            paragraph_depth = stack.len();
                        }
                    } else if EXCLUDED_CONTAINERS.contains(&name.as_slice()) {
                        excluded += 1;
                    }
                    stack.push(name);
                }
                Event::Empty(e) => {
                    let local_name = e.local_name();
                    let name = local_name.as_ref();
                    match current.as_mut() {
                        None => {
                            if name == b"p" && parent_is(&stack, b"body") {
                                paragraphs.push(String::new());
                            }
                        }
                        Some(text) => {
                            if excluded == 0 && parent_is(&stack, b"r") {
                                match name {
                                    b"tab" | b"ptab" => text.push('\t'),
                                    b"br" => text.push_str(break_text(&e)),
                                    b"cr" => text.push('\n'),
                                    b"noBreakHyphen" => text.push('-'),
                                    _ => {}
                                }
                            }
                        }
                    }
                }
                Event::Text(e) => {
                    if let Some(text) = current.as_mut() {
                        if excluded == 0 && in_run_text(&stack) {
                            text.push_str(&e.unescape()?);
                        }
                    }
                }
                Event::End(_) => {
                    let name = stack.pop();
                    if current.is_some() {
                        if stack.len() == paragraph_depth {
                            if let Some(text) = current.take() {
                                paragraphs.push(text);
                            }
                        } else if name.is_some_and(|n| EXCLUDED_CONTAINERS.contains(&n.as_slice())) {
                            excluded = excluded.saturating_sub(1);
                        }
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(paragraphs)
    }
}

/// `\n` for a text-wrapping break, nothing for page and column breaks
fn break_text(br: &BytesStart) -> &'static str {
    let kind = br
        .attributes()
        .flatten()
        .find(|attr| attr.key.local_name().as_ref() == b"type")
        .map(|attr| attr.value.into_owned());

    match kind.as_deref() {
        Some(b"page") | Some(b"column") => "",
        _ => "\n",
    }
}

fn parent_is(stack: &[Vec<u8>], name: &[u8]) -> bool {
    stack.last().map_or(false, |last| last.as_slice() == name)
}

/// True inside `<w:r><w:t>`
fn in_run_text(stack: &[Vec<u8>]) -> bool {
    match stack {
        [.., run, text] => run.as_slice() == b"r" && text.as_slice() == b"t",
        _ => false,
    }
}
