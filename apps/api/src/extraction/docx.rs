use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use super::ExtractError;

const DOCUMENT_PART: &str = "word/document.xml";

/// Upper bound on the inflated size of `word/document.xml`.
const MAX_DOCUMENT_XML_BYTES: u64 = 64 * 1024 * 1024;

/// Returns the full body text of a DOCX package as one string.
///
/// Runs (`w:t`) are concatenated, `w:tab` inside a run becomes a tab,
/// `w:br`/`w:cr` and the end of every paragraph become newlines.
pub fn extract_docx_text(data: &[u8]) -> Result<String, ExtractError> {
    extract_docx_text_capped(data, MAX_DOCUMENT_XML_BYTES)
}

fn extract_docx_text_capped(data: &[u8], max_xml_bytes: u64) -> Result<String, ExtractError> {
    let mut archive =
        ZipArchive::new(Cursor::new(data)).map_err(|e| ExtractError::Docx(e.to_string()))?;

    let mut raw = Vec::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| ExtractError::Docx(format!("{DOCUMENT_PART}: {e}")))?
        .take(max_xml_bytes + 1)
        .read_to_end(&mut raw)
        .map_err(|e| ExtractError::Docx(format!("{DOCUMENT_PART}: {e}")))?;

    if raw.len() as u64 > max_xml_bytes {
        return Err(ExtractError::Docx(format!(
            "{DOCUMENT_PART} exceeds {max_xml_bytes} bytes when decompressed"
        )));
    }
    let xml = String::from_utf8(raw)
        .map_err(|e| ExtractError::Docx(format!("{DOCUMENT_PART}: {e}")))?;

    document_xml_text(&xml)
}

fn document_xml_text(xml: &str) -> Result<String, ExtractError> {
    let mut reader = Reader::from_str(xml);
    let mut text = String::new();
    let mut in_run = false;
    let mut in_run_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"r" => in_run = true,
                b"t" => in_run_text = true,
                _ => {}
            },
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"r" => in_run = false,
                b"t" => in_run_text = false,
                b"p" => text.push('\n'),
                _ => {}
            },
            // tab stops under w:pPr/w:tabs are formatting, not content
            Ok(Event::Empty(e)) if in_run => match e.local_name().as_ref() {
                b"tab" => text.push('\t'),
                b"br" | b"cr" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Text(e)) if in_run_text => {
                let run = e
                    .unescape()
                    .map_err(|err| ExtractError::Docx(err.to_string()))?;
                text.push_str(&run);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ExtractError::Docx(format!(
                    "malformed {DOCUMENT_PART} at byte {}: {e}",
                    reader.buffer_position()
                )))
            }
            _ => {}
        }
    }

    Ok(text)
}
