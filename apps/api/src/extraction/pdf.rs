use lopdf::Document;
use tracing::warn;

use super::ExtractError;

/// Concatenates the text of every page in page order.
///
/// A page whose content cannot be decoded contributes nothing; only a byte
/// stream that does not load as a PDF at all is an error.
pub fn extract_pdf_text(data: &[u8]) -> Result<String, ExtractError> {
    let doc = Document::load_mem(data).map_err(|e| ExtractError::Pdf(e.to_string()))?;

    let mut text = String::new();
    // BTreeMap keyed by 1-based page number
    for page_number in doc.get_pages().into_keys() {
        match doc.extract_text(&[page_number]) {
            Ok(page_text) => text.push_str(&page_text),
            Err(e) => warn!("Skipping unreadable PDF page {page_number}: {e}"),
        }
    }

    Ok(text)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, ObjectId, Stream};

    /// Builds a minimal PDF with one Courier text line per page.
    pub(crate) fn build_pdf(pages: &[&str]) -> Vec<u8> {
        let pages: Vec<Option<&str>> = pages.iter().copied().map(Some).collect();
        build_pdf_pages(&pages)
    }

    /// Like [`build_pdf`], but a `None` page points its `Contents` at an
    /// object that does not exist.
    pub(crate) fn build_pdf_pages(pages: &[Option<&str>]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        });

        let missing_contents: ObjectId = (999, 0);
        let mut kids: Vec<Object> = Vec::new();
        for page in pages {
            let content_id = match page {
                Some(line) => {
                    let content = Content {
                        operations: vec![
                            Operation::new("BT", vec![]),
                            Operation::new("Tf", vec!["F1".into(), 12.into()]),
                            Operation::new("Td", vec![72.into(), 700.into()]),
                            Operation::new("Tj", vec![Object::string_literal(*line)]),
                            Operation::new("ET", vec![]),
                        ],
                    };
                    doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()))
                }
                None => missing_contents,
            };
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Count" => kids.len() as i64,
            "Kids" => kids,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages_dict));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }
}
