//! Shared helpers for integration tests.
//!
//! Test documents are generated in-memory with `lopdf` rather than checked
//! in as binary fixtures. Pages are tagged through their MediaBox width
//! (600 + index) so reordering is observable after a round trip.

use lopdf::{Document, Object, dictionary};
use std::path::{Path, PathBuf};

/// Build a PDF with `pages` pages, page `i` having MediaBox width `600 + i`.
pub fn create_tagged_document(pages: usize) -> Document {
    let mut doc = Document::with_version("1.4");

    let pages_id = doc.new_object_id();
    let mut page_ids = Vec::new();
    for i in 0..pages {
        let width = 600 + i as i64;
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), width.into(), 792.into()],
        });
        page_ids.push(page_id);
    }

    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => page_ids.into_iter().map(Object::from).collect::<Vec<Object>>(),
        "Count" => pages as i64,
    };
    doc.objects.insert(pages_id, pages_dict.into());

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc
}

/// Write a tagged test PDF into `dir` and return its path.
pub fn create_pdf(dir: &Path, name: &str, pages: usize) -> PathBuf {
    let mut doc = create_tagged_document(pages);
    let path = dir.join(name);
    doc.save(&path).expect("failed to save test PDF");
    path
}

/// MediaBox widths of a document's pages, in page order.
pub fn page_widths(doc: &Document) -> Vec<i64> {
    doc.get_pages()
        .into_values()
        .map(|id| {
            let Ok(Object::Dictionary(dict)) = doc.get_object(id) else {
                panic!("page {id:?} is not a dictionary");
            };
            let Ok(Object::Array(media_box)) = dict.get(b"MediaBox") else {
                panic!("page {id:?} has no MediaBox");
            };
            media_box[2].as_i64().expect("MediaBox width is not an integer")
        })
        .collect()
}
