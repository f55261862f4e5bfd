use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use pdf_repage::*;

/// Build a document with one page per entry in `sizes`
fn create_test_document(sizes: &[(f32, f32)]) -> (Document, Vec<ObjectId>) {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let mut page_ids = Vec::new();
    let mut kids = Vec::new();
    for &(width, height) in sizes {
        let content_id = doc.add_object(Stream::new(Dictionary::new(), b"q Q".to_vec()));

        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Real(0.0),
                    Object::Real(0.0),
                    Object::Real(width),
                    Object::Real(height),
                ]),
            ),
            ("Resources", Object::Dictionary(Dictionary::new())),
            ("Contents", Object::Reference(content_id)),
        ]));
        page_ids.push(page_id);
        kids.push(Object::Reference(page_id));
    }

    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(sizes.len() as i64)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", catalog_id);

    (doc, page_ids)
}

fn media_box(doc: &Document, page_id: ObjectId) -> (f32, f32, f32, f32) {
    let mb = doc
        .get_dictionary(page_id)
        .unwrap()
        .get(b"MediaBox")
        .unwrap()
        .as_array()
        .unwrap()
        .clone();
    let num = |obj: &Object| match obj {
        Object::Integer(i) => *i as f32,
        Object::Real(r) => *r,
        _ => panic!("non-numeric MediaBox entry"),
    };
    (num(&mb[0]), num(&mb[1]), num(&mb[2]), num(&mb[3]))
}

fn content_prefix(doc: &Document, page_id: ObjectId) -> Option<String> {
    let contents = doc
        .get_dictionary(page_id)
        .unwrap()
        .get(b"Contents")
        .unwrap();
    match contents {
        Object::Array(refs) => {
            let first = refs.first().unwrap().as_reference().unwrap();
            let stream = doc.get_object(first).unwrap().as_stream().unwrap();
            Some(String::from_utf8_lossy(&stream.content).to_string())
        }
        _ => None,
    }
}

#[test]
fn test_normalize_targets_most_common_size() {
    let (mut doc, ids) = create_test_document(&[(100.0, 200.0), (100.0, 200.0), (50.0, 50.0)]);
    normalize_page_sizes(&mut doc).unwrap();

    for &id in &ids {
        assert_eq!(media_box(&doc, id), (0.0, 0.0, 100.0, 200.0));
    }
}

#[test]
fn test_normalize_scale_factor_fits_both_axes() {
    let (mut doc, ids) = create_test_document(&[(100.0, 200.0), (100.0, 200.0), (50.0, 50.0)]);
    normalize_page_sizes(&mut doc).unwrap();

    // min(100/50, 200/50) = 2.0, anchored at the origin
    let prefix = content_prefix(&doc, ids[2]).unwrap();
    assert_eq!(prefix, "q\n2 0 0 2 0 0 cm\n");
}

#[test]
fn test_normalize_leaves_matching_pages_unwrapped() {
    let (mut doc, ids) = create_test_document(&[(100.0, 200.0), (100.0, 200.0), (50.0, 50.0)]);
    normalize_page_sizes(&mut doc).unwrap();

    // Pages already at the target size keep their single content reference
    assert!(content_prefix(&doc, ids[0]).is_none());
    assert!(content_prefix(&doc, ids[1]).is_none());
}

#[test]
fn test_normalize_frequency_tie_keeps_first_size() {
    let (mut doc, ids) = create_test_document(&[(100.0, 200.0), (50.0, 50.0)]);
    normalize_page_sizes(&mut doc).unwrap();

    assert_eq!(media_box(&doc, ids[1]), (0.0, 0.0, 100.0, 200.0));
}

#[test]
fn test_normalize_no_stretch_on_narrow_page() {
    // 50x100 into 100x100: width could double but height caps the scale at 1.0
    let (mut doc, ids) = create_test_document(&[(100.0, 100.0), (100.0, 100.0), (50.0, 100.0)]);
    normalize_page_sizes(&mut doc).unwrap();

    assert!(content_prefix(&doc, ids[2]).is_none());
    assert_eq!(media_box(&doc, ids[2]), (0.0, 0.0, 100.0, 100.0));
}

#[test]
fn test_normalize_is_idempotent() {
    let (mut doc, ids) = create_test_document(&[(100.0, 200.0), (50.0, 50.0), (100.0, 200.0)]);
    normalize_page_sizes(&mut doc).unwrap();
    let first_pass: Vec<_> = ids.iter().map(|&id| media_box(&doc, id)).collect();
    let first_prefix = content_prefix(&doc, ids[1]);

    normalize_page_sizes(&mut doc).unwrap();
    let second_pass: Vec<_> = ids.iter().map(|&id| media_box(&doc, id)).collect();

    assert_eq!(first_pass, second_pass);
    // Second pass computes scale 1.0 everywhere, so no new wrap appears
    assert_eq!(content_prefix(&doc, ids[1]), first_prefix);
}

#[test]
fn test_normalize_empty_document_fails() {
    let (mut doc, _) = create_test_document(&[]);
    let result = normalize_page_sizes(&mut doc);
    assert!(matches!(result, Err(RepageError::NoPages)));
}

#[test]
fn test_normalize_degenerate_extent_fails() {
    let (mut doc, _) = create_test_document(&[(100.0, 200.0), (0.0, 0.0)]);
    let result = normalize_page_sizes(&mut doc);
    assert!(matches!(result, Err(RepageError::Geometry { .. })));
}

#[tokio::test]
async fn test_repage_swap_then_normalize() {
    // Combined variant: order is rewritten first, then sizes normalize
    let (doc, _) = create_test_document(&[(100.0, 200.0), (50.0, 50.0), (100.0, 200.0)]);

    let options = RepageOptions {
        swap_pages: true,
        restore_first_pair: false,
        normalize_sizes: true,
    };
    let result = repage(&doc, &options).await.unwrap();

    assert_eq!(result.get_pages().len(), 3);
    for &id in result.get_pages().values() {
        let (llx, lly, urx, ury) = media_box(&result, id);
        assert_eq!((llx, lly, urx, ury), (0.0, 0.0, 100.0, 200.0));
    }
}
