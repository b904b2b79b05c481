//! Collects the image identifiers referenced by a content document.
//!
//! Two provenances are tracked separately:
//!
//! | Source | Field | Where |
//! |---|---|---|
//! | item file names | `fileName` | `gallery` items, `galleryWithTags` items and tag items |
//! | info image ids | `imageId` | directly on `info` sections |
//!
//! Each list is deduplicated on its own and keeps first-seen order.
//! [`ScannedIds::processing_list`] merges them into the fetch order.

use crate::content::{self, Document, SectionKind};
use std::collections::HashSet;

/// Deduplicated identifiers found in a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScannedIds {
    pub file_names: Vec<String>,
    pub image_ids: Vec<String>,
}

impl ScannedIds {
    /// Identifiers to fetch: file names first, then info image ids.
    ///
    /// An id that is both a `fileName` and an `imageId` is fetched once; its
    /// placeholder is injected in both places.
    pub fn processing_list(&self) -> Vec<String> {
        let mut seen: HashSet<&str> = HashSet::new();
        self.file_names
            .iter()
            .chain(&self.image_ids)
            .filter(|id| seen.insert(id.as_str()))
            .cloned()
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.file_names.is_empty() && self.image_ids.is_empty()
    }
}

/// Order-preserving set of strings.
#[derive(Default)]
struct OrderedSet {
    seen: HashSet<String>,
    order: Vec<String>,
}

impl OrderedSet {
    fn insert(&mut self, value: &str) {
        if self.seen.insert(value.to_string()) {
            self.order.push(value.to_string());
        }
    }

    fn extend_from_items(&mut self, items: &[serde_json::Value]) {
        for item in items {
            if let Some(name) = content::string_field(item, "fileName") {
                self.insert(name);
            }
        }
    }
}

/// Walk every section and collect identifiers. Pure; never fails.
pub fn scan(document: &Document) -> ScannedIds {
    let mut file_names = OrderedSet::default();
    let mut image_ids = OrderedSet::default();

    for section in document.sections() {
        match SectionKind::of(section) {
            SectionKind::Gallery => file_names.extend_from_items(content::items(section)),
            SectionKind::GalleryWithTags => {
                file_names.extend_from_items(content::items(section));
                for tag in content::tags(section) {
                    file_names.extend_from_items(content::items(tag));
                }
            }
            SectionKind::Info => {
                if let Some(id) = content::string_field(section, "imageId") {
                    image_ids.insert(id);
                }
            }
            SectionKind::Other => {}
        }
    }

    ScannedIds {
        file_names: file_names.order,
        image_ids: image_ids.order,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{doc, sample_document};
    use serde_json::json;

    #[test]
    fn scan_sample_document() {
        let ids = scan(&sample_document());
        assert_eq!(
            ids.file_names,
            vec!["a.jpg", "b.jpg", "c.jpg", "d.jpg", "e.jpg"]
        );
        assert_eq!(ids.image_ids, vec!["portrait.jpg"]);
    }

    #[test]
    fn scan_keeps_first_seen_order_and_dedupes() {
        let document = doc(json!({"sections": [
            {"type": "gallery", "items": [
                {"fileName": "z.jpg"}, {"fileName": "a.jpg"}, {"fileName": "z.jpg"}
            ]},
            {"type": "gallery", "items": [{"fileName": "a.jpg"}, {"fileName": "m.jpg"}]}
        ]}));

        assert_eq!(scan(&document).file_names, vec!["z.jpg", "a.jpg", "m.jpg"]);
    }

    #[test]
    fn scan_walks_tag_items_after_section_items() {
        let document = doc(json!({"sections": [
            {"type": "galleryWithTags",
             "tags": [
                {"name": "one", "items": [{"fileName": "t1.jpg"}]},
                {"name": "two", "items": [{"fileName": "t2.jpg"}]}
             ],
             "items": [{"fileName": "top.jpg"}]}
        ]}));

        assert_eq!(
            scan(&document).file_names,
            vec!["top.jpg", "t1.jpg", "t2.jpg"]
        );
    }

    #[test]
    fn scan_tolerates_missing_optional_fields() {
        let document = doc(json!({"sections": [
            {"type": "gallery"},
            {"type": "galleryWithTags", "tags": [{"name": "empty"}]},
            {"type": "info"},
            {"type": "gallery", "items": [{"title": "no file"}, {"fileName": ""}]}
        ]}));

        assert!(scan(&document).is_empty());
    }

    #[test]
    fn scan_ignores_unknown_section_types() {
        let document = doc(json!({"sections": [
            {"type": "video", "items": [{"fileName": "hidden.jpg"}], "imageId": "x.jpg"},
            {"items": [{"fileName": "untyped.jpg"}]}
        ]}));

        assert!(scan(&document).is_empty());
    }

    #[test]
    fn scan_ignores_image_id_on_gallery_and_items_on_info() {
        let document = doc(json!({"sections": [
            {"type": "gallery", "imageId": "nope.jpg"},
            {"type": "info", "imageId": "yes.jpg", "items": [{"fileName": "nope2.jpg"}]}
        ]}));

        let ids = scan(&document);
        assert!(ids.file_names.is_empty());
        assert_eq!(ids.image_ids, vec!["yes.jpg"]);
    }

    #[test]
    fn processing_list_puts_file_names_first() {
        let ids = ScannedIds {
            file_names: vec!["a.jpg".into(), "b.jpg".into()],
            image_ids: vec!["c.jpg".into()],
        };
        assert_eq!(ids.processing_list(), vec!["a.jpg", "b.jpg", "c.jpg"]);
    }

    #[test]
    fn processing_list_dedupes_across_provenances() {
        let ids = ScannedIds {
            file_names: vec!["a.jpg".into(), "shared.jpg".into()],
            image_ids: vec!["shared.jpg".into(), "c.jpg".into()],
        };
        assert_eq!(
            ids.processing_list(),
            vec!["a.jpg", "shared.jpg", "c.jpg"]
        );
    }
}
