//! Writes generated placeholders back into the content document.
//!
//! Visits exactly the locations the scanner reads. Only
//! [`Placeholder::Ready`] values are written; a failed or unknown identifier
//! leaves its item untouched, including any `lqip` from an earlier run.

use crate::content::{self, Document, SectionKind};
use crate::process::{Placeholder, PlaceholderMap};
use serde_json::Value;

/// Counts of what the injector changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InjectStats {
    /// Items whose `lqip` was set.
    pub items_updated: usize,
    /// Info sections whose `lqip` was set.
    pub sections_updated: usize,
    /// References left alone because their placeholder failed or is missing.
    pub skipped: usize,
}

impl InjectStats {
    pub fn updated(&self) -> usize {
        self.items_updated + self.sections_updated
    }
}

/// Decide whether `target` (carrying `key`) gets a placeholder, and apply it.
fn apply(target: &mut Value, key: &str, map: &PlaceholderMap) -> Option<bool> {
    let identifier = content::string_field(target, key)?;
    match map.get(identifier) {
        Some(Placeholder::Ready(uri)) => Some(content::set_lqip(target, uri)),
        Some(Placeholder::Failed(_)) | None => Some(false),
    }
}

fn inject_items(items: &mut [Value], map: &PlaceholderMap, stats: &mut InjectStats) {
    for item in items {
        match apply(item, "fileName", map) {
            Some(true) => stats.items_updated += 1,
            Some(false) => stats.skipped += 1,
            None => {}
        }
    }
}

/// Mutate `document` in place. Never adds, removes, or reorders sections,
/// tags, or items.
pub fn inject(document: &mut Document, map: &PlaceholderMap) -> InjectStats {
    let mut stats = InjectStats::default();

    for section in document.sections_mut() {
        match SectionKind::of(section) {
            SectionKind::Gallery => inject_items(content::items_mut(section), map, &mut stats),
            SectionKind::GalleryWithTags => {
                inject_items(content::items_mut(section), map, &mut stats);
                for tag in content::tags_mut(section) {
                    inject_items(content::items_mut(tag), map, &mut stats);
                }
            }
            SectionKind::Info => match apply(section, "imageId", map) {
                Some(true) => stats.sections_updated += 1,
                Some(false) => stats.skipped += 1,
                None => {}
            },
            SectionKind::Other => {}
        }
    }

    stats
}
