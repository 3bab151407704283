//! Filename matching between source entries and reference entries

use crate::types::{ReferenceEntry, SourceEntry};
use std::collections::HashMap;

/// Find every source entry whose filename equals the reference filename
///
/// Matching is exact and case-sensitive on the last path segment, extension
/// included. No match is not an error; the reference entry simply places
/// nothing.
pub fn find_matches<'a>(
    sources: &'a [SourceEntry],
    reference: &ReferenceEntry,
) -> Vec<&'a SourceEntry> {
    sources
        .iter()
        .filter(|source| source.file_name() == reference.file_name())
        .collect()
}

/// Filename → source entries, built once per plan
///
/// Gives the same answer as [`find_matches`] without rescanning the source
/// list for every reference entry. Matches keep source order.
#[derive(Debug, Default)]
pub struct FilenameIndex<'a> {
    by_name: HashMap<&'a str, Vec<&'a SourceEntry>>,
}

impl<'a> FilenameIndex<'a> {
    pub fn new(sources: &'a [SourceEntry]) -> Self {
        let mut by_name: HashMap<&'a str, Vec<&'a SourceEntry>> = HashMap::new();
        for source in sources {
            by_name.entry(source.file_name()).or_default().push(source);
        }
        Self { by_name }
    }

    pub fn find_matches(&self, reference: &ReferenceEntry) -> &[&'a SourceEntry] {
        self.by_name
            .get(reference.file_name())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
