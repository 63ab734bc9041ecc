//! Grouping of files by destination folder.
//!
//! Files are grouped in scan order; groups below the minimum size are then
//! folded into a single "Other" group so that no file is ever dropped.

use crate::classifier::{self, SizeBand, Strategy};
use crate::file_record::FileRecord;
use crate::resolver::FolderResolver;
use serde::Serialize;

/// Name of the catch-all group that absorbs undersized groups.
pub const OTHER_GROUP: &str = "Other";

/// Files headed for a single destination folder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group {
    /// The destination folder name, relative to the target directory.
    pub folder: String,
    /// Files in scan order.
    pub files: Vec<FileRecord>,
}

/// Ordered mapping from destination folder to the files moving there.
///
/// Groups keep the order in which their folder was first seen.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Grouping {
    groups: Vec<Group>,
}

impl Grouping {
    /// Creates an empty grouping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Groups every record under the folder the resolver picks for it.
    pub fn build(records: Vec<FileRecord>, resolver: &FolderResolver) -> Self {
        let mut grouping = Self::new();
        for record in records {
            let folder = classifier::destination(&record, resolver);
            grouping.insert(folder, record);
        }
        grouping
    }

    /// Appends `record` to the group for `folder`, creating it if needed.
    pub fn insert(&mut self, folder: String, record: FileRecord) {
        match self.groups.iter_mut().find(|g| g.folder == folder) {
            Some(group) => group.files.push(record),
            None => self.groups.push(Group {
                folder,
                files: vec![record],
            }),
        }
    }

    /// Dissolves every group with fewer than `min_items` files into the
    /// [`OTHER_GROUP`].
    ///
    /// Dissolved files keep their relative order. A surviving "Other" group
    /// is extended in place; otherwise a new one is appended at the end.
    pub fn merge_small_groups(&mut self, min_items: usize) {
        let (kept, dissolved): (Vec<Group>, Vec<Group>) = std::mem::take(&mut self.groups)
            .into_iter()
            .partition(|g| g.files.len() >= min_items);
        self.groups = kept;

        let orphans: Vec<FileRecord> = dissolved.into_iter().flat_map(|g| g.files).collect();
        if orphans.is_empty() {
            return;
        }

        match self.groups.iter_mut().find(|g| g.folder == OTHER_GROUP) {
            Some(other) => other.files.extend(orphans),
            None => self.groups.push(Group {
                folder: OTHER_GROUP.to_string(),
                files: orphans,
            }),
        }
    }

    /// The groups, in first-seen order.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Looks up the group for `folder`.
    pub fn get(&self, folder: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.folder == folder)
    }

    /// Total number of files across all groups.
    pub fn file_count(&self) -> usize {
        self.groups.iter().map(|g| g.files.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Classifies, resolves, groups and merges `records` in one pass.
///
/// # Examples
///
/// ```
/// use chrono::Local;
/// use dirsort::classifier::Strategy;
/// use dirsort::file_record::FileRecord;
/// use dirsort::grouping::plan;
///
/// let records = vec![
///     FileRecord::new("/tmp/a.png", 1, Local::now()),
///     FileRecord::new("/tmp/b.mp3", 1, Local::now()),
/// ];
/// let grouping = plan(records, Strategy::ByType, vec!["My Images".into(), "Other".into()], 1);
/// assert_eq!(grouping.get("My Images").map(|g| g.files.len()), Some(1));
/// assert_eq!(grouping.get("Other").map(|g| g.files.len()), Some(1));
/// ```
pub fn plan(
    records: Vec<FileRecord>,
    strategy: Strategy,
    folders: Vec<String>,
    min_items_per_folder: usize,
) -> Grouping {
    let resolver = FolderResolver::new(folders, strategy);
    let mut grouping = Grouping::build(records, &resolver);
    grouping.merge_small_groups(min_items_per_folder);
    grouping
}

/// Derives destination folder names from the files themselves.
///
/// Size bands are fixed, so sorting by size always yields the three band
/// names. Other strategies keep each raw label seen at least `min_items`
/// times, in first-seen order. "Other" is always appended last.
pub fn auto_folder_names(
    records: &[FileRecord],
    strategy: Strategy,
    min_items: usize,
) -> Vec<String> {
    let mut names: Vec<String> = match strategy {
        Strategy::BySize => SizeBand::ALL
            .iter()
            .map(|band| band.label().to_string())
            .collect(),
        Strategy::ByType | Strategy::ByDate => {
            let mut counts: Vec<(String, usize)> = Vec::new();
            for record in records {
                let label = classifier::classify(strategy, record);
                match counts.iter_mut().find(|(seen, _)| *seen == label) {
                    Some((_, count)) => *count += 1,
                    None => counts.push((label, 1)),
                }
            }
            counts
                .into_iter()
                .filter(|(_, count)| *count >= min_items)
                .map(|(label, _)| label)
                .collect()
        }
    };
    names.push(OTHER_GROUP.to_string());
    names
}
