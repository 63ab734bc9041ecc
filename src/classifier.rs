//! File classification for the three sorting strategies.
//!
//! This module turns a [`FileRecord`] into a canonical label: a type category
//! (e.g. "images"), a size band (e.g. "Large Files") or a date token
//! (e.g. "2024-03"). Labels are later matched against destination folder
//! names by the [`FolderResolver`].
//!
//! # Examples
//!
//! ```
//! use dirsort::classifier::{SizeBand, TypeCategory, type_label};
//!
//! assert_eq!(TypeCategory::from_extension(".PNG"), Some(TypeCategory::Images));
//! assert_eq!(SizeBand::for_size(10 * 1024 * 1024), SizeBand::Medium);
//! assert_eq!(type_label("build.exe", ".exe"), "executables");
//! ```

use crate::file_record::FileRecord;
use crate::resolver::FolderResolver;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Label given to files whose type cannot be determined at all.
pub const OTHER_LABEL: &str = "other";

const MIB: u64 = 1024 * 1024;

/// How files are sorted into folders. Fixed for a whole run.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum Strategy {
    /// By file extension, falling back to the MIME type.
    #[default]
    #[serde(rename = "type", alias = "filetype")]
    #[value(name = "type", alias = "filetype")]
    ByType,
    /// By year and month of the last modification.
    #[serde(rename = "date")]
    #[value(name = "date")]
    ByDate,
    /// By size band.
    #[serde(rename = "size", alias = "filesize")]
    #[value(name = "size", alias = "filesize")]
    BySize,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::ByType => "file type",
            Strategy::ByDate => "modification date",
            Strategy::BySize => "file size",
        };
        f.write_str(name)
    }
}

/// Fixed file type categories, in lookup order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCategory {
    Images,
    Documents,
    Audio,
    Video,
    Archives,
    Code,
    Executables,
}

impl TypeCategory {
    /// All categories in the order they are tested.
    pub const ALL: [TypeCategory; 7] = [
        TypeCategory::Images,
        TypeCategory::Documents,
        TypeCategory::Audio,
        TypeCategory::Video,
        TypeCategory::Archives,
        TypeCategory::Code,
        TypeCategory::Executables,
    ];

    /// Returns the label used for this category.
    ///
    /// # Examples
    ///
    /// ```
    /// use dirsort::classifier::TypeCategory;
    ///
    /// assert_eq!(TypeCategory::Images.label(), "images");
    /// assert_eq!(TypeCategory::Video.label(), "video");
    /// ```
    pub fn label(&self) -> &'static str {
        match self {
            TypeCategory::Images => "images",
            TypeCategory::Documents => "documents",
            TypeCategory::Audio => "audio",
            TypeCategory::Video => "video",
            TypeCategory::Archives => "archives",
            TypeCategory::Code => "code",
            TypeCategory::Executables => "executables",
        }
    }

    /// Returns the lowercase extensions, with leading dot, of this category.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            TypeCategory::Images => &[".jpg", ".jpeg", ".png", ".gif", ".bmp", ".tiff", ".webp"],
            TypeCategory::Documents => &[
                ".pdf", ".doc", ".docx", ".txt", ".rtf", ".odt", ".xls", ".xlsx", ".ppt", ".pptx",
            ],
            TypeCategory::Audio => &[".mp3", ".wav", ".aac", ".flac", ".ogg", ".m4a"],
            TypeCategory::Video => &[".mp4", ".avi", ".mov", ".wmv", ".flv", ".mkv", ".webm"],
            TypeCategory::Archives => &[".zip", ".rar", ".7z", ".tar", ".gz", ".bz2"],
            TypeCategory::Code => &[
                ".py", ".js", ".html", ".css", ".java", ".cpp", ".c", ".php", ".rb", ".swift",
                ".go",
            ],
            TypeCategory::Executables => &[".exe", ".msi", ".app", ".dmg"],
        }
    }

    /// Finds the category of an extension given with its leading dot.
    /// The lookup is case-insensitive.
    pub fn from_extension(extension: &str) -> Option<Self> {
        let extension = extension.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| category.extensions().contains(&extension.as_str()))
    }
}

/// Size bands, from largest to smallest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeBand {
    Large,
    Medium,
    Small,
}

impl SizeBand {
    /// All bands in descending threshold order.
    pub const ALL: [SizeBand; 3] = [SizeBand::Large, SizeBand::Medium, SizeBand::Small];

    /// Returns the label used for this band.
    pub fn label(&self) -> &'static str {
        match self {
            SizeBand::Large => "Large Files",
            SizeBand::Medium => "Medium Files",
            SizeBand::Small => "Small Files",
        }
    }

    /// Smallest size in bytes, inclusive, that falls into this band.
    pub fn min_bytes(&self) -> u64 {
        match self {
            SizeBand::Large => 100 * MIB,
            SizeBand::Medium => 10 * MIB,
            SizeBand::Small => 0,
        }
    }

    /// Returns the first band whose lower bound `size` reaches.
    pub fn for_size(size: u64) -> Self {
        Self::ALL
            .into_iter()
            .find(|band| size >= band.min_bytes())
            .unwrap_or(SizeBand::Small)
    }
}

/// Returns the canonical label of `record` under `strategy`.
///
/// No folder matching happens here; for [`Strategy::ByDate`] the label is
/// always `"YYYY-MM"`. Use [`destination`] to get the folder a file goes to.
pub fn classify(strategy: Strategy, record: &FileRecord) -> String {
    match strategy {
        Strategy::ByType => type_label(&record.name, &record.extension),
        Strategy::ByDate => {
            let (year, month) = year_month(&record.modified);
            format!("{year}-{month}")
        }
        Strategy::BySize => SizeBand::for_size(record.size).label().to_string(),
    }
}

/// Returns the type label of a file.
///
/// The extension table is tried first. Unknown extensions fall back to the
/// top-level MIME type guessed from the name ("text", "application", ...),
/// and to [`OTHER_LABEL`] when no MIME type is known.
pub fn type_label(name: &str, extension: &str) -> String {
    if let Some(category) = TypeCategory::from_extension(extension) {
        return category.label().to_string();
    }

    match mime_guess::from_path(name).first() {
        Some(mime) => mime.type_().as_str().to_string(),
        None => OTHER_LABEL.to_string(),
    }
}

/// Four-digit year and zero-padded month of a timestamp.
pub fn year_month(timestamp: &DateTime<Local>) -> (String, String) {
    (
        timestamp.format("%Y").to_string(),
        timestamp.format("%m").to_string(),
    )
}

/// Returns the name of the folder `record` belongs in.
///
/// Type and size labels are resolved directly. Dates first try the bare year,
/// so a folder like "2024" takes every file of that year; then each
/// year/month spelling in turn. A probe counts as a hit when the resolver
/// answers anything other than the probe itself.
pub fn destination(record: &FileRecord, resolver: &FolderResolver) -> String {
    let strategy = resolver.strategy();
    if strategy != Strategy::ByDate {
        return resolver.resolve(&classify(strategy, record)).to_string();
    }

    let (year, month) = year_month(&record.modified);
    let by_year = resolver.resolve(&year);
    if by_year != year {
        return by_year.to_string();
    }

    for probe in date_spellings(&year, &month) {
        let resolved = resolver.resolve(&probe);
        if resolved != probe {
            return resolved.to_string();
        }
    }

    format!("{year}-{month}")
}

/// Year/month spellings probed for a date, in probe order.
fn date_spellings(year: &str, month: &str) -> [String; 8] {
    [
        format!("{year}-{month}"),
        format!("{month}-{year}"),
        format!("{year}/{month}"),
        format!("{month}/{year}"),
        format!("{year}_{month}"),
        format!("{month}_{year}"),
        format!("{year}.{month}"),
        format!("{month}.{year}"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashSet;

    fn record_at(name: &str, year: i32, month: u32) -> FileRecord {
        let modified = Local
            .with_ymd_and_hms(year, month, 15, 12, 0, 0)
            .single()
            .expect("valid local time");
        FileRecord::new(format!("/tmp/{name}"), 1, modified)
    }

    fn record_of_size(size: u64) -> FileRecord {
        FileRecord::new("/tmp/blob.bin", size, Local::now())
    }

    fn resolver(folders: &[&str], strategy: Strategy) -> FolderResolver {
        FolderResolver::new(folders.iter().map(|f| f.to_string()).collect(), strategy)
    }

    #[test]
    fn test_type_table_has_no_duplicate_extensions() {
        let mut seen = HashSet::new();
        for category in TypeCategory::ALL {
            for ext in category.extensions() {
                assert!(seen.insert(*ext), "{ext} listed twice");
                assert!(ext.starts_with('.'));
                assert_eq!(*ext, ext.to_lowercase());
            }
        }
    }

    #[test]
    fn test_from_extension_is_case_insensitive() {
        assert_eq!(TypeCategory::from_extension(".JPEG"), Some(TypeCategory::Images));
        assert_eq!(TypeCategory::from_extension(".Docx"), Some(TypeCategory::Documents));
        assert_eq!(TypeCategory::from_extension(".7z"), Some(TypeCategory::Archives));
        assert_eq!(TypeCategory::from_extension(".dmg"), Some(TypeCategory::Executables));
        assert_eq!(TypeCategory::from_extension("png"), None);
        assert_eq!(TypeCategory::from_extension(""), None);
    }

    #[test]
    fn test_type_label_uses_table_first() {
        assert_eq!(type_label("song.FLAC", ".flac"), "audio");
        assert_eq!(type_label("index.html", ".html"), "code");
        assert_eq!(type_label("sheet.xlsx", ".xlsx"), "documents");
    }

    #[test]
    fn test_type_label_falls_back_to_mime_type() {
        assert_eq!(type_label("notes.md", ".md"), "text");
        assert_eq!(type_label("data.json", ".json"), "application");
        assert_eq!(type_label("logo.svg", ".svg"), "image");
    }

    #[test]
    fn test_type_label_unknown_is_other() {
        assert_eq!(type_label("Makefile", ""), OTHER_LABEL);
        assert_eq!(type_label("blob.qqzzunknown", ".qqzzunknown"), OTHER_LABEL);
    }

    #[test]
    fn test_size_band_boundaries() {
        assert_eq!(SizeBand::for_size(0), SizeBand::Small);
        assert_eq!(SizeBand::for_size(10_485_759), SizeBand::Small);
        assert_eq!(SizeBand::for_size(10_485_760), SizeBand::Medium);
        assert_eq!(SizeBand::for_size(104_857_599), SizeBand::Medium);
        assert_eq!(SizeBand::for_size(104_857_600), SizeBand::Large);
    }

    #[test]
    fn test_classify_each_strategy() {
        let photo = record_at("photo.jpg", 2024, 3);
        assert_eq!(classify(Strategy::ByType, &photo), "images");
        assert_eq!(classify(Strategy::ByDate, &photo), "2024-03");
        assert_eq!(classify(Strategy::BySize, &photo), "Small Files");
        assert_eq!(
            classify(Strategy::BySize, &record_of_size(200 * MIB)),
            "Large Files"
        );
    }

    #[test]
    fn test_classify_is_idempotent() {
        let record = record_at("clip.mkv", 2023, 11);
        for strategy in [Strategy::ByType, Strategy::ByDate, Strategy::BySize] {
            assert_eq!(classify(strategy, &record), classify(strategy, &record));
        }
    }

    #[test]
    fn test_destination_by_type_uses_resolver() {
        let record = record_at("photo.png", 2024, 1);
        let resolver = resolver(&["My Images", "Docs"], Strategy::ByType);
        assert_eq!(destination(&record, &resolver), "My Images");
    }

    #[test]
    fn test_destination_by_date_prefers_year_folder() {
        let record = record_at("report.pdf", 2024, 3);
        let resolver = resolver(&["2023", "2024"], Strategy::ByDate);
        assert_eq!(destination(&record, &resolver), "2024");
    }

    #[test]
    fn test_destination_by_date_matches_year_month_folder() {
        let record = record_at("report.pdf", 2024, 3);
        let resolver = resolver(&["2023_12", "03-2024", "Other"], Strategy::ByDate);
        assert_eq!(destination(&record, &resolver), "03-2024");
    }

    #[test]
    fn test_destination_by_date_falls_back_to_other_folder() {
        let record = record_at("report.pdf", 2022, 7);
        let resolver = resolver(&["2024", "Other", "2023"], Strategy::ByDate);
        assert_eq!(destination(&record, &resolver), "Other");
    }

    #[test]
    fn test_destination_by_date_without_folders() {
        let record = record_at("report.pdf", 2021, 9);
        let resolver = resolver(&[], Strategy::ByDate);
        assert_eq!(destination(&record, &resolver), "2021-09");
    }

    #[test]
    fn test_strategy_display() {
        assert_eq!(Strategy::ByType.to_string(), "file type");
        assert_eq!(Strategy::BySize.to_string(), "file size");
    }
}
