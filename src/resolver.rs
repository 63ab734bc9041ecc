//! Matching of canonical labels against destination folder names.
//!
//! Resolution never fails: a label is matched exactly, then loosely, and
//! finally falls back to an "other" folder, the last folder, or the label
//! itself when no folders were given. All comparisons ignore case.
//!
//! # Examples
//!
//! ```
//! use dirsort::classifier::Strategy;
//! use dirsort::resolver::FolderResolver;
//!
//! let folders = vec!["Pictures".to_string(), "Other".to_string()];
//! let resolver = FolderResolver::new(folders, Strategy::ByType);
//! assert_eq!(resolver.resolve("PICTURES"), "Pictures");
//! assert_eq!(resolver.resolve("audio"), "Other");
//! ```

use crate::classifier::{OTHER_LABEL, Strategy};
use regex::Regex;
use std::sync::LazyLock;

static DATE_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-/_.]+").expect("date separator pattern is valid"));

/// Resolves labels to one of an ordered list of destination folders.
#[derive(Debug, Clone)]
pub struct FolderResolver {
    folders: Vec<String>,
    lowercase: Vec<String>,
    strategy: Strategy,
}

impl FolderResolver {
    /// Creates a resolver over `folders`, kept in the given order.
    pub fn new(folders: Vec<String>, strategy: Strategy) -> Self {
        let lowercase = folders.iter().map(|f| f.to_lowercase()).collect();
        Self {
            folders,
            lowercase,
            strategy,
        }
    }

    /// The destination folders, in their original case and order.
    pub fn folders(&self) -> &[String] {
        &self.folders
    }

    /// The strategy that selects the loose matching rule.
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Returns the folder `label` should go to.
    ///
    /// 1. A folder equal to the label, ignoring case.
    /// 2. The first loosely matching folder: [`is_date_match`] for dates,
    ///    substring containment in either direction otherwise.
    /// 3. A folder named "other", else the last folder, else `label` itself.
    pub fn resolve<'a>(&'a self, label: &'a str) -> &'a str {
        let label_lower = label.to_lowercase();

        if let Some(index) = self.position(|folder| folder == label_lower) {
            return &self.folders[index];
        }

        let loose = self.position(|folder| match self.strategy {
            Strategy::ByDate => is_date_match(&label_lower, folder),
            Strategy::ByType | Strategy::BySize => {
                label_lower.contains(folder) || folder.contains(label_lower.as_str())
            }
        });
        if let Some(index) = loose {
            return &self.folders[index];
        }

        if let Some(index) = self.position(|folder| folder == OTHER_LABEL) {
            return &self.folders[index];
        }

        self.folders.last().map(String::as_str).unwrap_or(label)
    }

    fn position(&self, predicate: impl Fn(&str) -> bool) -> Option<usize> {
        self.lowercase.iter().position(|folder| predicate(folder))
    }
}

/// Checks whether a folder name matches a date token such as "2024" or
/// "03_2024".
///
/// The token is split on runs of `-`, `/`, `_` and `.`. With two parts the
/// four-character one is the year (the first part wins a tie); with one
/// part there is no month; any other count never matches. A folder that
/// contains the year anywhere matches. Otherwise, when a month is present,
/// both year and month must appear among the folder's own parts.
///
/// Months are not range-checked.
///
/// # Examples
///
/// ```
/// use dirsort::resolver::is_date_match;
///
/// assert!(is_date_match("2024-03", "Mar_2024"));
/// assert!(is_date_match("2024", "photos 2024"));
/// assert!(!is_date_match("2024-03", "2025"));
/// ```
pub fn is_date_match(date_token: &str, folder_name: &str) -> bool {
    let token = date_token.to_lowercase();
    let folder = folder_name.to_lowercase();

    let parts: Vec<&str> = DATE_SEPARATORS.split(&token).collect();
    let (year, month) = match parts.as_slice() {
        [first, second] if first.chars().count() == 4 => (*first, Some(*second)),
        [first, second] => (*second, Some(*first)),
        [year] => (*year, None),
        _ => return false,
    };

    if folder.contains(year) {
        return true;
    }

    match month {
        Some(month) if !month.is_empty() => {
            let folder_parts: Vec<&str> = DATE_SEPARATORS.split(&folder).collect();
            folder_parts.contains(&year) && folder_parts.contains(&month)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver(folders: &[&str], strategy: Strategy) -> FolderResolver {
        FolderResolver::new(folders.iter().map(|f| f.to_string()).collect(), strategy)
    }

    #[test]
    fn test_exact_match_keeps_folder_case() {
        let resolver = resolver(&["Docs", "IMAGES", "Other"], Strategy::ByType);
        assert_eq!(resolver.resolve("images"), "IMAGES");
    }

    #[test]
    fn test_exact_match_beats_earlier_loose_match() {
        let resolver = resolver(&["my images", "Images"], Strategy::ByType);
        assert_eq!(resolver.resolve("images"), "Images");

        let reversed = self::resolver(&["Images", "my images"], Strategy::ByType);
        assert_eq!(reversed.resolve("images"), "Images");
    }

    #[test]
    fn test_loose_match_in_both_directions() {
        let resolver = resolver(&["Music", "My Documents", "Other"], Strategy::ByType);
        assert_eq!(resolver.resolve("documents"), "My Documents");

        let resolver = self::resolver(&["Large", "Small"], Strategy::BySize);
        assert_eq!(resolver.resolve("Large Files"), "Large");
    }

    #[test]
    fn test_loose_match_takes_first_folder_in_order() {
        let resolver = resolver(&["code snippets", "source code"], Strategy::ByType);
        assert_eq!(resolver.resolve("code"), "code snippets");
    }

    #[test]
    fn test_fallback_prefers_other_folder() {
        let resolver = resolver(&["Photos", "oTHer", "Music"], Strategy::ByType);
        assert_eq!(resolver.resolve("archives"), "oTHer");
    }

    #[test]
    fn test_fallback_to_last_folder() {
        let resolver = resolver(&["Photos", "Music"], Strategy::ByType);
        assert_eq!(resolver.resolve("archives"), "Music");
    }

    #[test]
    fn test_fallback_without_folders_returns_label() {
        let resolver = resolver(&[], Strategy::ByType);
        assert_eq!(resolver.resolve("other"), "other");
        assert_eq!(resolver.resolve("Large Files"), "Large Files");
    }

    #[test]
    fn test_date_strategy_matches_on_year_not_substring() {
        let by_date = resolver(&["24-03", "Other"], Strategy::ByDate);
        assert_eq!(by_date.resolve("2024-03"), "Other");

        let by_type = resolver(&["24-03", "Other"], Strategy::ByType);
        assert_eq!(by_type.resolve("2024-03"), "24-03");

        let by_date = resolver(&["archive 2024-03-extra", "Other"], Strategy::ByDate);
        assert_eq!(by_date.resolve("03-2024"), "archive 2024-03-extra");
        assert_eq!(by_date.resolve("2023"), "Other");
    }

    #[test]
    fn test_is_date_match_year_substring() {
        assert!(is_date_match("2024-03", "Mar_2024"));
        assert!(is_date_match("2024", "2024"));
        assert!(is_date_match("03/2024", "backup-2024"));
        assert!(!is_date_match("2024-03", "2025"));
        assert!(!is_date_match("2024", "2025_03"));
    }

    #[test]
    fn test_is_date_match_order_independent_token() {
        assert!(is_date_match("03_2024", "2024"));
        assert!(is_date_match("2024.03", "fy2024"));
    }

    #[test]
    fn test_is_date_match_rejects_other_part_counts() {
        assert!(!is_date_match("2024-03-15", "2024"));
        assert!(!is_date_match("2024--03--15", "2024"));
    }

    #[test]
    fn test_is_date_match_collapses_separator_runs() {
        assert!(is_date_match("2024-_03", "2024"));
        assert!(!is_date_match("2024-_03", "2023"));
    }

    #[test]
    fn test_is_date_match_is_case_insensitive() {
        assert!(is_date_match("2024", "Q1 2024 TAXES"));
    }
}
