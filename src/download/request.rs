//! Download request types.

use std::fmt;
use std::path::PathBuf;

/// Selector value meaning "every file in the dataset".
pub const ALL_FILES: &str = "all";

/// Which files of a dataset to download.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FileSelector {
    #[default]
    All,
    Single(String),
    Many(Vec<String>),
}

impl FileSelector {
    /// Selector from a list of keys. An empty list selects everything.
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        if keys.is_empty() {
            FileSelector::All
        } else {
            FileSelector::Many(keys)
        }
    }

    /// Parse user input such as `"1, 2,3"`. Blank input selects everything.
    pub fn parse_list(input: &str) -> Self {
        Self::from_keys(
            input
                .split(',')
                .map(str::trim)
                .filter(|key| !key.is_empty()),
        )
    }

    /// The `fileSn` value sent to the server.
    pub fn resolve(&self) -> String {
        match self {
            FileSelector::All => ALL_FILES.to_string(),
            FileSelector::Single(key) => key.clone(),
            FileSelector::Many(keys) => keys.join(","),
        }
    }
}

impl fmt::Display for FileSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.resolve())
    }
}

/// Everything one pipeline run needs besides the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub dataset_key: String,
    pub file_keys: FileSelector,
    /// Falls back to the client's download directory.
    pub output_dir: Option<PathBuf>,
    pub extract: bool,
    pub show_progress: bool,
}

impl DownloadRequest {
    pub fn new(dataset_key: impl Into<String>) -> Self {
        Self {
            dataset_key: dataset_key.into(),
            file_keys: FileSelector::All,
            output_dir: None,
            extract: true,
            show_progress: true,
        }
    }

    pub fn file_keys(mut self, file_keys: FileSelector) -> Self {
        self.file_keys = file_keys;
        self
    }

    pub fn output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(output_dir.into());
        self
    }

    pub fn extract(mut self, extract: bool) -> Self {
        self.extract = extract;
        self
    }

    pub fn show_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve() {
        assert_eq!(FileSelector::All.resolve(), "all");
        assert_eq!(FileSelector::Single("42".into()).resolve(), "42");
        assert_eq!(
            FileSelector::from_keys(["1", "2", "3"]).resolve(),
            "1,2,3"
        );
    }

    #[test]
    fn test_empty_list_selects_all() {
        assert_eq!(FileSelector::from_keys(Vec::<String>::new()), FileSelector::All);
        assert_eq!(FileSelector::parse_list("  "), FileSelector::All);
    }

    #[test]
    fn test_parse_list_trims() {
        assert_eq!(
            FileSelector::parse_list(" 10, 11 ,,12"),
            FileSelector::Many(vec!["10".into(), "11".into(), "12".into()])
        );
    }

    #[test]
    fn test_request_defaults() {
        let request = DownloadRequest::new("123");
        assert_eq!(request.file_keys, FileSelector::All);
        assert!(request.extract);
        assert!(request.show_progress);
        assert!(request.output_dir.is_none());
    }
}
