use std::path::{Path, PathBuf};

pub const METADATA_FILE: &str = "project.json";
pub const BODY_FILE: &str = "content.md";

/// Site-relative prefix every `contentUri` is built from, independent of where
/// the content root lives on disk.
pub const CONTENT_URI_PREFIX: &str = "content/projects";

pub fn expected_content_uri(slug: &str) -> String {
    format!("{CONTENT_URI_PREFIX}/{slug}/{BODY_FILE}")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    pub dir: PathBuf,
    pub metadata_file: PathBuf,
    pub body_file: PathBuf,
}

pub fn project_paths(root: &Path, dir_name: &str) -> ProjectPaths {
    let dir = root.join(dir_name);
    ProjectPaths {
        metadata_file: dir.join(METADATA_FILE),
        body_file: dir.join(BODY_FILE),
        dir,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_uri_is_derived_from_slug() {
        assert_eq!(
            expected_content_uri("tide-clock"),
            "content/projects/tide-clock/content.md"
        );
    }

    #[test]
    fn project_paths_join_under_root() {
        let got = project_paths(Path::new("/site/content/projects"), "alpha");
        assert_eq!(got.dir, PathBuf::from("/site/content/projects/alpha"));
        assert_eq!(
            got.metadata_file,
            PathBuf::from("/site/content/projects/alpha/project.json")
        );
        assert_eq!(
            got.body_file,
            PathBuf::from("/site/content/projects/alpha/content.md")
        );
    }
}
