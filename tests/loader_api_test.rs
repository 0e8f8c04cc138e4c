use folio_content::content::config::FolioConfig;
use folio_content::content::{
    CacheState, default_cache, default_cache_with, invalidate_cache, load_dataset,
    load_published_projects,
};
use serde_json::json;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::tempdir;

fn write_project(root: &Path, slug: &str) {
    let dir = root.join(slug);
    fs::create_dir_all(&dir).expect("mkdir project");
    let record = json!({
        "id": format!("prj-{slug}"),
        "slug": slug,
        "title": format!("Project {slug}"),
        "summary": "A thing I built.",
        "status": "published",
        "createdAt": "2024-01-01T00:00:00Z",
        "updatedAt": "2024-06-01T00:00:00Z",
        "contentUri": format!("content/projects/{slug}/content.md"),
    });
    fs::write(
        dir.join("project.json"),
        serde_json::to_string_pretty(&record).expect("serialize"),
    )
    .expect("write project.json");
    fs::write(dir.join("content.md"), format!("# {slug}\n")).expect("write content.md");
}

// The default cache is process-wide, so this file holds a single test.
#[test]
fn process_cache_memoizes_until_invalidated() {
    let tmp = tempdir().expect("tempdir");
    let root = tmp.path().join("content/projects");
    write_project(&root, "alpha");

    let mut cfg = FolioConfig::default();
    cfg.content.root = root.clone();
    let cache = default_cache_with(&cfg);
    assert_eq!(cache.state(), CacheState::Uninitialized);
    assert!(std::ptr::eq(cache, default_cache().expect("default cache")));

    let published = load_published_projects(false).expect("published");
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].slug, "alpha");
    assert_eq!(published[0].body.as_deref(), Some("# alpha\n"));

    write_project(&root, "beta");
    let first = load_dataset(false).expect("first");
    let second = load_dataset(false).expect("second");
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.published.len(), 1);

    invalidate_cache();
    assert_eq!(cache.state(), CacheState::Invalidated);

    let rebuilt = load_dataset(false).expect("rebuilt");
    assert!(!Arc::ptr_eq(&first, &rebuilt));
    let slugs = rebuilt
        .published
        .iter()
        .map(|p| p.slug.as_str())
        .collect::<Vec<_>>();
    assert_eq!(slugs, vec!["alpha", "beta"]);
    assert_eq!(load_published_projects(false).expect("published").len(), 2);
}
