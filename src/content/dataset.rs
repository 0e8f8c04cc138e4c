use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::thread;

use chrono::Utc;
use sha2::{Digest, Sha256};

use crate::content::model::{Dataset, ProjectBundle, ProjectPublic, ProjectStatus};
use crate::content::record::RawRecord;
use crate::content::source::ContentSource;
use crate::error::ContentError;

#[derive(Debug, Clone, Copy)]
pub struct BuildOptions {
    pub read_workers: usize,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self { read_workers: 4 }
    }
}

#[derive(Debug)]
struct SourceEntry {
    dir: String,
    metadata: String,
    body: String,
}

/// Loads every project under the source. The first failure aborts the build.
///
/// Records are validated and registered in sorted folder order, so the
/// reported error does not depend on read scheduling.
pub fn build_dataset<S: ContentSource + ?Sized>(
    source: &S,
    opts: &BuildOptions,
) -> Result<Dataset, ContentError> {
    let mut dirs = source.project_dirs()?;
    dirs.sort();
    tracing::debug!(count = dirs.len(), "scanning project directories");

    let entries = read_entries(source, &dirs, opts.read_workers)?;
    let fingerprint = fingerprint(&entries);

    let mut registry = SlugRegistry::default();
    let mut projects = Vec::with_capacity(entries.len());
    for entry in entries {
        let raw = RawRecord::parse(&entry.dir, &entry.metadata)?;
        let bundle = raw.into_bundle(&entry.dir, &entry.body)?;
        registry.register(&bundle)?;
        tracing::debug!(slug = %bundle.slug, status = %bundle.status(), "loaded project");
        projects.push(bundle);
    }

    let redirects = registry.finish();
    let dataset = assemble(projects, redirects, fingerprint);
    tracing::info!(
        published = dataset.published.len(),
        archived = dataset.archived.len(),
        drafts = dataset.drafts.len(),
        redirects = dataset.redirects.len(),
        "content dataset built"
    );
    Ok(dataset)
}

fn read_entry<S: ContentSource + ?Sized>(
    source: &S,
    dir: &str,
) -> Result<SourceEntry, ContentError> {
    Ok(SourceEntry {
        dir: dir.to_string(),
        metadata: source.read_metadata(dir)?,
        body: source.read_body(dir)?,
    })
}

fn read_entries<S: ContentSource + ?Sized>(
    source: &S,
    dirs: &[String],
    workers: usize,
) -> Result<Vec<SourceEntry>, ContentError> {
    if workers <= 1 || dirs.len() <= 1 {
        return dirs.iter().map(|dir| read_entry(source, dir)).collect();
    }

    let chunk = dirs.len().div_ceil(workers);
    thread::scope(|scope| {
        let handles = dirs
            .chunks(chunk)
            .map(|part| {
                scope.spawn(move || {
                    part.iter()
                        .map(|dir| read_entry(source, dir))
                        .collect::<Result<Vec<_>, _>>()
                })
            })
            .collect::<Vec<_>>();

        let mut out = Vec::with_capacity(dirs.len());
        for handle in handles {
            let part = handle
                .join()
                .unwrap_or_else(|panic| std::panic::resume_unwind(panic))?;
            out.extend(part);
        }
        Ok(out)
    })
}

fn fingerprint(entries: &[SourceEntry]) -> String {
    let mut hasher = Sha256::new();
    for entry in entries {
        for part in [&entry.dir, &entry.metadata, &entry.body] {
            hasher.update((part.len() as u64).to_le_bytes());
            hasher.update(part.as_bytes());
        }
    }
    format!("{:x}", hasher.finalize())
}

/// Canonical slugs plus the alias -> slug redirect table for one build pass.
#[derive(Debug, Default)]
struct SlugRegistry {
    slugs: BTreeSet<String>,
    redirects: BTreeMap<String, String>,
}

impl SlugRegistry {
    fn register(&mut self, bundle: &ProjectBundle) -> Result<(), ContentError> {
        let slug = &bundle.slug;
        if !self.slugs.insert(slug.clone()) {
            return Err(ContentError::DuplicateSlug { slug: slug.clone() });
        }

        for alias in &bundle.internal.aliases {
            if alias == slug {
                return Err(ContentError::SelfAlias { slug: slug.clone() });
            }
            match self.redirects.get(alias) {
                Some(existing) if existing != slug => {
                    return Err(ContentError::AliasConflict {
                        alias: alias.clone(),
                        existing: existing.clone(),
                        claimed_by: slug.clone(),
                    });
                }
                Some(_) => {}
                None => {
                    self.redirects.insert(alias.clone(), slug.clone());
                }
            }
        }
        Ok(())
    }

    fn finish(self) -> BTreeMap<String, String> {
        // The router only consults redirects on a miss, so these never fire.
        for (alias, target) in &self.redirects {
            if self.slugs.contains(alias) {
                tracing::warn!(
                    alias = %alias,
                    target = %target,
                    "alias shadows a canonical slug and is unreachable"
                );
            }
        }
        self.redirects
    }
}

fn assemble(
    projects: Vec<ProjectBundle>,
    redirects: BTreeMap<String, String>,
    fingerprint: String,
) -> Dataset {
    let mut published = Vec::new();
    let mut archived = Vec::new();
    let mut drafts = Vec::new();
    for bundle in &projects {
        match bundle.status() {
            ProjectStatus::Published => published.push(bundle.public.clone()),
            ProjectStatus::Archived => archived.push(bundle.public.clone()),
            ProjectStatus::Draft => drafts.push(bundle.clone()),
        }
    }
    published.sort_by(listing_order);
    archived.sort_by(listing_order);

    Dataset {
        projects,
        published,
        archived,
        drafts,
        redirects,
        loaded_at: Utc::now(),
        fingerprint,
    }
}

/// Featured first, then ascending weight, then newest `sortDate`, then slug.
/// Missing weights and dates sort after present ones.
pub fn listing_order(a: &ProjectPublic, b: &ProjectPublic) -> Ordering {
    let featured = |p: &ProjectPublic| p.featured.unwrap_or(false);
    featured(b)
        .cmp(&featured(a))
        .then_with(|| match (a.weight, b.weight) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| match (&a.sort_date, &b.sort_date) {
            (Some(x), Some(y)) => y.cmp(x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| a.slug.cmp(&b.slug))
}
