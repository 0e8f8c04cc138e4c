use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use anyhow::Result;

use crate::content::config::{FolioConfig, load_config};
use crate::content::dataset::{BuildOptions, build_dataset};
use crate::content::model::{Dataset, ProjectPublic};
use crate::content::source::{ContentSource, FsSource};
use crate::error::ContentError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    Uninitialized,
    Populated,
    Invalidated,
}

#[derive(Debug)]
struct Slot {
    state: CacheState,
    dataset: Option<Arc<Dataset>>,
    // Bumped on every successful build.
    generation: u64,
}

/// Memoized dataset. Builds are single-flight and a failed build keeps the
/// previous dataset.
pub struct DatasetCache<S> {
    source: S,
    opts: BuildOptions,
    slot: Mutex<Slot>,
    build_lock: Mutex<()>,
}

impl DatasetCache<FsSource> {
    pub fn from_config(cfg: &FolioConfig) -> Self {
        Self::new(
            FsSource::new(cfg.content.root.clone()),
            BuildOptions {
                read_workers: cfg.content.read_workers,
            },
        )
    }
}

impl<S: ContentSource> DatasetCache<S> {
    pub fn new(source: S, opts: BuildOptions) -> Self {
        Self {
            source,
            opts,
            slot: Mutex::new(Slot {
                state: CacheState::Uninitialized,
                dataset: None,
                generation: 0,
            }),
            build_lock: Mutex::new(()),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    fn lock_slot(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> CacheState {
        self.lock_slot().state
    }

    pub fn cached(&self) -> Option<Arc<Dataset>> {
        self.lock_slot().dataset.clone()
    }

    pub fn get(&self, force_reload: bool) -> Result<Arc<Dataset>, ContentError> {
        let seen_generation = {
            let slot = self.lock_slot();
            if !force_reload && let Some(dataset) = &slot.dataset {
                return Ok(Arc::clone(dataset));
            }
            slot.generation
        };

        let _build = self.build_lock.lock().unwrap_or_else(PoisonError::into_inner);
        {
            let slot = self.lock_slot();
            if let Some(dataset) = &slot.dataset
                && (!force_reload || slot.generation != seen_generation)
            {
                tracing::debug!("reusing dataset from concurrent build");
                return Ok(Arc::clone(dataset));
            }
        }

        let dataset = Arc::new(build_dataset(&self.source, &self.opts)?);
        let mut slot = self.lock_slot();
        slot.dataset = Some(Arc::clone(&dataset));
        slot.state = CacheState::Populated;
        slot.generation += 1;
        Ok(dataset)
    }

    pub fn rebuild(&self) -> Result<Arc<Dataset>, ContentError> {
        self.get(true)
    }

    pub fn invalidate(&self) {
        let mut slot = self.lock_slot();
        if slot.dataset.take().is_some() {
            slot.state = CacheState::Invalidated;
            tracing::debug!("content dataset invalidated");
        }
    }

    /// Published projects in listing order, copied out of the cache.
    pub fn published(&self, force_reload: bool) -> Result<Vec<ProjectPublic>, ContentError> {
        Ok(self.get(force_reload)?.published.clone())
    }
}

static DEFAULT_CACHE: OnceLock<DatasetCache<FsSource>> = OnceLock::new();

/// Sets up the process-wide cache from an already loaded config.
///
/// Only the first call configures the cache. Later calls return it unchanged.
pub fn default_cache_with(cfg: &FolioConfig) -> &'static DatasetCache<FsSource> {
    DEFAULT_CACHE.get_or_init(|| DatasetCache::from_config(cfg))
}

/// The process-wide cache, configured from [`load_config`] on first use.
pub fn default_cache() -> Result<&'static DatasetCache<FsSource>> {
    if let Some(cache) = DEFAULT_CACHE.get() {
        return Ok(cache);
    }
    let cfg = load_config()?;
    Ok(default_cache_with(&cfg))
}

pub fn load_dataset(force_reload: bool) -> Result<Arc<Dataset>> {
    Ok(default_cache()?.get(force_reload)?)
}

pub fn load_published_projects(force_reload: bool) -> Result<Vec<ProjectPublic>> {
    Ok(default_cache()?.published(force_reload)?)
}

pub fn invalidate_cache() {
    if let Some(cache) = DEFAULT_CACHE.get() {
        cache.invalidate();
    }
}
