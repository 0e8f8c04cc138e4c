pub mod cache;
pub mod config;
pub mod dataset;
pub mod model;
pub mod paths;
pub mod record;
pub mod route;
pub mod source;
pub mod validate;

pub use cache::{
    CacheState, DatasetCache, default_cache, default_cache_with, invalidate_cache, load_dataset,
    load_published_projects,
};
pub use dataset::{BuildOptions, build_dataset};
pub use model::{Dataset, ImageRef, ProjectBundle, ProjectInternal, ProjectPublic, ProjectStatus};
pub use route::{Resolution, resolve};
pub use source::{ContentSource, FsSource};
pub use validate::validate;
