//! Application layer - Use cases and orchestration

pub mod list_tags;
pub mod tag_files;

pub use list_tags::{FolderTags, ListTagsService};
pub use tag_files::{FolderReport, FolderStatus, TagFilesService, TagOperation, TagReport};
