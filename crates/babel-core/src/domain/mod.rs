//! Domain entities - the core business objects.

mod page;
mod post;
mod translation;

pub use page::{DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT, Page, PageRequest, paginate};
pub use post::{NewPost, Post, TITLE_MAX_CHARS};
pub use translation::{TRANSLATION_FAILED, Translation};
