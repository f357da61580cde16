//! Application services orchestrating ports.

mod posts;

pub use posts::PostService;
