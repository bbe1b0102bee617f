/// Persistence layer for posts
///
/// - `post_repo`: the `PostRepository` trait and its PostgreSQL implementation
/// - `in_memory`: ordered process-local store for development and tests
/// - `seed`: loads a JSON fixture into an empty repository at startup
pub mod in_memory;
pub mod post_repo;
pub mod seed;

pub use in_memory::InMemoryPostRepository;
pub use post_repo::{PgPostRepository, PostRepository, SharedPostRepository};
pub use seed::seed_from_file;
