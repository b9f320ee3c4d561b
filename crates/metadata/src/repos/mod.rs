//! Repository traits for metadata operations.

pub mod authors;
pub mod books;

pub use authors::AuthorRepo;
pub use books::BookRepo;
