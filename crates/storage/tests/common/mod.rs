pub mod fixtures;
pub mod mocks;

#[allow(unused_imports)]
pub use fixtures::{chunked, failing_after, seeded_bytes};
#[allow(unused_imports)]
pub use mocks::FailingWriteBackend;
