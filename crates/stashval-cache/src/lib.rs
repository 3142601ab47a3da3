pub mod error;
pub mod memory;
pub mod redis;
pub mod store;

pub use error::CacheError;
pub use memory::InMemoryTtlStore;
pub use redis::RedisTtlStore;
pub use store::TtlStore;
