use thiserror::Error;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("cache unavailable: {0}")]
    Unavailable(String),

    #[error("cache command failed: {0}")]
    Command(#[from] bb8_redis::redis::RedisError),
}
