//! Search backend implementations.

#[cfg(feature = "elasticsearch")]
pub mod elasticsearch;
#[cfg(feature = "memory")]
pub mod memory;

#[cfg(feature = "elasticsearch")]
pub use self::elasticsearch::ElasticsearchBackend;
#[cfg(feature = "memory")]
pub use self::memory::MemoryBackend;
