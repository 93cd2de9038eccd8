//! Storage collaborator consumed by the aggregation engine
//!
//! The engine only needs `find_all`; the remaining operations complete the
//! per-table repository surface the application layer writes through.

pub mod criteria;
pub mod dataset;
pub mod error;
pub mod memory;
pub mod traits;

pub use criteria::{Criteria, Filter};
pub use dataset::Dataset;
pub use error::{RepositoryError, RepositoryResult};
pub use memory::MemoryRepository;
pub use traits::{Repositories, Repository, Stored};
