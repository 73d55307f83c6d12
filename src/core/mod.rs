//! Fund graph model and exposure resolution

pub mod catalog;
pub mod config;
pub mod exposure;
pub mod graph;
pub mod log;
pub mod memo;
pub mod resolver;

// Re-export main types for cleaner imports
pub use catalog::{FundCatalog, FundRecord, HoldingRecord};
pub use exposure::{ExposureError, ExposureMap};
pub use graph::{Dag, Holding, Investment, NodeId};
pub use memo::{MemoCache, SharedMemoCache};
pub use resolver::{Strategy, resolve};
