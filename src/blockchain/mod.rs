pub mod bridge;
pub mod registry;

pub use registry::{Chain, ChainRegistry};
