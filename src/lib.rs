pub mod analysis_context;
pub mod components;
pub mod data_loader;
pub mod error;
pub mod export;
pub mod graph;
pub mod pipeline;
pub mod report;
pub mod similarity;
pub mod util;

pub use analysis_context::*;
pub use components::*;
pub use data_loader::{load_records, AttributeValue, LoadOutcome, PlayerRecord};
pub use error::*;
pub use export::*;
pub use graph::*;
pub use pipeline::*;
pub use similarity::*;
