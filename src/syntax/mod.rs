pub mod types;

pub use types::{FlowData, FlowEdge};
