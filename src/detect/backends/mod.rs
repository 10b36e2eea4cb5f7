//! Built-in adapters: a scripted stub and a brightness heuristic. Real
//! model-backed adapters live in the application layer.

mod luma;
mod stub;

pub use luma::{LumaBlobAdapter, DEFAULT_LUMA_THRESHOLD};
pub use stub::{StubAdapter, StubResponse};
