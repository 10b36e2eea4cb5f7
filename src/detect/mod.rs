mod adapter;
mod backends;
pub mod map;
mod nms;
mod result;

pub use adapter::{InferenceAdapter, RawDetection};
pub use backends::{LumaBlobAdapter, StubAdapter, StubResponse, DEFAULT_LUMA_THRESHOLD};
pub use nms::{suppress, DetectionThresholds};
pub use result::Detection;
