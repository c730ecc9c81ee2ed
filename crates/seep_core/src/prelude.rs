//! Convenience re-exports of the most commonly used types.

pub use crate::commit::Commit;
pub use crate::config::{Config, ConfigError, CustomDetector};
pub use crate::detector::{Detector, DetectorSet};
pub use crate::engine::Engine;
pub use crate::entropy::EntropyGate;
pub use crate::error::{DetectorError, SeepError};
pub use crate::finding::Finding;
pub use crate::stopwords::StopwordFilter;
