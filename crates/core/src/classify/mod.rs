//! Account classification.
//!
//! Maps group names to one of four natural classes. Each open company owns
//! its own [`AccountClassifier`]; there is no global registry.

pub mod classifier;
pub mod error;
pub mod groups;

pub use classifier::{AccountClassifier, ClassSource, Classification};
pub use error::ClassifierError;
pub use groups::{BUILT_IN_GROUPS, FALLBACK_CLASS, NaturalClass, names};
