pub mod dates;
pub mod metrics;
pub mod places;

// Model crate: wire shapes and small pure primitives only.
pub use dates::*;
pub use metrics::*;
pub use places::*;
