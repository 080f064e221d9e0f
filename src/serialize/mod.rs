//! Diagnostic value serialization.
//!
//! # Data Flow
//! ```text
//! caller value (Value: scalars, shared composites, host objects)
//!     → walker.rs (classify, enforce depth/width/length budgets, detect cycles)
//!     → LogValue (serde_json::Value: null/bool/number/string/array/object)
//!     → stringify.rs (2-space JSON text, failure envelope on encoder errors)
//! ```
//!
//! # Design Decisions
//! - Output domain is `serde_json::Value` with `preserve_order`, so every
//!   result is encodable and keeps insertion order
//! - Lossy above the configured limits; overflow is reported with string markers
//! - Visited set lives for one top-level call only
//! - No composite lock is held while children or host objects are rendered
//! - Nothing in this module returns an error or panics on caller data

pub mod options;
pub mod stringify;
pub mod value;
pub mod walker;

/// JSON-safe output domain of the serializer.
pub type LogValue = serde_json::Value;

pub use options::SerializeOptions;
pub use stringify::{encode_pretty, safe_stringify};
pub use value::{ArrayRef, ErrorValue, HostObject, MapRef, ObjectRef, SetRef, Value};
pub use walker::{serialize, truncate_string};
