//! Disclaimer consent.
//!
//! # Data Flow
//! ```text
//! ConsentStore::load (memory or JSON file)
//!     → gate.rs (pick modal or main app)
//!     → agree / cancel
//!     → ConsentStore::save (whole state written at once)
//! ```
//!
//! # Design Decisions
//! - Rendering is left to the host; the gate only reports what to show
//! - State is a single `{agreed, dontShowAgain}` record, never partially updated

pub mod gate;
pub mod state;
pub mod store;

pub use gate::{CancelOutcome, ConsentGate, GateView};
pub use state::{ConsentError, DisclaimerState};
pub use store::{ConsentStore, FileConsentStore, MemoryConsentStore};
