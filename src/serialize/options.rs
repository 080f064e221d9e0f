//! Traversal limits for the serializer.

use serde::{Deserialize, Serialize};

pub const DEFAULT_DEPTH: usize = 8;
pub const DEFAULT_MAX_KEYS: usize = 80;
pub const DEFAULT_MAX_ARRAY_LENGTH: usize = 80;
pub const DEFAULT_MAX_STRING_LENGTH: usize = 4000;

/// Bounds applied while converting a value into a [`LogValue`](super::LogValue).
///
/// Deserializes from a partial table: missing fields take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SerializeOptions {
    /// Nesting levels descended before composites become placeholders.
    pub depth: usize,

    /// Fields kept per object, entries kept per map.
    pub max_keys: usize,

    /// Elements kept per array or set.
    pub max_array_length: usize,

    /// Characters kept per string (including the truncation marker).
    pub max_string_length: usize,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            max_keys: DEFAULT_MAX_KEYS,
            max_array_length: DEFAULT_MAX_ARRAY_LENGTH,
            max_string_length: DEFAULT_MAX_STRING_LENGTH,
        }
    }
}

impl SerializeOptions {
    pub const fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    pub const fn with_max_keys(mut self, max_keys: usize) -> Self {
        self.max_keys = max_keys;
        self
    }

    pub const fn with_max_array_length(mut self, max_array_length: usize) -> Self {
        self.max_array_length = max_array_length;
        self
    }

    pub const fn with_max_string_length(mut self, max_string_length: usize) -> Self {
        self.max_string_length = max_string_length;
        self
    }
}
