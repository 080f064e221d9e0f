//! Byte buffer to text encoding.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// Standard-alphabet, padded base64 text for `bytes`.
pub fn bytes_to_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}
