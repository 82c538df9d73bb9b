//! Short-link token decoding.
//!
//! A short link `/x/<token>` carries the page id as a URL-safe base64 token
//! of the id's little-endian bytes with the trailing `A`s and padding
//! stripped.

use base64::Engine;
use base64::alphabet;
use base64::engine::{GeneralPurpose, GeneralPurposeConfig};

use crate::constants::short_link::{DECODED_BYTES, FILLER, PADDED_WIDTH};
use crate::types::{FlowError, Result};

/// Standard alphabet; the last character of a padded token carries spare bits
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// Decode a short-link token into its numeric page id
pub fn decode_short_link(token: &str) -> Result<u64> {
    let width = token.chars().count();
    if width == 0 {
        return Err(FlowError::short_link(token, "empty token"));
    }
    if width > PADDED_WIDTH {
        return Err(FlowError::short_link(
            token,
            format!("longer than {} characters", PADDED_WIDTH),
        ));
    }

    let mut padded: String = token
        .chars()
        .map(|c| match c {
            '-' => '/',
            '_' => '+',
            other => other,
        })
        .collect();
    padded.extend(std::iter::repeat_n(FILLER, PADDED_WIDTH - width));
    padded.push('=');

    let bytes = LENIENT
        .decode(padded.as_bytes())
        .map_err(|e| FlowError::short_link(token, e.to_string()))?;

    let raw: [u8; DECODED_BYTES] = bytes.as_slice().try_into().map_err(|_| {
        FlowError::short_link(
            token,
            format!("decoded to {} bytes, expected {}", bytes.len(), DECODED_BYTES),
        )
    })?;

    Ok(u64::from_le_bytes(raw))
}
