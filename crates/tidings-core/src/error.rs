// ── Core error types ──
//
// Failures the state layer can surface to its callers. Store updates
// themselves are infallible; errors only arise at the wire boundary
// (encoding emissions, decoding receptions) and at the transport seam.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Wire errors ──────────────────────────────────────────────────
    #[error("Cannot encode {command} emission: {source}")]
    Encode {
        command: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Cannot decode reception: {source}")]
    Decode {
        /// The offending wire text, truncated for display.
        excerpt: String,
        #[source]
        source: serde_json::Error,
    },

    // ── Transport errors ─────────────────────────────────────────────
    #[error("Transport unavailable: {reason}")]
    Transport { reason: String },

    #[error("Backend channel closed")]
    TransportClosed,
}

const EXCERPT_LEN: usize = 80;

impl CoreError {
    pub(crate) fn decode(raw: &str, source: serde_json::Error) -> Self {
        let excerpt = match raw.char_indices().nth(EXCERPT_LEN) {
            Some((cut, _)) => format!("{}…", &raw[..cut]),
            None => raw.to_owned(),
        };
        Self::Decode { excerpt, source }
    }

    /// Whether the failure happened while decoding inbound data.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn json_error() -> serde_json::Error {
        serde_json::from_str::<u8>("nope").unwrap_err()
    }

    #[test]
    fn decode_excerpt_is_truncated() {
        let raw = "x".repeat(200);
        let err = CoreError::decode(&raw, json_error());
        let CoreError::Decode { excerpt, .. } = err else {
            panic!("expected decode error");
        };
        assert_eq!(excerpt.chars().count(), EXCERPT_LEN + 1);
        assert!(excerpt.ends_with('…'));
    }

    #[test]
    fn short_input_is_kept_whole() {
        let err = CoreError::decode("{}", json_error());
        assert!(err.is_decode());
        assert!(matches!(err, CoreError::Decode { ref excerpt, .. } if excerpt == "{}"));
    }
}
