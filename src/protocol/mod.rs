//! Message types and codec seams.
//!
//! - [`WireMessage`] — version-aware binary codec for the internal channel
//! - [`DocMessage`] — stable JSON codec for the external channel
//!
//! ## Field Gate Pattern
//!
//! Messages that grew fields across releases stay interoperable with older
//! peers through a **field gate** per late field. The pattern:
//!
//! 1. The message declares a [`FieldGate`](crate::version::FieldGate) const
//!    naming the field and the release that introduced it.
//! 2. `encode()` writes the field only when `gate.on_wire(version)` holds for
//!    the negotiated version.
//! 3. `decode()` mirrors the exact same check and substitutes the field's
//!    absent default below the threshold. A short read is never the signal —
//!    any byte the gate admits that is missing or malformed is a hard error.
//! 4. The document form ignores gates entirely: the external contract always
//!    carries every field, with explicit `null` for absent values.
//!
//! Reference: [`ack::CreateIndexResponse`].

pub mod ack;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{DocumentError, Result};
use crate::version::ProtocolVersion;

/// Version-aware binary codec for the internal node-to-node channel.
///
/// The negotiated version is a per-call input: codecs hold no state, and the
/// same value may be encoded under different versions concurrently.
pub trait WireMessage: Sized {
    /// Serialize under the negotiated `version`.
    ///
    /// Fails without emitting anything if a field cannot be represented.
    fn encode(&self, version: ProtocolVersion) -> Result<Vec<u8>>;

    /// Deserialize a payload written by a peer under the same negotiated
    /// `version`.
    fn decode(payload: &[u8], version: ProtocolVersion) -> Result<Self>;
}

/// Stable JSON codec for the external API channel.
///
/// Never version-gated: the document shape is the outward-facing contract and
/// stays identical across releases.
pub trait DocMessage: Serialize + DeserializeOwned {
    /// Render the document form: every field present, absent values as
    /// explicit `null`.
    fn to_document(&self) -> std::result::Result<String, DocumentError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a document. Keys may arrive in any order; unknown keys are
    /// ignored; a missing required key is a fatal error.
    fn from_document(doc: &str) -> std::result::Result<Self, DocumentError> {
        Ok(serde_json::from_str(doc)?)
    }
}
