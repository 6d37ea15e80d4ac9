//! Protocol version tokens and per-field wire gates.
//!
//! Peers negotiate a [`ProtocolVersion`] out of band (transport concern) and
//! pass it to every binary encode/decode call. Fields added to a message after
//! its first release are declared with a [`FieldGate`] naming the release that
//! introduced them; both codec paths consult the gate, so encoder and decoder
//! can never disagree about the wire shape.
//!
//! | Release | Wire changes |
//! |---------|--------------|
//! | 1.0.0   | Initial format |
//! | 1.4.0   | No layout changes |
//! | 1.6.2   | No layout changes |
//! | 2.0.0   | `index` added to the create ack |
//! | 2.1.0   | No layout changes |

use std::fmt;

/// A negotiated wire-format revision.
///
/// Opaque ordered token: the codec only ever compares it against a gate's
/// threshold. The numeric id packs `major.minor.patch` so that release order
/// and numeric order coincide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProtocolVersion(u32);

impl ProtocolVersion {
    pub const V1_0_0: Self = Self::from_parts(1, 0, 0);
    pub const V1_4_0: Self = Self::from_parts(1, 4, 0);
    pub const V1_6_2: Self = Self::from_parts(1, 6, 2);
    pub const V2_0_0: Self = Self::from_parts(2, 0, 0);
    pub const V2_1_0: Self = Self::from_parts(2, 1, 0);

    /// Newest revision this build speaks.
    pub const CURRENT: Self = Self::V2_1_0;

    /// Oldest revision this build still interoperates with.
    pub const MIN_COMPAT: Self = Self::V1_0_0;

    /// Known releases, oldest first. The conformance harness samples
    /// negotiated versions from this table.
    pub const RELEASES: [Self; 5] = [
        Self::V1_0_0,
        Self::V1_4_0,
        Self::V1_6_2,
        Self::V2_0_0,
        Self::V2_1_0,
    ];

    pub const fn from_parts(major: u8, minor: u8, patch: u8) -> Self {
        Self(major as u32 * 10_000 + minor as u32 * 100 + patch as u32)
    }

    /// Packed numeric id (`major * 10_000 + minor * 100 + patch`).
    pub const fn id(self) -> u32 {
        self.0
    }

    pub const fn major(self) -> u8 {
        (self.0 / 10_000) as u8
    }

    pub const fn minor(self) -> u8 {
        (self.0 / 100 % 100) as u8
    }

    pub const fn patch(self) -> u8 {
        (self.0 % 100) as u8
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major(), self.minor(), self.patch())
    }
}

/// Minimum-version entry for a single wire field.
///
/// Declared as a `const` next to the message it belongs to, e.g.
/// `FieldGate::new("index", ProtocolVersion::V2_0_0)`. Encode writes the field
/// only when [`FieldGate::on_wire`] holds for the negotiated version; decode
/// mirrors the same check and substitutes the field's absent default below
/// the threshold.
#[derive(Debug, Clone, Copy)]
pub struct FieldGate {
    /// Field name, for diagnostics.
    pub field: &'static str,
    /// Release that introduced the field.
    pub since: ProtocolVersion,
}

impl FieldGate {
    pub const fn new(field: &'static str, since: ProtocolVersion) -> Self {
        Self { field, since }
    }

    /// Whether the gated field is present on the wire at `negotiated`.
    pub fn on_wire(self, negotiated: ProtocolVersion) -> bool {
        negotiated >= self.since
    }
}
