//! Conformance harness for versioned dual-format messages.
//!
//! Any message type implementing [`Conformance`] gets the full law suite for
//! free: binary round-trips under every negotiated version, document
//! round-trips, equality/hash consistency, and cross-version compatibility.
//! The checks are ordinary functions driven by a seeded [`StdRng`], so a
//! failing run reproduces exactly from its seed.
//!
//! Typical use, from a message type's test module:
//!
//! ```ignore
//! #[test]
//! fn conformance() {
//!     harness::run_all::<CreateIndexResponse>(0x1DE4);
//! }
//! ```

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::protocol::{DocMessage, WireMessage};
use crate::version::ProtocolVersion;

/// Instances generated per law check by [`run_all`].
pub const DEFAULT_RUNS: usize = 20;

/// A message type the harness can verify.
///
/// Implementors supply instance generation and mutation; the codecs come in
/// through the [`WireMessage`] and [`DocMessage`] seams.
pub trait Conformance: WireMessage + DocMessage + Clone + Eq + Hash + fmt::Debug {
    /// A random instance satisfying the type's own invariants.
    fn random(rng: &mut StdRng) -> Self;

    /// A value guaranteed unequal to `self`, still satisfying the type's
    /// invariants.
    fn mutate(&self, rng: &mut StdRng) -> Self;

    /// The value a peer negotiating `version` reconstructs from this value's
    /// wire form.
    ///
    /// Identity by default. Types with gated fields clear every field whose
    /// gate is closed below `version`.
    fn downgraded(&self, _version: ProtocolVersion) -> Self {
        self.clone()
    }
}

/// Random alphanumeric identifier of `min..=max` characters.
pub fn random_name(rng: &mut StdRng, min: usize, max: usize) -> String {
    let len = rng.gen_range(min..=max);
    (0..len).map(|_| char::from(rng.sample(Alphanumeric))).collect()
}

/// A random entry from the known release table.
pub fn random_version(rng: &mut StdRng) -> ProtocolVersion {
    ProtocolVersion::RELEASES[rng.gen_range(0..ProtocolVersion::RELEASES.len())]
}

// ---------------------------------------------------------------------------
// Law checks
// ---------------------------------------------------------------------------

/// Binary round-trip: encode then decode under one random negotiated version
/// equals the original, modulo fields gated below that version.
pub fn wire_round_trips<T: Conformance>(rng: &mut StdRng, runs: usize) {
    for _ in 0..runs {
        let original = T::random(rng);
        let version = random_version(rng);
        let wire = encode_ok(&original, version);
        let decoded = decode_ok::<T>(&wire, version);
        assert_eq!(
            decoded,
            original.downgraded(version),
            "wire round-trip at {version} changed the value (original {original:?})"
        );
    }
}

/// Document round-trip: encode to JSON and parse back, exact equality.
pub fn document_round_trips<T: Conformance>(rng: &mut StdRng, runs: usize) {
    for _ in 0..runs {
        let original = T::random(rng);
        let doc = original
            .to_document()
            .unwrap_or_else(|e| panic!("document encode failed for {original:?}: {e}"));
        let parsed = T::from_document(&doc)
            .unwrap_or_else(|e| panic!("document parse failed for {doc}: {e}"));
        assert_eq!(parsed, original, "document round-trip changed the value ({doc})");
    }
}

/// Equality and hash laws: mutation produces an unequal value; independent
/// decodes of the same bytes are equal and hash equal; hashing is stable.
pub fn equality_laws<T: Conformance>(rng: &mut StdRng, runs: usize) {
    for _ in 0..runs {
        let original = T::random(rng);
        let mutated = original.mutate(rng);
        assert_ne!(mutated, original, "mutate returned an equal value");

        let version = random_version(rng);
        let wire = encode_ok(&original, version);
        let first = decode_ok::<T>(&wire, version);
        let second = decode_ok::<T>(&wire, version);
        assert_eq!(first, second, "two decodes of the same bytes disagree");
        assert_eq!(
            hash_of(&first),
            hash_of(&second),
            "equal decoded values hash differently"
        );
        assert_eq!(hash_of(&first), hash_of(&first), "hash unstable across evaluations");
    }
}

/// Cross-version compatibility: at every known release, decode reproduces
/// exactly what [`Conformance::downgraded`] predicts, and downgrading is
/// idempotent.
pub fn cross_version_compat<T: Conformance>(rng: &mut StdRng, runs: usize) {
    for &version in &ProtocolVersion::RELEASES {
        for _ in 0..runs {
            let original = T::random(rng);
            let expected = original.downgraded(version);
            let wire = encode_ok(&original, version);
            let decoded = decode_ok::<T>(&wire, version);
            assert_eq!(
                decoded, expected,
                "cross-version decode at {version} disagrees with downgraded() \
                 (original {original:?})"
            );
            assert_eq!(
                expected.downgraded(version),
                expected,
                "downgraded() not idempotent at {version}"
            );
        }
    }
}

/// Run every law check with [`DEFAULT_RUNS`] instances each, from one seed.
pub fn run_all<T: Conformance>(seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    wire_round_trips::<T>(&mut rng, DEFAULT_RUNS);
    document_round_trips::<T>(&mut rng, DEFAULT_RUNS);
    equality_laws::<T>(&mut rng, DEFAULT_RUNS);
    cross_version_compat::<T>(&mut rng, DEFAULT_RUNS);
}

// ---------------------------------------------------------------------------
// Internal
// ---------------------------------------------------------------------------

fn encode_ok<T: Conformance>(value: &T, version: ProtocolVersion) -> Vec<u8> {
    value
        .encode(version)
        .unwrap_or_else(|e| panic!("wire encode failed at {version} for {value:?}: {e}"))
}

fn decode_ok<T: Conformance>(wire: &[u8], version: ProtocolVersion) -> T {
    T::decode(wire, version)
        .unwrap_or_else(|e| panic!("wire decode failed at {version} for {wire:02X?}: {e}"))
}

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    use crate::codec::{self, WireReader};
    use crate::error::Result;

    /// Minimal well-behaved message for exercising the harness itself.
    #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
    struct Toggle {
        on: bool,
    }

    impl WireMessage for Toggle {
        fn encode(&self, _version: ProtocolVersion) -> Result<Vec<u8>> {
            let mut buf = Vec::with_capacity(1);
            codec::write_bool(&mut buf, self.on);
            Ok(buf)
        }

        fn decode(payload: &[u8], _version: ProtocolVersion) -> Result<Self> {
            let mut r = WireReader::new("Toggle", payload);
            let on = r.read_bool("on")?;
            r.finish()?;
            Ok(Self { on })
        }
    }

    impl DocMessage for Toggle {}

    impl Conformance for Toggle {
        fn random(rng: &mut StdRng) -> Self {
            Self { on: rng.gen_bool(0.5) }
        }

        fn mutate(&self, _rng: &mut StdRng) -> Self {
            Self { on: !self.on }
        }
    }

    /// Broken on purpose: mutate hands back the value unchanged.
    #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
    struct StuckMutate {
        on: bool,
    }

    impl WireMessage for StuckMutate {
        fn encode(&self, version: ProtocolVersion) -> Result<Vec<u8>> {
            Toggle { on: self.on }.encode(version)
        }

        fn decode(payload: &[u8], version: ProtocolVersion) -> Result<Self> {
            Toggle::decode(payload, version).map(|t| Self { on: t.on })
        }
    }

    impl DocMessage for StuckMutate {}

    impl Conformance for StuckMutate {
        fn random(rng: &mut StdRng) -> Self {
            Self { on: rng.gen_bool(0.5) }
        }

        fn mutate(&self, _rng: &mut StdRng) -> Self {
            self.clone()
        }
    }

    /// Broken on purpose: gates `note` on 2.0.0 in the codec but never
    /// declares it, so the default identity `downgraded()` lies about what an
    /// old peer reconstructs.
    #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
    struct UndeclaredGate {
        on: bool,
        note: Option<String>,
    }

    impl WireMessage for UndeclaredGate {
        fn encode(&self, version: ProtocolVersion) -> Result<Vec<u8>> {
            let mut buf = Vec::new();
            codec::write_bool(&mut buf, self.on);
            if version >= ProtocolVersion::V2_0_0 {
                codec::write_opt_str(&mut buf, "note", self.note.as_deref())?;
            }
            Ok(buf)
        }

        fn decode(payload: &[u8], version: ProtocolVersion) -> Result<Self> {
            let mut r = WireReader::new("UndeclaredGate", payload);
            let on = r.read_bool("on")?;
            let note = if version >= ProtocolVersion::V2_0_0 {
                r.read_opt_str("note")?
            } else {
                None
            };
            r.finish()?;
            Ok(Self { on, note })
        }
    }

    impl DocMessage for UndeclaredGate {}

    impl Conformance for UndeclaredGate {
        fn random(rng: &mut StdRng) -> Self {
            Self {
                on: rng.gen_bool(0.5),
                note: Some(random_name(rng, 3, 6)),
            }
        }

        fn mutate(&self, _rng: &mut StdRng) -> Self {
            Self {
                on: !self.on,
                note: self.note.clone(),
            }
        }
    }

    #[test]
    fn well_behaved_type_passes() {
        run_all::<Toggle>(42);
    }

    #[test]
    #[should_panic(expected = "mutate returned an equal value")]
    fn identity_mutation_is_caught() {
        let mut rng = StdRng::seed_from_u64(7);
        equality_laws::<StuckMutate>(&mut rng, 1);
    }

    #[test]
    #[should_panic(expected = "cross-version decode")]
    fn undeclared_gate_is_caught() {
        let mut rng = StdRng::seed_from_u64(7);
        cross_version_compat::<UndeclaredGate>(&mut rng, 1);
    }

    #[test]
    fn random_version_stays_in_the_release_table() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            assert!(ProtocolVersion::RELEASES.contains(&random_version(&mut rng)));
        }
    }
}
