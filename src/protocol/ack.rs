//! Acknowledgment response messages.

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::codec::{self, WireReader};
use crate::error::Result;
use crate::harness::{Conformance, random_name};
use crate::protocol::{DocMessage, WireMessage};
use crate::version::{FieldGate, ProtocolVersion};

/// Plain operation acknowledgment: did the coordinating node accept the
/// request before its timeout.
///
/// Wire layout (all versions): `[bool acknowledged]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AckResponse {
    pub acknowledged: bool,
}

impl AckResponse {
    pub fn new(acknowledged: bool) -> Self {
        Self { acknowledged }
    }
}

impl WireMessage for AckResponse {
    fn encode(&self, _version: ProtocolVersion) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(1);
        codec::write_bool(&mut buf, self.acknowledged);
        Ok(buf)
    }

    fn decode(payload: &[u8], _version: ProtocolVersion) -> Result<Self> {
        let mut r = WireReader::new("AckResponse", payload);
        let acknowledged = r.read_bool("acknowledged")?;
        r.finish()?;
        Ok(Self { acknowledged })
    }
}

impl DocMessage for AckResponse {}

impl Conformance for AckResponse {
    fn random(rng: &mut StdRng) -> Self {
        Self::new(rng.gen_bool(0.5))
    }

    fn mutate(&self, _rng: &mut StdRng) -> Self {
        Self::new(!self.acknowledged)
    }
}

/// Response to a resource-create operation.
///
/// Carries three facts: the coordinator accepted the operation, every
/// required shard copy confirmed before the timeout, and which index the
/// operation targeted. `shards_acknowledged == true` implies
/// `acknowledged == true`; the type is a thin carrier and does not enforce
/// this — producers are responsible for it.
///
/// Wire layout: `[bool acknowledged][bool shards_acknowledged]` plus, from
/// 2.0.0 on, an optional string `index` ([`Self::INDEX_GATE`]). Decoding
/// under an older negotiated version deterministically yields
/// `index = None` — never a short-read error.
///
/// The document form is not gated: all three keys are always present, with
/// `"index": null` when absent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CreateIndexResponse {
    pub acknowledged: bool,
    pub shards_acknowledged: bool,
    pub index: Option<String>,
}

impl CreateIndexResponse {
    /// `index` joined the wire format in 2.0.0. Older peers neither write
    /// nor expect it.
    pub const INDEX_GATE: FieldGate = FieldGate::new("index", ProtocolVersion::V2_0_0);

    pub fn new(acknowledged: bool, shards_acknowledged: bool, index: Option<String>) -> Self {
        Self {
            acknowledged,
            shards_acknowledged,
            index,
        }
    }
}

impl WireMessage for CreateIndexResponse {
    fn encode(&self, version: ProtocolVersion) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(2);
        codec::write_bool(&mut buf, self.acknowledged);
        codec::write_bool(&mut buf, self.shards_acknowledged);
        if Self::INDEX_GATE.on_wire(version) {
            codec::write_opt_str(&mut buf, "index", self.index.as_deref())?;
        }
        Ok(buf)
    }

    fn decode(payload: &[u8], version: ProtocolVersion) -> Result<Self> {
        let mut r = WireReader::new("CreateIndexResponse", payload);
        let acknowledged = r.read_bool("acknowledged")?;
        let shards_acknowledged = r.read_bool("shards_acknowledged")?;
        let index = if Self::INDEX_GATE.on_wire(version) {
            r.read_opt_str("index")?
        } else {
            None
        };
        r.finish()?;
        Ok(Self {
            acknowledged,
            shards_acknowledged,
            index,
        })
    }
}

impl DocMessage for CreateIndexResponse {}

impl Conformance for CreateIndexResponse {
    fn random(rng: &mut StdRng) -> Self {
        let acknowledged = rng.gen_bool(0.5);
        let shards_acknowledged = acknowledged && rng.gen_bool(0.5);
        let index = rng.gen_ratio(3, 4).then(|| random_name(rng, 5, 10));
        Self::new(acknowledged, shards_acknowledged, index)
    }

    fn mutate(&self, rng: &mut StdRng) -> Self {
        if rng.gen_bool(0.5) {
            if rng.gen_bool(0.5) {
                // Flip acknowledged, re-deriving the dependent flag.
                let acknowledged = !self.acknowledged;
                let shards_acknowledged = acknowledged && self.shards_acknowledged;
                Self::new(acknowledged, shards_acknowledged, self.index.clone())
            } else {
                // Flip shards_acknowledged; true forces acknowledged along.
                let shards_acknowledged = !self.shards_acknowledged;
                let acknowledged = shards_acknowledged || self.acknowledged;
                Self::new(acknowledged, shards_acknowledged, self.index.clone())
            }
        } else {
            let index = match &self.index {
                Some(name) => Some(format!("{name}{}", random_name(rng, 2, 5))),
                None => Some(random_name(rng, 5, 5)),
            };
            Self::new(self.acknowledged, self.shards_acknowledged, index)
        }
    }

    fn downgraded(&self, version: ProtocolVersion) -> Self {
        let mut copy = self.clone();
        if !Self::INDEX_GATE.on_wire(version) {
            copy.index = None;
        }
        copy
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
