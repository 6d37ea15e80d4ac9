pub mod codec;
pub mod error;
pub mod harness;
pub mod protocol;
pub mod version;

pub use error::{DocumentError, Result, WireError};
pub use harness::Conformance;
pub use protocol::ack::{AckResponse, CreateIndexResponse};
pub use protocol::{DocMessage, WireMessage};
pub use version::{FieldGate, ProtocolVersion};
