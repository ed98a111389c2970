//! Surface messaging protocol: typed messages and the JSON frame codec.

pub mod codec;
pub mod messages;

pub use codec::{decode_request, encode_response, ProtocolError};
pub use messages::{ConfigResponse, SurfaceRequest};
