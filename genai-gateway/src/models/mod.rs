//! Domain models for the gateway.

pub mod modality;
pub mod request;

pub use modality::Modality;
pub use request::{EncodedPayload, ModelRequest, Part};
