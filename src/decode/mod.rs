//! Recording file decoders.

pub mod decoder;
pub mod dict;
pub mod json;

pub use decoder::{Decoder, MockDecoder};
pub use dict::DictDecoder;
pub use json::JsonDecoder;

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// File format selector used by the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Dict,
    Json,
}

impl Format {
    /// Builds the decoder for this format.
    pub fn decoder(self) -> Arc<dyn Decoder> {
        match self {
            Format::Dict => Arc::new(DictDecoder),
            Format::Json => Arc::new(JsonDecoder),
        }
    }
}
