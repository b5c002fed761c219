//! Decoder for JSON recordings: `[{"Key": 0, "Value": 142.5}, ...]`.

use crate::decode::decoder::Decoder;
use crate::error::{CtgError, Result};
use crate::signal::Recording;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct Record {
    #[serde(rename = "Key")]
    key: f64,
    #[serde(rename = "Value")]
    value: f64,
}

/// Decoder for JSON arrays of `Key`/`Value` records.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecoder;

impl Decoder for JsonDecoder {
    fn read(&self, path: &Path) -> Result<Option<Recording>> {
        let reader = BufReader::new(File::open(path)?);
        let records: Vec<Record> =
            serde_json::from_reader(reader).map_err(|e| CtgError::Decode {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        if records.is_empty() {
            return Ok(None);
        }
        Ok(Some(Recording::from_points(
            records.into_iter().map(|r| (r.key, r.value)),
        )))
    }

    fn name(&self) -> &str {
        "json"
    }
}
