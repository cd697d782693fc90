use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::model::Snapshot;

/// Version written into every persisted envelope.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EnvelopeRef<'a> {
    schema_version: u32,
    content: &'a Snapshot,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Envelope {
    schema_version: u32,
    content: Value,
}

/// Outcome of decoding a persisted value.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    Current(Snapshot),
    /// The value used an older layout and was upgraded while decoding.
    Upgraded { from: u32, snapshot: Snapshot },
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("malformed snapshot: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("unsupported schema version {0} (expected {SCHEMA_VERSION})")]
    UnsupportedVersion(u32),
}

pub fn encode(snapshot: &Snapshot) -> Result<String, serde_json::Error> {
    serde_json::to_string(&EnvelopeRef {
        schema_version: SCHEMA_VERSION,
        content: snapshot,
    })
}

/// Decode a persisted value.
///
/// Values without a `schemaVersion` tag are the version 0 layout: a bare
/// snapshot object. They are upgraded by wrapping.
pub fn decode(raw: &str) -> Result<Decoded, DecodeError> {
    let value: Value = serde_json::from_str(raw)?;

    if value.get("schemaVersion").is_none() {
        let snapshot = serde_json::from_value(value)?;
        return Ok(Decoded::Upgraded { from: 0, snapshot });
    }

    let envelope: Envelope = serde_json::from_value(value)?;
    match envelope.schema_version {
        SCHEMA_VERSION => Ok(Decoded::Current(serde_json::from_value(envelope.content)?)),
        other => Err(DecodeError::UnsupportedVersion(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::bundled_default;

    #[test]
    fn encoded_value_carries_schema_version() {
        let raw = encode(&bundled_default()).unwrap();
        let value: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["schemaVersion"], SCHEMA_VERSION);
        assert_eq!(value["content"]["settings"]["siteName"], "Willow Rune Press");
    }

    #[test]
    fn decodes_current_envelope() {
        let raw = encode(&bundled_default()).unwrap();
        assert_eq!(decode(&raw).unwrap(), Decoded::Current(bundled_default()));
    }

    #[test]
    fn bare_snapshot_is_upgraded_from_version_zero() {
        let raw = serde_json::to_string(&bundled_default()).unwrap();
        match decode(&raw).unwrap() {
            Decoded::Upgraded { from, snapshot } => {
                assert_eq!(from, 0);
                assert_eq!(snapshot, bundled_default());
            }
            other => panic!("expected upgrade, got {other:?}"),
        }
    }

    #[test]
    fn future_version_is_rejected() {
        let raw = r#"{"schemaVersion": 7, "content": {}}"#;
        assert!(matches!(
            decode(raw),
            Err(DecodeError::UnsupportedVersion(7))
        ));
    }

    #[test]
    fn garbage_is_malformed() {
        assert!(matches!(decode("{not json"), Err(DecodeError::Malformed(_))));
        assert!(matches!(
            decode(r#"{"books": 3}"#),
            Err(DecodeError::Malformed(_))
        ));
    }
}
