//! Structured payloads embedded in action strings.
//!
//! Values are serialized to JSON and then base64 encoded (URL safe, no
//! padding) so they survive being appended after a `kind:verb:` prefix no
//! matter which characters the original text contains.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub fn encode_payload<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let json = serde_json::to_vec(value)?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

pub fn decode_payload<T: DeserializeOwned>(encoded: &str) -> anyhow::Result<T> {
    let json = URL_SAFE_NO_PAD.decode(encoded)?;
    Ok(serde_json::from_slice(&json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Snippet;

    #[test]
    fn survives_separator_characters() {
        let snippet = Snippet::new("a|b:c", "line one\nline two | three:four");
        let encoded = encode_payload(&snippet).unwrap();
        assert!(!encoded.contains(':'));
        assert!(!encoded.contains('|'));
        let decoded: Snippet = decode_payload(&encoded).unwrap();
        assert_eq!(decoded, snippet);
    }

    #[test]
    fn rejects_garbage() {
        assert!(decode_payload::<Snippet>("not base64!!").is_err());
        let not_json = URL_SAFE_NO_PAD.encode("plain");
        assert!(decode_payload::<Snippet>(&not_json).is_err());
    }
}
