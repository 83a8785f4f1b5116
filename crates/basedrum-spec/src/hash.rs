//! Canonical hashing and seed derivation.
//!
//! Determinism policy: every random draw in the core flows from a seed derived
//! here, and document identity is a BLAKE3 hash over canonical (sorted-key,
//! whitespace-free) JSON. The same identity snapshot therefore always yields
//! the same track, and two structurally identical documents always hash equal.

use crate::song::SongDocument;
use crate::user::UserData;

/// Seed used when no user data is available.
pub const DEFAULT_SEED: u32 = 42;

/// Hashes a wallet address to a stable 32-bit value.
///
/// Addresses are case-normalized first so checksummed and lowercase forms of
/// the same wallet hash identically.
pub fn address_hash(address: &str) -> u32 {
    let normalized = address.trim().to_ascii_lowercase();
    let hash = blake3::hash(normalized.as_bytes());
    let bytes: [u8; 4] = hash.as_bytes()[0..4].try_into().expect("hash is 32 bytes");
    u32::from_le_bytes(bytes)
}

/// Derives the generation seed from a user-data snapshot.
///
/// `hash(address) + followers + (transactions mod 10000)`, wrapping. Absent
/// data falls back to [`DEFAULT_SEED`] so the no-wallet flow is reproducible
/// too.
pub fn derive_seed(user: Option<&UserData>) -> u32 {
    let Some(user) = user else {
        return DEFAULT_SEED;
    };
    address_hash(&user.wallet.address)
        .wrapping_add(user.follower_count() as u32)
        .wrapping_add((user.transaction_count() % 10_000) as u32)
}

/// Computes the canonical BLAKE3 hash of a song document.
///
/// # Returns
/// A 64-character lowercase hexadecimal string.
pub fn canonical_document_hash(doc: &SongDocument) -> Result<String, serde_json::Error> {
    let value = serde_json::to_value(doc)?;
    let canonical = canonicalize_value(&value);
    Ok(blake3::hash(canonical.as_bytes()).to_hex().to_string())
}

/// Renders a JSON value with sorted object keys and no whitespace.
fn canonicalize_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => "null".to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::String(s) => {
            serde_json::to_string(s).expect("string serialization is infallible")
        }
        serde_json::Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(canonicalize_value).collect();
            format!("[{}]", items.join(","))
        }
        serde_json::Value::Object(obj) => {
            let mut entries: Vec<(&String, &serde_json::Value)> = obj.iter().collect();
            entries.sort_by_key(|&(key, _)| key);
            let pairs: Vec<String> = entries
                .iter()
                .map(|(key, value)| {
                    let key =
                        serde_json::to_string(key).expect("string serialization is infallible");
                    format!("{}:{}", key, canonicalize_value(value))
                })
                .collect();
            format!("{{{}}}", pairs.join(","))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::song::{SongEffects, SongMetadata, SongTrack};

    fn doc() -> SongDocument {
        let metadata = SongMetadata::new("Hash", 128, 1, "2024-06-01T00:00:00Z");
        let mut doc = SongDocument::new(metadata, SongEffects::default());
        doc.insert_track("kick", SongTrack::hits(vec![0, 4, 8, 12], -6.0));
        doc
    }

    #[test]
    fn address_hash_normalizes_case() {
        let a = address_hash("0xAbCd000000000000000000000000000000000001");
        let b = address_hash("0xabcd000000000000000000000000000000000001");
        assert_eq!(a, b);
        assert_ne!(a, address_hash("0xabcd000000000000000000000000000000000002"));
    }

    #[test]
    fn seed_defaults_without_data() {
        assert_eq!(derive_seed(None), DEFAULT_SEED);
    }

    #[test]
    fn seed_mixes_social_and_activity() {
        let mut user = UserData::default();
        user.wallet.address = "0x1111111111111111111111111111111111111111".to_string();
        let base = derive_seed(Some(&user));

        user.farcaster.follower_count = 300;
        user.onchain.transaction_count = 150;
        let mixed = derive_seed(Some(&user));
        assert_eq!(mixed, base.wrapping_add(300 + 150));

        // Transactions wrap at 10000 so whales do not overflow the mix.
        user.onchain.transaction_count = 10_150;
        assert_eq!(derive_seed(Some(&user)), mixed);
    }

    #[test]
    fn canonical_hash_is_stable_across_key_order() {
        let d = doc();
        let h1 = canonical_document_hash(&d).unwrap();
        let h2 = canonical_document_hash(&d.clone()).unwrap();
        assert_eq!(h1, h2);
        assert_eq!(h1.len(), 64);
    }

    #[test]
    fn canonical_hash_sees_content_changes() {
        let d = doc();
        let mut other = d.clone();
        other.tracks.get_mut("kick").unwrap().pattern = vec![0, 4, 8];
        assert_ne!(
            canonical_document_hash(&d).unwrap(),
            canonical_document_hash(&other).unwrap()
        );
    }
}
