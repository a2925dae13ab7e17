//! Content-derived description ids (versioned).
//!
//! Downstream storage deduplicates phenotype descriptions by id equality, so
//! every freshly synthesized intersection gets an id computed from its
//! canonical content:
//!
//! - algorithm: **SHA-256**
//! - input: the genus id and the differentia `(relation, token)` pairs, sorted
//!   lexicographically (relation first, then token), each component written as
//!   `<byte length>:<bytes>`
//! - output: `"cdsha256:<64 lowercase hex digits>"`
//!
//! Notes:
//! - Duplicated pairs are kept (the differentia form a multiset).
//! - Literal tokens are quoted by the caller (see [`literal_token`]) so a literal
//!   value can never collide with a node id of the same spelling.
//! - These ids are not bit-compatible with ids minted by older OBD loaders.

use sha2::{Digest, Sha256};

/// Prefix used in serialized description ids.
pub const DESCRIPTION_ID_V1_PREFIX: &str = "cdsha256:";

/// Token used for a literal differentia argument.
pub fn literal_token(value: &str) -> String {
    format!("\"{value}\"")
}

/// Compute the v1 content id for a genus plus differentia pairs.
///
/// The order of `differentia` does not matter.
pub fn description_id_v1(genus_id: &str, differentia: &[(&str, &str)]) -> String {
    fn add(hasher: &mut Sha256, s: &str) {
        hasher.update(s.len().to_string().as_bytes());
        hasher.update(b":");
        hasher.update(s.as_bytes());
    }

    let mut pairs: Vec<(&str, &str)> = differentia.to_vec();
    pairs.sort_unstable();

    let mut hasher = Sha256::new();
    hasher.update(b"genus=");
    add(&mut hasher, genus_id);
    for (relation, token) in pairs {
        hasher.update(b"|");
        add(&mut hasher, relation);
        add(&mut hasher, token);
    }

    let digest = hasher.finalize();
    let mut out = String::with_capacity(DESCRIPTION_ID_V1_PREFIX.len() + 64);
    out.push_str(DESCRIPTION_ID_V1_PREFIX);
    for byte in digest.iter() {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}
