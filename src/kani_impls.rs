//! Kani proof harnesses for the grammar's totality and serialization.
//!
//! Inputs are drawn from an alphabet holding every delimiter plus one plain
//! character, which covers every branch of every production.
//!
//! # Usage
//!
//! Kani is not a Cargo dependency. Install and run with:
//!
//! ```bash
//! cargo install --locked kani-verifier
//! cargo kani setup
//! cargo kani --features kani
//! ```
//!
//! This module is only compiled when using Kani (`#[cfg(kani)]`).

use crate::StructuredUri;

/// Delimiters plus one ordinary character
const ALPHABET: &[u8] = b"a#?&=";

/// Maximum generated input length
const MAX_LEN: usize = 5;

fn arbitrary_char() -> char {
    let idx: usize = kani::any();
    let idx = idx % ALPHABET.len();
    ALPHABET[idx] as char
}

fn arbitrary_input() -> String {
    let len: usize = kani::any();
    let len = len % (MAX_LEN + 1);
    (0..len).map(|_| arbitrary_char()).collect()
}

impl kani::Arbitrary for StructuredUri {
    fn any() -> Self {
        StructuredUri::parse(&arbitrary_input()).expect("grammar is total")
    }
}

// ============================================================================
// Kani Proof Harnesses
// ============================================================================

/// Proof: parsing never fails
#[kani::proof]
#[kani::unwind(7)]
fn proof_parse_is_total() {
    let input = arbitrary_input();
    assert!(StructuredUri::parse(&input).is_ok());
}

/// Proof: path and anchor never contain their blocking delimiters
#[kani::proof]
#[kani::unwind(7)]
fn proof_components_respect_delimiters() {
    let uri: StructuredUri = kani::any();
    assert!(!uri.path().contains('#'));
    assert!(!uri.path().contains('?'));
    assert!(!uri.anchor().contains('?'));
    assert!(uri.params().keys().all(|k| !k.is_empty()));
}

/// Proof: re-parsing the serialized form yields the same value
#[kani::proof]
#[kani::unwind(7)]
fn proof_reparse_is_idempotent() {
    let uri: StructuredUri = kani::any();
    let reparsed = StructuredUri::parse(&uri.to_string()).expect("grammar is total");
    assert_eq!(reparsed, uri);
}
