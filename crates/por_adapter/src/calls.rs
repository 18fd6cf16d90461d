//! Calldata builders and return-data decoders for the adapter read surface.
//!
//! Builders produce `0x`-prefixed hex strings ready for `eth_call`;
//! decoders consume the `0x`-prefixed return data. uint256 words that do
//! not fit `u128` are rejected rather than truncated.

use sha3::{Digest, Keccak256};
use thiserror::Error;

use crate::constants::{
    SELECTOR_BYTES, SIG_BATCH_KG, SIG_GET_BATCH_ATTESTATION, SIG_GET_POR_DATA, SIG_IS_HEALTHY,
    SIG_LAST_UPDATE, SIG_TOTAL_VAULTED_KG, SIG_TOTAL_VERIFIED_KG, WORD_BYTES,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AbiError {
    #[error("return data is not 0x-prefixed hex")]
    BadHex,

    #[error("return data too short: {got} < {want} bytes")]
    ShortData { got: usize, want: usize },

    #[error("uint256 word out of range")]
    UintOutOfRange,

    #[error("bool word is neither 0 nor 1")]
    BadBool,
}

/// First four bytes of Keccak-256 over the canonical signature.
pub fn selector(signature: &str) -> [u8; 4] {
    let mut h = Keccak256::new();
    h.update(signature.as_bytes());
    let out = h.finalize();
    out[..SELECTOR_BYTES].try_into().expect("slice length is 4")
}

/// Left-padded big-endian ABI word for an unsigned integer argument.
fn uint_word(value: u128) -> [u8; WORD_BYTES] {
    let mut word = [0u8; WORD_BYTES];
    word[WORD_BYTES - 16..].copy_from_slice(&value.to_be_bytes());
    word
}

fn encode_call(signature: &str, args: &[[u8; WORD_BYTES]]) -> String {
    let mut data = Vec::with_capacity(SELECTOR_BYTES + args.len() * WORD_BYTES);
    data.extend_from_slice(&selector(signature));
    for word in args {
        data.extend_from_slice(word);
    }
    format!("0x{}", hex::encode(data))
}

// ── Calldata builders ───────────────────────────────────────────

pub fn total_vaulted_kg_calldata() -> String {
    encode_call(SIG_TOTAL_VAULTED_KG, &[])
}

pub fn batch_kg_calldata(batch_id: u128) -> String {
    encode_call(SIG_BATCH_KG, &[uint_word(batch_id)])
}

pub fn last_update_calldata() -> String {
    encode_call(SIG_LAST_UPDATE, &[])
}

pub fn is_healthy_calldata() -> String {
    encode_call(SIG_IS_HEALTHY, &[])
}

pub fn get_por_data_calldata() -> String {
    encode_call(SIG_GET_POR_DATA, &[])
}

pub fn get_batch_attestation_calldata(batch_id: u128) -> String {
    encode_call(SIG_GET_BATCH_ATTESTATION, &[uint_word(batch_id)])
}

pub fn total_verified_kg_calldata() -> String {
    encode_call(SIG_TOTAL_VERIFIED_KG, &[])
}

// ── Return-data decoders ────────────────────────────────────────

fn decode_words(hex_output: &str, want: usize) -> Result<Vec<[u8; WORD_BYTES]>, AbiError> {
    let stripped = hex_output.strip_prefix("0x").ok_or(AbiError::BadHex)?;
    let bytes = hex::decode(stripped).map_err(|_| AbiError::BadHex)?;
    let want_bytes = want * WORD_BYTES;
    if bytes.len() < want_bytes {
        return Err(AbiError::ShortData {
            got: bytes.len(),
            want: want_bytes,
        });
    }
    Ok(bytes
        .chunks_exact(WORD_BYTES)
        .take(want)
        .map(|chunk| chunk.try_into().expect("chunk length is 32"))
        .collect())
}

fn word_to_uint(word: &[u8; WORD_BYTES]) -> Result<u128, AbiError> {
    if word[..WORD_BYTES - 16].iter().any(|b| *b != 0) {
        return Err(AbiError::UintOutOfRange);
    }
    Ok(u128::from_be_bytes(
        word[WORD_BYTES - 16..].try_into().expect("slice length is 16"),
    ))
}

fn word_to_u64(word: &[u8; WORD_BYTES]) -> Result<u64, AbiError> {
    u64::try_from(word_to_uint(word)?).map_err(|_| AbiError::UintOutOfRange)
}

fn word_to_bool(word: &[u8; WORD_BYTES]) -> Result<bool, AbiError> {
    match word_to_uint(word) {
        Ok(0) => Ok(false),
        Ok(1) => Ok(true),
        _ => Err(AbiError::BadBool),
    }
}

/// Decode a single `uint256` return value.
pub fn decode_uint256(hex_output: &str) -> Result<u128, AbiError> {
    word_to_uint(&decode_words(hex_output, 1)?[0])
}

/// Decode a single `uint256` return value that must fit a timestamp.
pub fn decode_timestamp(hex_output: &str) -> Result<u64, AbiError> {
    word_to_u64(&decode_words(hex_output, 1)?[0])
}

/// Decode a single `bool` return value.
pub fn decode_bool(hex_output: &str) -> Result<bool, AbiError> {
    word_to_bool(&decode_words(hex_output, 1)?[0])
}

/// Decode a single `bytes32` return value.
pub fn decode_bytes32(hex_output: &str) -> Result<[u8; 32], AbiError> {
    Ok(decode_words(hex_output, 1)?[0])
}

/// Aggregate `getPoRData` view: cached vault total, update time, health
/// flag, and whether the emergency override is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PorSnapshot {
    pub vault_total_kg: u128,
    pub update_time: u64,
    pub healthy: bool,
    pub override_active: bool,
}

/// Decode the four-word `getPoRData` return tuple.
pub fn decode_por_data(hex_output: &str) -> Result<PorSnapshot, AbiError> {
    let words = decode_words(hex_output, 4)?;
    Ok(PorSnapshot {
        vault_total_kg: word_to_uint(&words[0])?,
        update_time: word_to_u64(&words[1])?,
        healthy: word_to_bool(&words[2])?,
        override_active: word_to_bool(&words[3])?,
    })
}

// ── Tests ───────────────────────────────────────────────────────
