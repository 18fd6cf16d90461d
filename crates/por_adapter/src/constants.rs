//! Hardcoded constants for the PoR adapter read surface.
//!
//! These MUST NOT be configurable at runtime.

/// `totalVaultedKg() -> uint256`: vaulted reserve quantity in kilograms.
pub const SIG_TOTAL_VAULTED_KG: &str = "totalVaultedKg()";

/// `batchKg(uint256) -> uint256`: per-batch vaulted quantity lookup.
pub const SIG_BATCH_KG: &str = "batchKg(uint256)";

/// `lastUpdate() -> uint256`: seconds-since-epoch of the last feed update.
pub const SIG_LAST_UPDATE: &str = "lastUpdate()";

/// `isHealthy() -> bool`: feed health flag.
pub const SIG_IS_HEALTHY: &str = "isHealthy()";

/// `getPoRData() -> (uint256, uint256, bool, bool)`: aggregate read of
/// vault total, update time, health flag, emergency-override flag.
pub const SIG_GET_POR_DATA: &str = "getPoRData()";

/// `getBatchAttestation(uint256) -> bytes32`: attestation hash for a batch.
pub const SIG_GET_BATCH_ATTESTATION: &str = "getBatchAttestation(uint256)";

/// `totalVerifiedKg() -> uint256`: sum of attested batch quantities.
pub const SIG_TOTAL_VERIFIED_KG: &str = "totalVerifiedKg()";

/// The read-only functions this crate may build calls for.
/// We only support this strict subset: the adapter's state-changing
/// surface (`verifyBatch`, `setPoRFeed`, `setEmergencyOverride`,
/// `updateCache`) is never called from here.
pub const ALLOWED_READ_FUNCTIONS: &[&str] = &[
    SIG_TOTAL_VAULTED_KG,
    SIG_BATCH_KG,
    SIG_LAST_UPDATE,
    SIG_IS_HEALTHY,
    SIG_GET_POR_DATA,
    SIG_GET_BATCH_ATTESTATION,
    SIG_TOTAL_VERIFIED_KG,
];

/// ABI word size in bytes.
pub const WORD_BYTES: usize = 32;

/// Function selector size in bytes.
pub const SELECTOR_BYTES: usize = 4;
