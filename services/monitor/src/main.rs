//! AurumGate PoR Monitor Service
//!
//! Polls the Proof-of-Reserve adapter contract's read surface via EVM
//! JSON-RPC, derives the coverage ratio and display status, and logs
//! every refresh.
//!
//! # Architecture
//!
//! 1. Probe RPC connectivity (`web3_clientVersion`) and log the cached
//!    `getPoRData` aggregate once at startup
//! 2. Watch `eth_blockNumber` on a short cadence
//! 3. On a new block, or when the refresh interval elapses, issue the
//!    three reads (`totalVaultedKg`, `isHealthy`, `lastUpdate`)
//!    concurrently via `eth_call`
//! 4. Fold the settled tick into the owned `ReserveStatus` and log the
//!    derived display line
//!
//! # Running
//!
//! ```bash
//! MONITOR_CONFIG=monitor.json RUST_LOG=info cargo run -p monitor
//! ```

use std::time::{Duration, Instant};

use por_adapter::calls;
use por_adapter::status::{DisplayState, PollOutcome, ReserveStatus};
use serde::{Deserialize, Serialize};
use site_shell::views::StatusPill;
use tracing::{error, info, warn};

// ── Configuration ───────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    pub rpc_url: String,
    /// Monitored adapter contract, supplied from outside and never derived
    /// or hardcoded here.
    pub contract_address: String,
    /// Outstanding token-represented quantity in kilograms. Stand-in for
    /// a token-supply read, injected until that source is wired.
    pub outstanding_kg: u128,
    /// Full refresh cadence when no new block shows up.
    pub refresh_interval_secs: u64,
    /// Block-watch cadence.
    pub block_poll_secs: u64,
    /// Batch identifiers audited once at startup (quantity plus
    /// attestation hash), empty to skip.
    pub audit_batch_ids: Vec<u128>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://localhost:8545".to_string(),
            contract_address: String::new(),
            outstanding_kg: 100_000,
            refresh_interval_secs: 30,
            block_poll_secs: 5,
            audit_batch_ids: Vec::new(),
        }
    }
}

fn load_config() -> MonitorConfig {
    let path = std::env::var("MONITOR_CONFIG").unwrap_or_default();
    if !path.is_empty() {
        if let Ok(contents) = std::fs::read_to_string(&path) {
            if let Ok(config) = serde_json::from_str::<MonitorConfig>(&contents) {
                return config;
            }
        }
        warn!("Failed to load config from {}, using defaults", path);
    }
    MonitorConfig::default()
}

/// A 20-byte `0x`-prefixed hex address.
fn validate_contract_address(address: &str) -> Result<(), String> {
    let stripped = address
        .strip_prefix("0x")
        .ok_or_else(|| "contract address must be 0x-prefixed".to_string())?;
    if stripped.len() != 40 {
        return Err(format!(
            "contract address must be 40 hex chars, got {}",
            stripped.len()
        ));
    }
    if !stripped.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err("contract address contains non-hex characters".to_string());
    }
    Ok(())
}

// ── JSON-RPC helpers ────────────────────────────────────────────

#[derive(Serialize)]
struct RpcRequest {
    jsonrpc: &'static str,
    id: u64,
    method: &'static str,
    params: serde_json::Value,
}

#[derive(Deserialize)]
struct RpcResponse {
    result: Option<serde_json::Value>,
    error: Option<serde_json::Value>,
}

async fn rpc_call(
    client: &reqwest::Client,
    rpc_url: &str,
    method: &'static str,
    params: serde_json::Value,
) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
    let request = RpcRequest {
        jsonrpc: "2.0",
        id: 1,
        method,
        params,
    };

    let resp: RpcResponse = client
        .post(rpc_url)
        .json(&request)
        .send()
        .await?
        .json()
        .await?;

    if let Some(err) = resp.error {
        return Err(format!("RPC error: {}", err).into());
    }
    Ok(resp.result.unwrap_or_default())
}

/// `eth_call` against the adapter; returns the raw hex output.
async fn eth_call(
    client: &reqwest::Client,
    rpc_url: &str,
    to: &str,
    data: String,
) -> Result<String, Box<dyn std::error::Error>> {
    let result = rpc_call(
        client,
        rpc_url,
        "eth_call",
        serde_json::json!([{ "to": to, "data": data }, "latest"]),
    )
    .await?;
    result
        .as_str()
        .map(|s| s.to_string())
        .ok_or_else(|| "expected hex string result".into())
}

async fn eth_block_number(
    client: &reqwest::Client,
    rpc_url: &str,
) -> Result<u64, Box<dyn std::error::Error>> {
    let result = rpc_call(client, rpc_url, "eth_blockNumber", serde_json::json!([])).await?;
    let hex = result.as_str().ok_or("expected block number string")?;
    Ok(parse_hex_quantity(hex)?)
}

async fn check_rpc(
    client: &reqwest::Client,
    rpc_url: &str,
) -> Result<String, Box<dyn std::error::Error>> {
    let result = rpc_call(client, rpc_url, "web3_clientVersion", serde_json::json!([])).await?;
    Ok(result.as_str().unwrap_or("unknown").to_string())
}

/// Parse a `0x`-prefixed JSON-RPC quantity.
fn parse_hex_quantity(hex: &str) -> Result<u64, String> {
    let stripped = hex
        .strip_prefix("0x")
        .ok_or_else(|| format!("quantity not 0x-prefixed: {hex}"))?;
    u64::from_str_radix(stripped, 16).map_err(|e| format!("bad quantity {hex}: {e}"))
}

// ── Reserve reads ───────────────────────────────────────────────

/// Fold the three independent reads into one settled tick. The first
/// failure wins, in read order: vaulted quantity, health flag, timestamp.
fn settle_reads(
    vaulted: Result<u128, String>,
    healthy: Result<bool, String>,
    updated: Result<u64, String>,
) -> PollOutcome {
    match (vaulted, healthy, updated) {
        (Ok(vaulted_kg), Ok(is_healthy), Ok(last_update)) => PollOutcome::Success {
            vaulted_kg,
            is_healthy,
            last_update,
        },
        (vaulted, healthy, updated) => {
            let message = [vaulted.err(), healthy.err(), updated.err()]
                .into_iter()
                .flatten()
                .next()
                .unwrap_or_else(|| "unknown read failure".to_string());
            PollOutcome::Failure { message }
        }
    }
}

/// Issue the three adapter reads concurrently; they may settle in any
/// order and the tick is only as fresh as the slowest of them.
async fn read_reserve(client: &reqwest::Client, config: &MonitorConfig) -> PollOutcome {
    let (vaulted, healthy, updated) = tokio::join!(
        eth_call(
            client,
            &config.rpc_url,
            &config.contract_address,
            calls::total_vaulted_kg_calldata(),
        ),
        eth_call(
            client,
            &config.rpc_url,
            &config.contract_address,
            calls::is_healthy_calldata(),
        ),
        eth_call(
            client,
            &config.rpc_url,
            &config.contract_address,
            calls::last_update_calldata(),
        ),
    );

    let vaulted = vaulted
        .map_err(|e| e.to_string())
        .and_then(|out| calls::decode_uint256(&out).map_err(|e| e.to_string()));
    let healthy = healthy
        .map_err(|e| e.to_string())
        .and_then(|out| calls::decode_bool(&out).map_err(|e| e.to_string()));
    let updated = updated
        .map_err(|e| e.to_string())
        .and_then(|out| calls::decode_timestamp(&out).map_err(|e| e.to_string()));

    settle_reads(vaulted, healthy, updated)
}

/// Refresh on the first tick, on any new block, or when the interval has
/// elapsed since the last refresh.
fn should_refresh(
    last_block: Option<u64>,
    block: Option<u64>,
    elapsed: Option<Duration>,
    interval: Duration,
) -> bool {
    let Some(elapsed) = elapsed else {
        return true;
    };
    if let (Some(block), Some(last_block)) = (block, last_block) {
        if block > last_block {
            return true;
        }
    }
    elapsed >= interval
}

// ── Startup reads ───────────────────────────────────────────────

/// Log the adapter's cached aggregate once, so the first refresh has a
/// baseline in the logs.
async fn log_startup_snapshot(client: &reqwest::Client, config: &MonitorConfig) {
    let out = match eth_call(
        client,
        &config.rpc_url,
        &config.contract_address,
        calls::get_por_data_calldata(),
    )
    .await
    {
        Ok(out) => out,
        Err(e) => {
            warn!("getPoRData read failed: {}", e);
            return;
        }
    };
    match calls::decode_por_data(&out) {
        Ok(snapshot) => info!(
            "Adapter snapshot: {} kg vaulted, healthy={}, override={}, updated at {}",
            snapshot.vault_total_kg, snapshot.healthy, snapshot.override_active, snapshot.update_time
        ),
        Err(e) => warn!("getPoRData decode failed: {}", e),
    }
}

/// One-shot audit of configured batches: quantity plus attestation hash.
async fn audit_batches(client: &reqwest::Client, config: &MonitorConfig) {
    for &batch_id in &config.audit_batch_ids {
        let (kg, attestation) = tokio::join!(
            eth_call(
                client,
                &config.rpc_url,
                &config.contract_address,
                calls::batch_kg_calldata(batch_id),
            ),
            eth_call(
                client,
                &config.rpc_url,
                &config.contract_address,
                calls::get_batch_attestation_calldata(batch_id),
            ),
        );

        let kg = kg
            .map_err(|e| e.to_string())
            .and_then(|out| calls::decode_uint256(&out).map_err(|e| e.to_string()));
        let attestation = attestation
            .map_err(|e| e.to_string())
            .and_then(|out| calls::decode_bytes32(&out).map_err(|e| e.to_string()));

        match (kg, attestation) {
            (Ok(kg), Ok(attestation)) => info!(
                "Batch {}: {} kg, attestation {}",
                batch_id,
                kg,
                hex_digest(&attestation)
            ),
            (kg, attestation) => warn!(
                "Batch {} audit failed: {}",
                batch_id,
                kg.err().or(attestation.err()).unwrap_or_default()
            ),
        }
    }
}

fn hex_digest(bytes: &[u8; 32]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

// ── Main ────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".parse().unwrap()),
        )
        .init();

    info!("AurumGate PoR Monitor starting...");

    let config = load_config();
    info!(
        "RPC={}, refresh={}s, block poll={}s, outstanding={} kg",
        config.rpc_url,
        config.refresh_interval_secs,
        config.block_poll_secs,
        config.outstanding_kg
    );

    if let Err(e) = validate_contract_address(&config.contract_address) {
        error!("Invalid contract address: {}", e);
        std::process::exit(1);
    }

    let client = reqwest::Client::new();

    match check_rpc(&client, &config.rpc_url).await {
        Ok(version) => info!("Connected to RPC node: {}", version),
        Err(e) => {
            error!("RPC connection failed: {}", e);
            std::process::exit(1);
        }
    }

    info!("Monitoring adapter: {}", config.contract_address);

    log_startup_snapshot(&client, &config).await;
    audit_batches(&client, &config).await;

    let refresh_interval = Duration::from_secs(config.refresh_interval_secs);
    let block_poll = Duration::from_secs(config.block_poll_secs);

    let mut status = ReserveStatus::default();
    let mut last_block: Option<u64> = None;
    let mut last_refresh: Option<Instant> = None;
    let mut refresh_count = 0u64;

    loop {
        let block = match eth_block_number(&client, &config.rpc_url).await {
            Ok(b) => Some(b),
            Err(e) => {
                warn!("eth_blockNumber failed: {}", e);
                None
            }
        };

        let elapsed = last_refresh.map(|at| at.elapsed());
        if should_refresh(last_block, block, elapsed, refresh_interval) {
            refresh_count += 1;
            status.begin_poll();
            let outcome = read_reserve(&client, &config).await;
            status.apply(outcome, config.outstanding_kg);
            last_refresh = Some(Instant::now());
            last_block = block;

            let pill = StatusPill::por(status.display_state() == DisplayState::Healthy);
            match status.display_state() {
                DisplayState::Error => warn!(
                    "── Refresh #{} ── {} ({})",
                    refresh_count,
                    status.display_text(),
                    status.error.as_deref().unwrap_or("unknown")
                ),
                _ => info!(
                    "── Refresh #{} ── {} | {} | {} kg vaulted, updated at {}",
                    refresh_count,
                    status.display_text(),
                    pill.render(),
                    status.vaulted_kg,
                    status.last_update
                ),
            }
        }

        tokio::time::sleep(block_poll).await;
    }
}

// ── Tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let c = MonitorConfig::default();
        assert_eq!(c.rpc_url, "http://localhost:8545");
        assert_eq!(c.outstanding_kg, 100_000);
        assert_eq!(c.refresh_interval_secs, 30);
        assert_eq!(c.block_poll_secs, 5);
        assert!(c.audit_batch_ids.is_empty());
    }

    #[test]
    fn test_validate_contract_address() {
        assert!(
            validate_contract_address("0x1234567890abcdef1234567890abcdef12345678").is_ok()
        );
        assert!(validate_contract_address("").is_err());
        assert!(validate_contract_address("1234567890abcdef1234567890abcdef12345678").is_err());
        assert!(validate_contract_address("0x1234").is_err());
        assert!(
            validate_contract_address("0xzz34567890abcdef1234567890abcdef12345678").is_err()
        );
    }

    #[test]
    fn test_parse_hex_quantity() {
        assert_eq!(parse_hex_quantity("0x0"), Ok(0));
        assert_eq!(parse_hex_quantity("0x1b4"), Ok(436));
        assert!(parse_hex_quantity("1b4").is_err());
        assert!(parse_hex_quantity("0xzz").is_err());
    }

    #[test]
    fn test_settle_reads_success() {
        let outcome = settle_reads(Ok(98_500), Ok(true), Ok(1_700_000_000));
        assert_eq!(
            outcome,
            PollOutcome::Success {
                vaulted_kg: 98_500,
                is_healthy: true,
                last_update: 1_700_000_000,
            }
        );
    }

    #[test]
    fn test_settle_reads_first_failure_wins() {
        let outcome = settle_reads(
            Err("vaulted failed".to_string()),
            Err("health failed".to_string()),
            Ok(1),
        );
        assert_eq!(
            outcome,
            PollOutcome::Failure {
                message: "vaulted failed".to_string()
            }
        );

        let outcome = settle_reads(Ok(1), Ok(true), Err("timestamp failed".to_string()));
        assert_eq!(
            outcome,
            PollOutcome::Failure {
                message: "timestamp failed".to_string()
            }
        );
    }

    #[test]
    fn test_should_refresh_first_tick() {
        assert!(should_refresh(None, Some(10), None, Duration::from_secs(30)));
        assert!(should_refresh(None, None, None, Duration::from_secs(30)));
    }

    #[test]
    fn test_should_refresh_on_new_block() {
        let interval = Duration::from_secs(30);
        assert!(should_refresh(
            Some(10),
            Some(11),
            Some(Duration::from_secs(1)),
            interval
        ));
        assert!(!should_refresh(
            Some(10),
            Some(10),
            Some(Duration::from_secs(1)),
            interval
        ));
    }

    #[test]
    fn test_should_refresh_on_elapsed_interval() {
        let interval = Duration::from_secs(30);
        assert!(should_refresh(
            Some(10),
            Some(10),
            Some(Duration::from_secs(30)),
            interval
        ));
        // Block watch down: interval still drives refreshes.
        assert!(should_refresh(
            Some(10),
            None,
            Some(Duration::from_secs(31)),
            interval
        ));
        assert!(!should_refresh(
            Some(10),
            None,
            Some(Duration::from_secs(1)),
            interval
        ));
    }

    #[test]
    fn test_hex_digest() {
        let mut bytes = [0u8; 32];
        bytes[0] = 0xab;
        bytes[31] = 0x01;
        let digest = hex_digest(&bytes);
        assert_eq!(digest.len(), 64);
        assert!(digest.starts_with("ab"));
        assert!(digest.ends_with("01"));
    }
}
