//! User-data snapshot consumed by the generators.
//!
//! The snapshot is produced by an external fetch layer and handed to the core
//! read-only. Any field may be missing from the wire payload, so every field
//! carries a serde default; a completely empty object is a valid snapshot.
//! Counts are signed so malformed feeds parse, and are clamped to zero where
//! they are consumed.

use serde::{Deserialize, Serialize};

/// Wallet connection state and balance.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WalletSnapshot {
    /// ETH balance in whole ETH.
    pub balance: f64,
    pub chain_id: u64,
    pub is_connected: bool,
    /// Hex wallet address ("0x...").
    pub address: String,
}

/// Onchain activity summary.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OnchainActivity {
    pub transaction_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_transaction_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_activity_date: Option<String>,
    pub token_count: i64,
    pub nft_count: i64,
    pub defi_protocols: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_level: Option<String>,
}

/// Farcaster social graph summary.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FarcasterProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fid: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pfp_url: Option<String>,
    pub follower_count: i64,
    pub following_count: i64,
    pub verifications: Vec<String>,
}

/// Live market prices; absent on fetch failure.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PriceSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eth: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub btc: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetched_at: Option<String>,
}

/// Read-only identity snapshot driving generation.
///
/// Created fresh per session by the fetch layer; never persisted by the core.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserData {
    pub wallet: WalletSnapshot,
    pub onchain: OnchainActivity,
    pub farcaster: FarcasterProfile,
    /// Opaque host/app context passed through untouched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<serde_json::Value>,
    pub prices: PriceSnapshot,
}

impl UserData {
    /// Parses a snapshot from JSON. Missing fields fall back to defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Transaction count clamped to non-negative.
    pub fn transaction_count(&self) -> u64 {
        self.onchain.transaction_count.max(0) as u64
    }

    /// Token count clamped to non-negative.
    pub fn token_count(&self) -> u64 {
        self.onchain.token_count.max(0) as u64
    }

    /// NFT count clamped to non-negative.
    pub fn nft_count(&self) -> u64 {
        self.onchain.nft_count.max(0) as u64
    }

    /// Follower count clamped to non-negative.
    pub fn follower_count(&self) -> u64 {
        self.farcaster.follower_count.max(0) as u64
    }

    /// Following count clamped to non-negative.
    pub fn following_count(&self) -> u64 {
        self.farcaster.following_count.max(0) as u64
    }

    /// Combined social graph size, clamped.
    pub fn social_count(&self) -> u64 {
        self.follower_count() + self.following_count()
    }
}
