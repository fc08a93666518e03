/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust response structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

use crate::http::{LighterError, Result};

pub const CODE_OK: i32 = 200;

/// Result envelope shared by every response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultCode {
    pub code: i32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
}

impl ResultCode {
    pub fn is_ok(&self) -> bool {
        self.code == CODE_OK
    }

    /// Convert a non-OK envelope into [`LighterError::Api`]
    pub fn ensure_ok(&self) -> Result<()> {
        if self.is_ok() {
            return Ok(());
        }
        Err(LighterError::Api {
            code: self.code,
            message: self.message.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextNonce {
    #[serde(flatten)]
    pub result: ResultCode,
    pub nonce: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKey {
    pub account_index: i64,
    pub api_key_index: u8,
    pub nonce: i64,
    pub public_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountApiKeys {
    #[serde(flatten)]
    pub result: ResultCode,
    #[serde(default)]
    pub api_keys: Vec<ApiKey>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxHash {
    #[serde(flatten)]
    pub result: ResultCode,
    pub tx_hash: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferFeeInfo {
    #[serde(flatten)]
    pub result: ResultCode,
    #[serde(rename = "transfer_fee_usdc")]
    pub transfer_fee: i64,
}

/// Single market entry of `/api/v1/orderBookDetails`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketDetail {
    pub symbol: String,
    pub market_id: u8,
    pub status: String,
    /// Decimal places of the base asset size
    pub size_decimals: i64,
    /// Decimal places of the quote price
    pub price_decimals: i64,
}

/// Response of `/api/v1/orderBookDetails`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBookDetailsResponse {
    #[serde(flatten)]
    pub result: ResultCode,
    #[serde(default)]
    pub order_book_details: Vec<MarketDetail>,
}
