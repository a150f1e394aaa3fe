//! Request DTOs for the expense and auth services.
//!
//! These are conveniences: `submit_transaction` and `register` accept any
//! `Serialize` value and send it verbatim, so callers with their own record
//! shapes never go through these types. Responses stay untyped
//! (`serde_json::Value`) because neither service publishes a fixed schema.

use serde::{Deserialize, Serialize};

/// Login payload sent as `{"account": ..., "password": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub account: String,
    pub password: String,
}

impl Credentials {
    pub fn new(account: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            password: password.into(),
        }
    }
}

/// Registration payload as the auth service reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub user_name: String,
    pub password: String,
    pub mail: String,
}

/// One expense entry as the expense service stores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub category: String,
    pub product_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    pub total_cost: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pay_by: Option<String>,
    /// ISO-8601 timestamp, passed through untouched.
    pub date: String,
}
