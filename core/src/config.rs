//! Client configuration shared by every API operation.
//!
//! # Design
//! Base paths live in one explicit value instead of per-module constants. The
//! two behaviors that differ between known deployments of the auth service
//! (whether login failures are surfaced, and which method registration uses)
//! are configuration rather than hard-coded choices.

use serde::{Deserialize, Serialize};

use crate::http::HttpMethod;

pub const DEFAULT_AUTH_BASE: &str = "/api";
pub const DEFAULT_EXPENSE_BASE: &str = "/expense";

/// How a parse step treats a non-2xx status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusCheck {
    /// Non-2xx statuses fail with `ApiError::HttpError`.
    #[default]
    Checked,
    /// The body is parsed and returned whatever the status.
    Unchecked,
}

/// HTTP method used by `build_register`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegisterMethod {
    #[default]
    Post,
    Put,
}

impl From<RegisterMethod> for HttpMethod {
    fn from(method: RegisterMethod) -> Self {
        match method {
            RegisterMethod::Post => HttpMethod::Post,
            RegisterMethod::Put => HttpMethod::Put,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Scheme and authority prepended to every path, e.g.
    /// `http://localhost:3000`. Empty means origin-relative paths.
    pub origin: String,
    pub auth_base: String,
    pub expense_base: String,
    pub login_status: StatusCheck,
    pub register_method: RegisterMethod,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            origin: String::new(),
            auth_base: DEFAULT_AUTH_BASE.to_string(),
            expense_base: DEFAULT_EXPENSE_BASE.to_string(),
            login_status: StatusCheck::default(),
            register_method: RegisterMethod::default(),
        }
    }
}

impl ClientConfig {
    pub fn new(origin: &str) -> Self {
        Self {
            origin: origin.to_string(),
            ..Self::default()
        }
    }

    pub fn with_login_status(mut self, login_status: StatusCheck) -> Self {
        self.login_status = login_status;
        self
    }

    pub fn with_register_method(mut self, register_method: RegisterMethod) -> Self {
        self.register_method = register_method;
        self
    }

    pub fn with_auth_base(mut self, auth_base: &str) -> Self {
        self.auth_base = auth_base.to_string();
        self
    }

    pub fn with_expense_base(mut self, expense_base: &str) -> Self {
        self.expense_base = expense_base.to_string();
        self
    }

    /// Join origin and base path into a URL prefix with no trailing slash.
    pub(crate) fn prefix(&self, base: &str) -> String {
        let origin = self.origin.trim_end_matches('/');
        let base = base.trim_matches('/');
        if base.is_empty() {
            origin.to_string()
        } else {
            format!("{origin}/{base}")
        }
    }
}
