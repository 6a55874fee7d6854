use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use crate::error::UnknownCode;

// Code -> canonical message tables for the documented response codes.
// Codes are unique across all five tables; messages are unique within each.

const RESPONSE_CODES: &[(&str, &str)] = &[
    ("S9990", "PayWay endpoint not set or invalid"),
    ("S9901", "Response is not JSON"),
    ("S9902", "Empty response"),
    ("S9991", "PayWay API key or password not set"),
    ("S9992", "Error connecting to PayWay gateway"),
    ("S9993", "Authentication error"),
    ("S9995", "Error converting to or from JSON, invalid parameter"),
    ("S9996", "PayWay gateway server error"),
];

const VALIDATION_CODES: &[(&str, &str)] = &[
    ("V6000", "Validation error"),
    ("V6001", "Invalid CustomerIP"),
    ("V6002", "Invalid DeviceID"),
    ("V6003", "Invalid Request PartnerID"),
    ("V6004", "Invalid Request Method"),
];

const SYSTEM_CODES: &[(&str, &str)] = &[
    ("S5000", "System Error"),
    ("S5011", "PayPal Connection Error"),
    ("S5012", "PayPal Settings Error"),
];

const FRAUD_CODES: &[(&str, &str)] = &[
    ("F7000", "Undefined Fraud Error"),
    ("F7001", "Challenged Fraud"),
];

const TRANSACTION_CODES: &[(&str, &str)] = &[
    ("A2000", "Transaction Approved Successful*"),
    ("A2008", "Honour With Identification Successful"),
    ("A2010", "Approved For Partial Amount Successful"),
    ("A2011", "Approved, VIP Successful"),
    ("A2016", "Approved, Update Track 3 Successful"),
    ("D4401", "Refer to Issuer Failed"),
    ("D4402", "Refer to Issuer, special Failed"),
    ("D4403", "No Merchant Failed"),
];

/// The five documented error families
///
/// Each family owns a closed code -> canonical-message table. The tables are
/// compiled-in configuration, not mutable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// SDK and response-handling conditions (connection, auth, JSON shape)
    Response,
    /// Malformed request fields
    Validation,
    /// Gateway-side system faults
    System,
    /// Fraud-screen outcomes. Never show the specific reason to the
    /// customer; display a generic decline and keep the detail for logs.
    Fraud,
    /// Card-network responses, approvals and declines alike
    Transaction,
}

impl ErrorCategory {
    /// Priority order for code lookups
    const BY_CODE: [Self; 5] = [
        Self::Response,
        Self::Validation,
        Self::Transaction,
        Self::Fraud,
        Self::System,
    ];

    /// Priority order for message lookups. Fraud is checked first: fraud
    /// phrasing can read like another family's generic message, and a fraud
    /// match must not be reported under a different category.
    const BY_MESSAGE: [Self; 5] = [
        Self::Fraud,
        Self::Response,
        Self::Validation,
        Self::Transaction,
        Self::System,
    ];

    /// The category's code -> message table
    pub const fn table(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Response => RESPONSE_CODES,
            Self::Validation => VALIDATION_CODES,
            Self::System => SYSTEM_CODES,
            Self::Fraud => FRAUD_CODES,
            Self::Transaction => TRANSACTION_CODES,
        }
    }

    fn entry(self, code: &str) -> Option<(&'static str, &'static str)> {
        self.table().iter().copied().find(|(c, _)| *c == code)
    }

    /// Canonical message for `code`, if this category documents it
    pub fn message_for(self, code: &str) -> Option<&'static str> {
        self.entry(code).map(|(_, message)| message)
    }

    /// Code for a canonical `message`, if this category documents it
    ///
    /// Exact match only; no case folding.
    pub fn code_for(self, message: &str) -> Option<&'static str> {
        self.reverse().get(message).copied()
    }

    // Message -> code table, built once per category on first use. Rebuilding
    // concurrently yields an identical map, so a plain OnceLock suffices.
    fn reverse(self) -> &'static HashMap<&'static str, &'static str> {
        static RESPONSE: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
        static VALIDATION: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
        static SYSTEM: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
        static FRAUD: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
        static TRANSACTION: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();

        let cell = match self {
            Self::Response => &RESPONSE,
            Self::Validation => &VALIDATION,
            Self::System => &SYSTEM,
            Self::Fraud => &FRAUD,
            Self::Transaction => &TRANSACTION,
        };

        cell.get_or_init(|| self.table().iter().map(|(code, msg)| (*msg, *code)).collect())
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Response => "Response",
            Self::Validation => "Validation",
            Self::System => "System",
            Self::Fraud => "Fraud",
            Self::Transaction => "Transaction",
        };
        f.write_str(name)
    }
}

/// One documented gateway condition, resolved from the code catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GatewayError {
    category: ErrorCategory,
    code: &'static str,
    message: &'static str,
}

impl GatewayError {
    /// Resolve a documented code across all categories
    ///
    /// Categories are tried in the order Response, Validation, Transaction,
    /// Fraud, System. Returns `None` for undocumented codes.
    pub fn from_code(code: &str) -> Option<Self> {
        ErrorCategory::BY_CODE.iter().find_map(|&category| {
            category
                .entry(code)
                .map(|(code, message)| Self { category, code, message })
        })
    }

    /// Resolve a canonical message back to its code
    ///
    /// Categories are tried in the order Fraud, Response, Validation,
    /// Transaction, System (deliberately not the code-lookup order; see
    /// [`ErrorCategory::BY_MESSAGE`]). Exact match only.
    pub fn from_message(message: &str) -> Option<Self> {
        ErrorCategory::BY_MESSAGE.iter().find_map(|&category| {
            let code = category.code_for(message)?;
            // the code came out of this category's reverse map, so the
            // forward entry exists
            category
                .entry(code)
                .map(|(code, message)| Self { category, code, message })
        })
    }

    /// Build an error known to belong to `category`
    ///
    /// Misuse guard for direct construction: a code outside the category's
    /// table is a programming error, not something a live response triggers.
    pub fn in_category(category: ErrorCategory, code: &str) -> Result<Self, UnknownCode> {
        category
            .entry(code)
            .map(|(code, message)| Self { category, code, message })
            .ok_or_else(|| UnknownCode::new(category, code))
    }

    pub fn category(&self) -> ErrorCategory {
        self.category
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    pub fn message(&self) -> &'static str {
        self.message
    }

    /// Composed `"{code}: {message}"` form
    pub fn description(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}
