use serde::{Deserialize, Serialize};

// -- Request types --

/// How a tokenized payment setup is funded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "creditCard")]
    CreditCard,
    #[serde(rename = "bankAccount")]
    BankAccount,
}

/// Documented transaction types
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransactionType {
    #[default]
    Payment,
    Refund,
    PreAuth,
    Capture,
    AccountVerification,
}

/// Payment collection frequency for a customer schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Frequency {
    Weekly,
    Fortnightly,
    Monthly,
    Quarterly,
    SixMonthly,
    Yearly,
}

/// Credit card details submitted for tokenization
///
/// Never stored by this client; the gateway returns a single-use token.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub card_number: String,
    pub cvn: String,
    pub cardholder_name: String,
    pub expiry_date_month: String,
    /// Two-digit year
    pub expiry_date_year: String,
}

/// Bank account details submitted for tokenization
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BankAccount {
    /// Name used to open the account
    pub account_name: String,
    pub bsb: String,
    pub account_number: String,
}

/// Customer profile sent when creating or updating a customer
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Your own customer number. Path-only: when set, creation goes through
    /// `PUT /customers/{custom_id}` instead of letting PayWay allocate one.
    #[serde(skip)]
    pub custom_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
    pub send_email_receipts: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    /// Single-use token holding the payment setup
    #[serde(rename = "singleUseTokenId", skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_field_1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_field_2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_field_3: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_field_4: Option<String>,
}

/// An individual payment to process against a customer
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub transaction_type: TransactionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_number: Option<String>,
    /// Amount before any surcharge. Negative for a refund.
    #[serde(rename = "principalAmount", skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Your reference, at most 20 ASCII characters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_number: Option<String>,
    #[serde(rename = "customerIpAddress", skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    /// Transaction id of the pre-authorisation being captured or refunded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_transaction_id: Option<i64>,
    #[serde(rename = "singleUseTokenId", skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_id: Option<String>,
}

/// Regular payment schedule to install for a customer
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentScheduleRequest {
    pub frequency: Frequency,
    /// `dd MMM yyyy`, the date the next payment is collected
    pub next_payment_date: String,
    /// Usual amount for payments
    #[serde(rename = "regularPrincipalAmount")]
    pub regular_amount: f64,
    /// Different amount for the next payment only
    #[serde(rename = "nextPrincipalAmount", skip_serializing_if = "Option::is_none")]
    pub next_amount: Option<f64>,
}

// -- Response types --

/// Result of tokenizing a card or bank account
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    #[serde(rename = "singleUseTokenId")]
    pub token: String,
    pub payment_method: Option<PaymentMethod>,
    pub credit_card: Option<StoredCard>,
}

/// Card details as echoed back by the gateway, number masked
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredCard {
    pub masked_card_number: Option<String>,
    pub card_number: Option<String>,
    pub cvn: Option<String>,
    pub cardholder_name: Option<String>,
    pub expiry_date_month: Option<String>,
    pub expiry_date_year: Option<String>,
}

impl StoredCard {
    /// Displayable number, preferring the masked form
    pub fn number(&self) -> Option<&str> {
        self.masked_card_number
            .as_deref()
            .or(self.card_number.as_deref())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street1: Option<String>,
    pub street2: Option<String>,
    pub city_name: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
}

/// Customer contact block within a customer record
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub customer_name: Option<String>,
    pub email_address: Option<String>,
    pub send_email_receipts: Option<bool>,
    pub phone_number: Option<String>,
    pub address: Option<Address>,
}

/// Full customer record: payment setup, schedule, contact and custom fields
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetails {
    pub customer_number: Option<String>,
    pub contact: Option<Contact>,
    pub payment_setup: Option<PaymentSetup>,
    pub custom_fields: Option<serde_json::Value>,
    pub notes: Option<String>,
}

/// The stored card or bank account payments are collected from
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSetup {
    pub payment_method: Option<PaymentMethod>,
    /// Whether new payments are currently stopped
    pub stopped: Option<bool>,
    pub credit_card: Option<StoredCard>,
    pub merchant: Option<Merchant>,
}

/// Merchant facility and settlement accounts
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Merchant {
    pub merchant_id: Option<String>,
    pub merchant_name: Option<String>,
    pub settlement_bsb: Option<String>,
    pub settlement_account_number: Option<String>,
    pub surcharge_bsb: Option<String>,
    pub surcharge_account_number: Option<String>,
}

/// One processed transaction as reported by the gateway
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub transaction_id: Option<i64>,
    pub receipt_number: Option<String>,
    /// approved, declined, pending, voided, refunded, ...
    pub status: Option<String>,
    /// Card-network response code (see the Transaction error family)
    pub response_code: Option<String>,
    pub response_text: Option<String>,
    pub transaction_type: Option<TransactionType>,
    pub customer_number: Option<String>,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub order_number: Option<String>,
    pub currency: Option<String>,
    pub principal_amount: Option<f64>,
    pub surcharge_amount: Option<f64>,
    pub payment_amount: Option<f64>,
    /// Broader than tokenization methods: bpay, virtual accounts, ...
    pub payment_method: Option<String>,
    pub credit_card: Option<StoredCard>,
    pub merchant: Option<Merchant>,
    pub virtual_account: Option<serde_json::Value>,
    pub australia_post: Option<serde_json::Value>,
    pub bpay: Option<serde_json::Value>,
    pub your_bank_account: Option<serde_json::Value>,
    pub customer_pay_pal_account: Option<serde_json::Value>,
    pub your_pay_pal_account: Option<serde_json::Value>,
    pub transaction_date_time: Option<String>,
    pub user: Option<String>,
    pub settlement_date: Option<String>,
    pub declined_date: Option<String>,
    pub parent_transaction: Option<serde_json::Value>,
    #[serde(rename = "customerIpAddress")]
    pub ip_address: Option<String>,
    pub fraud_result: Option<String>,
    #[serde(rename = "customerIpCountry")]
    pub ip_country: Option<String>,
    pub card_country: Option<String>,
    pub custom_fields: Option<serde_json::Value>,
    pub is_voidable: Option<bool>,
    pub is_refundable: Option<bool>,
}

/// Schedule as confirmed by the gateway
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSchedule {
    pub frequency: Option<Frequency>,
    pub next_payment_date: Option<String>,
    #[serde(rename = "regularPrincipalAmount")]
    pub regular_amount: Option<f64>,
    #[serde(rename = "nextPrincipalAmount")]
    pub next_amount: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSummary {
    pub customer_number: Option<String>,
    pub customer_name: Option<String>,
}

/// Paginated customer listing
#[derive(Debug, Clone, Deserialize)]
pub struct CustomerList {
    #[serde(default)]
    pub data: Vec<CustomerSummary>,
}

/// Paginated transaction search result
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionList {
    #[serde(default)]
    pub data: Vec<Transaction>,
}
