use std::time::Duration;

use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;

use payway_core::{Classification, FieldError, PaywayError, RawResponse, classify};

use crate::config::Endpoints;
use crate::types::{
    BankAccount, Card, Contact, Customer, CustomerDetails, CustomerList, Payment, PaymentMethod,
    PaymentSchedule, PaymentScheduleRequest, PaymentSetup, TokenResponse, Transaction,
    TransactionList, TransactionType,
};

/// Requests are issued with a fixed per-call timeout; retry orchestration is
/// the caller's concern (thread an idempotency key through for safe POSTs).
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Outcome of one gateway call
///
/// Terminal transport failures are `Err` on the surrounding `Result`.
/// Documented validation problems arrive here as data, so expected,
/// user-actionable failures never unwind the caller.
#[derive(Debug)]
pub enum ApiOutcome<T> {
    /// Parsed success payload
    Ok(T),
    /// Documented field-level problems, verbatim from the gateway.
    /// May be empty; an empty list is still not a success payload.
    Invalid(Vec<FieldError>),
}

impl<T> ApiOutcome<T> {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }

    /// The payload, discarding any validation errors
    pub fn ok(self) -> Option<T> {
        match self {
            Self::Ok(value) => Some(value),
            Self::Invalid(_) => None,
        }
    }

    /// The payload, or the validation error list
    pub fn into_result(self) -> Result<T, Vec<FieldError>> {
        match self {
            Self::Ok(value) => Ok(value),
            Self::Invalid(errors) => Err(errors),
        }
    }
}

/// Typed client for the PayWay REST API
///
/// Wraps tokenization, customer management, transaction processing and
/// scheduled billing. Every operation marshals a request, classifies the
/// response and unmarshals the payload; no state is kept between calls.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    endpoints: Endpoints,
    merchant_id: String,
    bank_account_id: String,
    secret_api_key: SecretString,
    publishable_api_key: SecretString,
}

impl Client {
    /// Create a client for a merchant facility
    ///
    /// # Errors
    ///
    /// Returns `INVALID_API_KEYS` when either API key is empty, and
    /// `INVALID_API_CREDENTIALS` when the merchant or bank account
    /// identifiers are.
    pub fn new(
        merchant_id: &str,
        bank_account_id: &str,
        secret_api_key: &str,
        publishable_api_key: &str,
    ) -> Result<Self, PaywayError> {
        if secret_api_key.is_empty() || publishable_api_key.is_empty() {
            tracing::error!("PayWay API keys not found");
            return Err(PaywayError::new("INVALID_API_KEYS", "PayWay API keys not found"));
        }
        if merchant_id.is_empty() || bank_account_id.is_empty() {
            tracing::error!("merchant ID or bank account ID missing");
            return Err(PaywayError::new("INVALID_API_CREDENTIALS", "Invalid credentials"));
        }

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            endpoints: Endpoints::production(),
            merchant_id: merchant_id.to_owned(),
            bank_account_id: bank_account_id.to_owned(),
            secret_api_key: SecretString::from(secret_api_key.to_owned()),
            publishable_api_key: SecretString::from(publishable_api_key.to_owned()),
        })
    }

    /// Use different endpoints (a test server, or a future sandbox)
    #[must_use]
    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    // -- Tokenization --

    /// Create a single-use token for a credit card
    pub async fn create_card_token(
        &self,
        card: &Card,
        idempotency_key: Option<&str>,
    ) -> Result<ApiOutcome<TokenResponse>, PaywayError> {
        self.tokenize(card, PaymentMethod::CreditCard, idempotency_key)
            .await
    }

    /// Create a single-use token for a bank account (direct debit)
    pub async fn create_bank_account_token(
        &self,
        account: &BankAccount,
        idempotency_key: Option<&str>,
    ) -> Result<ApiOutcome<TokenResponse>, PaywayError> {
        self.tokenize(account, PaymentMethod::BankAccount, idempotency_key)
            .await
    }

    // Tokenization authenticates with the publishable key: it is the one
    // call made on behalf of a customer-facing page.
    async fn tokenize<T: Serialize>(
        &self,
        source: &T,
        payment_method: PaymentMethod,
        idempotency_key: Option<&str>,
    ) -> Result<ApiOutcome<TokenResponse>, PaywayError> {
        let mut fields = form_fields(source)?;
        fields.push(("paymentMethod".to_owned(), wire_name(&payment_method)?));

        tracing::info!("sending create token request to PayWay");
        let builder = self
            .request(
                Method::POST,
                self.endpoints.single_use_tokens(),
                &self.publishable_api_key,
            )
            .form(&fields);
        let raw = self.send(idempotent(builder, idempotency_key)).await?;
        outcome(&raw)
    }

    // -- Customers --

    /// Create a customer with an active payment setup
    ///
    /// `POST /customers` lets PayWay allocate the customer number; setting
    /// [`Customer::custom_id`] switches to `PUT /customers/{id}` with your
    /// own number.
    pub async fn create_customer(
        &self,
        customer: &Customer,
        idempotency_key: Option<&str>,
    ) -> Result<ApiOutcome<CustomerDetails>, PaywayError> {
        let mut fields = form_fields(customer)?;
        fields.push(("merchantId".to_owned(), self.merchant_id.clone()));
        fields.push(("bankAccountId".to_owned(), self.bank_account_id.clone()));

        tracing::info!("sending create customer request to PayWay");
        let raw = if let Some(custom_id) = customer.custom_id.as_deref() {
            let builder = self
                .request(Method::PUT, self.endpoints.customer(custom_id), &self.secret_api_key)
                .form(&fields);
            self.send(builder).await?
        } else {
            let builder = self
                .request(Method::POST, self.endpoints.customers(), &self.secret_api_key)
                .form(&fields);
            self.send(idempotent(builder, idempotency_key)).await?
        };
        outcome(&raw)
    }

    /// Fetch a customer's payment setup, schedule, contact details and notes
    pub async fn get_customer(
        &self,
        customer_number: &str,
    ) -> Result<ApiOutcome<CustomerDetails>, PaywayError> {
        let raw = self
            .send(self.request(
                Method::GET,
                self.endpoints.customer(customer_number),
                &self.secret_api_key,
            ))
            .await?;
        outcome(&raw)
    }

    /// Replace a customer's stored card or bank account with a new token
    pub async fn update_payment_setup(
        &self,
        token: &str,
        customer_number: &str,
    ) -> Result<ApiOutcome<PaymentSetup>, PaywayError> {
        let fields = [
            ("singleUseTokenId", token),
            ("merchantId", &self.merchant_id),
            ("bankAccountId", &self.bank_account_id),
        ];
        let raw = self
            .send(
                self.request(
                    Method::PUT,
                    self.endpoints.customer_payment_setup(customer_number),
                    &self.secret_api_key,
                )
                .form(&fields),
            )
            .await?;
        outcome(&raw)
    }

    /// Delete a customer; success is a 204 with no payload
    pub async fn delete_customer(
        &self,
        customer_number: &str,
    ) -> Result<ApiOutcome<()>, PaywayError> {
        let raw = self
            .send(self.request(
                Method::DELETE,
                self.endpoints.customer(customer_number),
                &self.secret_api_key,
            ))
            .await?;
        outcome_unit(&raw)
    }

    /// Install a regular payment schedule for a customer
    pub async fn schedule_payments(
        &self,
        customer_number: &str,
        schedule: &PaymentScheduleRequest,
    ) -> Result<ApiOutcome<PaymentSchedule>, PaywayError> {
        let fields = form_fields(schedule)?;
        let raw = self
            .send(
                self.request(
                    Method::PUT,
                    self.endpoints.customer_schedule(customer_number),
                    &self.secret_api_key,
                )
                .form(&fields),
            )
            .await?;
        outcome(&raw)
    }

    /// Remove a customer's payment schedule
    pub async fn stop_schedule(
        &self,
        customer_number: &str,
    ) -> Result<ApiOutcome<()>, PaywayError> {
        let raw = self
            .send(self.request(
                Method::DELETE,
                self.endpoints.customer_schedule(customer_number),
                &self.secret_api_key,
            ))
            .await?;
        outcome_unit(&raw)
    }

    /// Stop any new payments from the stored card or bank account
    pub async fn stop_all_payments(
        &self,
        customer_number: &str,
    ) -> Result<ApiOutcome<PaymentSetup>, PaywayError> {
        self.set_payments_stopped(customer_number, true).await
    }

    /// Allow new payments from the stored card or bank account again
    pub async fn start_all_payments(
        &self,
        customer_number: &str,
    ) -> Result<ApiOutcome<PaymentSetup>, PaywayError> {
        self.set_payments_stopped(customer_number, false).await
    }

    async fn set_payments_stopped(
        &self,
        customer_number: &str,
        stopped: bool,
    ) -> Result<ApiOutcome<PaymentSetup>, PaywayError> {
        let fields = [("stopped", if stopped { "true" } else { "false" })];
        let raw = self
            .send(
                self.request(
                    Method::PATCH,
                    self.endpoints.customer_payment_setup(customer_number),
                    &self.secret_api_key,
                )
                .form(&fields),
            )
            .await?;
        outcome(&raw)
    }

    /// Update a customer's contact details
    pub async fn update_contact_details(
        &self,
        customer_number: &str,
        contact: &Customer,
    ) -> Result<ApiOutcome<Contact>, PaywayError> {
        let fields = form_fields(contact)?;
        let raw = self
            .send(
                self.request(
                    Method::PUT,
                    self.endpoints.customer_contact(customer_number),
                    &self.secret_api_key,
                )
                .form(&fields),
            )
            .await?;
        outcome(&raw)
    }

    /// List customers (paginated customer number and name)
    pub async fn list_customers(&self) -> Result<ApiOutcome<CustomerList>, PaywayError> {
        let raw = self
            .send(self.request(Method::GET, self.endpoints.customers(), &self.secret_api_key))
            .await?;
        outcome(&raw)
    }

    // -- Transactions --

    /// Process an individual payment against a customer
    pub async fn process_payment(
        &self,
        payment: &Payment,
        idempotency_key: Option<&str>,
    ) -> Result<ApiOutcome<Transaction>, PaywayError> {
        let fields = form_fields(payment)?;

        tracing::info!("sending process payment request to PayWay");
        let builder = self
            .request(Method::POST, self.endpoints.transactions(), &self.secret_api_key)
            .form(&fields);
        let raw = self.send(idempotent(builder, idempotency_key)).await?;
        outcome(&raw)
    }

    /// Look up a transaction by id
    pub async fn get_transaction(
        &self,
        transaction_id: i64,
    ) -> Result<ApiOutcome<Transaction>, PaywayError> {
        let raw = self
            .send(self.request(
                Method::GET,
                self.endpoints.transaction(transaction_id),
                &self.secret_api_key,
            ))
            .await?;
        outcome(&raw)
    }

    /// Void a transaction before settlement
    pub async fn void_transaction(
        &self,
        transaction_id: i64,
        idempotency_key: Option<&str>,
    ) -> Result<ApiOutcome<Transaction>, PaywayError> {
        let builder = self
            .request(
                Method::POST,
                self.endpoints.transaction_void(transaction_id),
                &self.secret_api_key,
            )
            .form::<[(&str, &str); 0]>(&[]);
        let raw = self.send(idempotent(builder, idempotency_key)).await?;
        outcome(&raw)
    }

    /// Refund a settled transaction
    ///
    /// Issued as a `refund` transaction against the parent; the response is
    /// parsed the same way as every other transaction.
    pub async fn refund_transaction(
        &self,
        transaction_id: i64,
        amount: f64,
        order_number: Option<&str>,
        ip_address: Option<&str>,
        idempotency_key: Option<&str>,
    ) -> Result<ApiOutcome<Transaction>, PaywayError> {
        let refund = Payment {
            transaction_type: TransactionType::Refund,
            parent_transaction_id: Some(transaction_id),
            amount: Some(amount),
            order_number: order_number.map(str::to_owned),
            ip_address: ip_address.map(str::to_owned),
            ..Payment::default()
        };
        self.process_payment(&refund, idempotency_key).await
    }

    /// Search transactions with a raw path-and-query suffix,
    /// e.g. `/search-customer?customerNumber=990`
    pub async fn search_transactions(
        &self,
        query: &str,
    ) -> Result<ApiOutcome<TransactionList>, PaywayError> {
        let url = self.endpoints.transactions_query(query)?;
        let raw = self
            .send(self.request(Method::GET, url, &self.secret_api_key))
            .await?;
        outcome(&raw)
    }

    // -- Plumbing --

    fn request(
        &self,
        method: Method,
        url: url::Url,
        api_key: &SecretString,
    ) -> reqwest::RequestBuilder {
        self.http
            .request(method, url)
            .basic_auth(api_key.expose_secret(), Some(""))
    }

    // Snapshot the exchange so classification runs on already-received data.
    async fn send(&self, builder: reqwest::RequestBuilder) -> Result<RawResponse, PaywayError> {
        let response = builder.send().await?;
        let status = response.status();
        let reason = status.canonical_reason().unwrap_or_default().to_owned();
        let url = response.url().to_string();
        let body = response.text().await?;
        Ok(RawResponse {
            status: status.as_u16(),
            reason,
            url,
            body,
        })
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("merchant_id", &self.merchant_id)
            .field("bank_account_id", &self.bank_account_id)
            .finish_non_exhaustive()
    }
}

fn idempotent(
    builder: reqwest::RequestBuilder,
    idempotency_key: Option<&str>,
) -> reqwest::RequestBuilder {
    match idempotency_key {
        Some(key) => builder.header("Idempotency-Key", key),
        None => builder,
    }
}

// Flat key=value pairs with unset fields omitted, the form PayWay expects.
fn form_fields<T: Serialize>(value: &T) -> Result<Vec<(String, String)>, PaywayError> {
    let serde_json::Value::Object(map) =
        serde_json::to_value(value).map_err(|_| PaywayError::from_catalog("S9995"))?
    else {
        return Err(PaywayError::from_catalog("S9995"));
    };
    Ok(map
        .into_iter()
        .filter_map(|(key, value)| match value {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some((key, s)),
            other => Some((key, other.to_string())),
        })
        .collect())
}

// Wire name of a unit enum variant.
fn wire_name<T: Serialize>(value: &T) -> Result<String, PaywayError> {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(s)) => Ok(s),
        _ => Err(PaywayError::from_catalog("S9995")),
    }
}

fn outcome<T: DeserializeOwned>(raw: &RawResponse) -> Result<ApiOutcome<T>, PaywayError> {
    match classify(raw)? {
        Classification::Validation(errors) => Ok(ApiOutcome::Invalid(errors)),
        Classification::Success => parse_entity(raw).map(ApiOutcome::Ok),
    }
}

// For operations whose success is a 204 with no payload to parse.
fn outcome_unit(raw: &RawResponse) -> Result<ApiOutcome<()>, PaywayError> {
    match classify(raw)? {
        Classification::Validation(errors) => Ok(ApiOutcome::Invalid(errors)),
        Classification::Success => Ok(ApiOutcome::Ok(())),
    }
}

fn parse_entity<T: DeserializeOwned>(raw: &RawResponse) -> Result<T, PaywayError> {
    if raw.body.trim().is_empty() {
        return Err(PaywayError::from_catalog("S9902"));
    }
    serde_json::from_str(&raw.body).map_err(|e| {
        let base = PaywayError::from_catalog("S9995");
        PaywayError::new(base.code().to_owned(), format!("{} ({e})", base.message()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use url::Url;
    use wiremock::matchers::{body_string_contains, header, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::types::Frequency;

    fn test_client(base: &str) -> Client {
        Client::new("TEST", "0000000A", "TSECRET-KEY", "TPUBLISHABLE-KEY")
            .unwrap()
            .with_endpoints(Endpoints::with_base(Url::parse(base).unwrap()))
    }

    fn test_card() -> Card {
        Card {
            card_number: "4564710000000004".to_owned(),
            cvn: "847".to_owned(),
            cardholder_name: "Test".to_owned(),
            expiry_date_month: "02".to_owned(),
            expiry_date_year: "29".to_owned(),
        }
    }

    #[test]
    fn missing_api_keys_are_rejected_first() {
        let err = Client::new("", "", "", "").unwrap_err();
        assert_eq!(err.code(), "INVALID_API_KEYS");

        let err = Client::new("", "", "sk", "pk").unwrap_err();
        assert_eq!(err.code(), "INVALID_API_CREDENTIALS");

        assert!(Client::new("TEST", "0000000A", "sk", "pk").is_ok());
    }

    #[tokio::test]
    async fn create_card_token_posts_the_card_form() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/single-use-tokens"))
            .and(header_exists("Authorization"))
            .and(body_string_contains("cardNumber=4564710000000004"))
            .and(body_string_contains("paymentMethod=creditCard"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "singleUseTokenId": "5bme7s8cgzsnuew2mmwxw",
                "paymentMethod": "creditCard",
                "creditCard": {
                    "maskedCardNumber": "456471...004",
                    "expiryDateMonth": "02",
                    "expiryDateYear": "29"
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let token = client
            .create_card_token(&test_card(), None)
            .await
            .unwrap()
            .ok()
            .expect("token response");

        assert_eq!(token.token, "5bme7s8cgzsnuew2mmwxw");
        assert_eq!(token.payment_method, Some(PaymentMethod::CreditCard));
    }

    #[tokio::test]
    async fn bank_account_tokenization_sends_the_bank_method() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/single-use-tokens"))
            .and(body_string_contains("bsb=000-000"))
            .and(body_string_contains("paymentMethod=bankAccount"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "singleUseTokenId": "bank-token-1",
                "paymentMethod": "bankAccount"
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let account = BankAccount {
            account_name: "Test".to_owned(),
            bsb: "000-000".to_owned(),
            account_number: "123456".to_owned(),
        };
        let token = client
            .create_bank_account_token(&account, None)
            .await
            .unwrap()
            .ok()
            .expect("token response");
        assert_eq!(token.token, "bank-token-1");
    }

    #[tokio::test]
    async fn create_customer_posts_and_merges_merchant_fields() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/customers"))
            .and(body_string_contains("merchantId=TEST"))
            .and(body_string_contains("bankAccountId=0000000A"))
            .and(body_string_contains("singleUseTokenId=tok-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "customerNumber": "990",
                "contact": { "customerName": "John Smith" }
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let customer = Customer {
            customer_name: Some("John Smith".to_owned()),
            token: Some("tok-1".to_owned()),
            ..Customer::default()
        };
        let details = client
            .create_customer(&customer, None)
            .await
            .unwrap()
            .ok()
            .expect("customer details");
        assert_eq!(details.customer_number.as_deref(), Some("990"));
    }

    #[tokio::test]
    async fn custom_id_switches_creation_to_put() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/customers/c981a"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "customerNumber": "c981a"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let customer = Customer {
            custom_id: Some("c981a".to_owned()),
            customer_name: Some("John Smith".to_owned()),
            ..Customer::default()
        };
        let details = client
            .create_customer(&customer, None)
            .await
            .unwrap()
            .ok()
            .expect("customer details");
        assert_eq!(details.customer_number.as_deref(), Some("c981a"));
    }

    #[tokio::test]
    async fn idempotency_key_is_sent_when_supplied() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/transactions"))
            .and(header("Idempotency-Key", "a9f25b31"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "transactionId": 1, "status": "approved"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let payment = Payment {
            customer_number: Some("990".to_owned()),
            amount: Some(10.0),
            currency: Some("aud".to_owned()),
            ..Payment::default()
        };
        let outcome = client
            .process_payment(&payment, Some("a9f25b31"))
            .await
            .unwrap();
        assert!(outcome.is_ok());
    }

    #[tokio::test]
    async fn process_payment_parses_the_transaction() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/transactions"))
            .and(body_string_contains("transactionType=payment"))
            .and(body_string_contains("principalAmount=10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "transactionId": 1_179_985_404,
                "receiptNumber": "1179985404",
                "status": "approved",
                "responseCode": "08",
                "transactionType": "payment",
                "principalAmount": 10.0
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let payment = Payment {
            customer_number: Some("990".to_owned()),
            amount: Some(10.0),
            currency: Some("aud".to_owned()),
            order_number: Some("5100".to_owned()),
            ip_address: Some("127.0.0.1".to_owned()),
            ..Payment::default()
        };
        let transaction = client
            .process_payment(&payment, None)
            .await
            .unwrap()
            .ok()
            .expect("transaction");
        assert_eq!(transaction.status.as_deref(), Some("approved"));
        assert_eq!(transaction.response_code.as_deref(), Some("08"));
    }

    #[tokio::test]
    async fn validation_errors_come_back_as_data() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/single-use-tokens"))
            .respond_with(ResponseTemplate::new(422).set_body_json(serde_json::json!({
                "data": [{
                    "fieldName": "expiryDateMonth",
                    "message": "Invalid expiry date",
                    "fieldValue": "15"
                }]
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let errors = client
            .create_card_token(&test_card(), None)
            .await
            .unwrap()
            .into_result()
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field_name.as_deref(), Some("expiryDateMonth"));
        assert_eq!(errors[0].field_value.as_deref(), Some("15"));
    }

    #[tokio::test]
    async fn documented_client_errors_raise() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/customers/990"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.get_customer("990").await.unwrap_err();
        assert_eq!(err.code(), "401");
        assert!(err.message().starts_with("401 Client Error: Unauthorized for url:"));
    }

    #[tokio::test]
    async fn server_faults_quote_the_gateway_identifiers() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/transactions/7"))
            .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
                "errorNumber": "123", "traceCode": "abc"
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.get_transaction(7).await.unwrap_err();
        assert_eq!(err.code(), "500");
        assert_eq!(err.message(), "Error number: 123 Trace code: abc");
    }

    #[tokio::test]
    async fn unparseable_server_errors_are_generic() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/transactions/7"))
            .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.get_transaction(7).await.unwrap_err();
        assert_eq!(err.to_string(), "500: Internal server error");
    }

    #[tokio::test]
    async fn delete_customer_treats_204_as_success() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/customers/990"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let outcome = client.delete_customer("990").await.unwrap();
        assert!(outcome.is_ok());
    }

    #[tokio::test]
    async fn schedule_payments_puts_the_schedule_form() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/customers/990/schedule"))
            .and(body_string_contains("frequency=monthly"))
            .and(body_string_contains("regularPrincipalAmount=50"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "frequency": "monthly",
                "nextPaymentDate": "21 Aug 2026",
                "regularPrincipalAmount": 50.5
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let schedule = PaymentScheduleRequest {
            frequency: Frequency::Monthly,
            next_payment_date: "21 Aug 2026".to_owned(),
            regular_amount: 50.5,
            next_amount: None,
        };
        let confirmed = client
            .schedule_payments("990", &schedule)
            .await
            .unwrap()
            .ok()
            .expect("schedule");
        assert_eq!(confirmed.frequency, Some(Frequency::Monthly));
        assert_eq!(confirmed.regular_amount, Some(50.5));
    }

    #[tokio::test]
    async fn stop_all_payments_patches_the_stopped_flag() {
        let server = MockServer::start().await;

        Mock::given(method("PATCH"))
            .and(path("/customers/990/payment-setup"))
            .and(body_string_contains("stopped=true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "paymentMethod": "creditCard",
                "stopped": true
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let setup = client
            .stop_all_payments("990")
            .await
            .unwrap()
            .ok()
            .expect("payment setup");
        assert_eq!(setup.stopped, Some(true));
    }

    #[tokio::test]
    async fn refund_goes_through_the_transactions_endpoint() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/transactions"))
            .and(body_string_contains("transactionType=refund"))
            .and(body_string_contains("parentTransactionId=1179985404"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "transactionId": 1_179_985_405,
                "status": "refunded",
                "transactionType": "refund"
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let transaction = client
            .refund_transaction(1_179_985_404, 10.0, Some("5100"), None, None)
            .await
            .unwrap()
            .ok()
            .expect("refund transaction");
        assert_eq!(transaction.transaction_type, Some(TransactionType::Refund));
    }

    #[tokio::test]
    async fn search_transactions_appends_the_query_suffix() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/transactions/search-customer"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{ "transactionId": 1, "status": "approved" }]
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let list = client
            .search_transactions("/search-customer?customerNumber=990")
            .await
            .unwrap()
            .ok()
            .expect("transaction list");
        assert_eq!(list.data.len(), 1);
    }

    #[tokio::test]
    async fn empty_success_body_where_an_entity_is_expected_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/customers/990"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.get_customer("990").await.unwrap_err();
        assert_eq!(err.code(), "S9902");
    }
}
