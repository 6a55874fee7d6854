use payway_core::PaywayError;
use url::Url;

/// Production REST endpoint
pub const PAYWAY_API_URL: &str = "https://api.payway.com.au/rest/v1";

/// Environment variable holding the secret API key
pub const SECRET_API_KEY_ENV: &str = "PAYWAY_SECRET_API_KEY";

/// Environment variable holding the publishable API key
pub const PUBLISHABLE_API_KEY_ENV: &str = "PAYWAY_PUBLISHABLE_API_KEY";

/// Read both API keys from the conventional environment variables
pub fn keys_from_env() -> Option<(String, String)> {
    let secret = std::env::var(SECRET_API_KEY_ENV).ok()?;
    let publishable = std::env::var(PUBLISHABLE_API_KEY_ENV).ok()?;
    Some((secret, publishable))
}

/// Resource URL builder over a gateway base
///
/// PayWay has a single production host; a different base is only for tests
/// or a future sandbox.
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    /// Production PayWay endpoints
    pub fn production() -> Self {
        Self::with_base(Url::parse(PAYWAY_API_URL).expect("production URL is valid"))
    }

    /// Point at a different gateway base
    pub fn with_base(base: Url) -> Self {
        Self { base }
    }

    fn make(&self, path: &str) -> Url {
        let mut url = self.base.clone();
        url.set_path(&format!("{}/{path}", self.base.path().trim_end_matches('/')));
        url
    }

    pub fn single_use_tokens(&self) -> Url {
        self.make("single-use-tokens")
    }

    pub fn customers(&self) -> Url {
        self.make("customers")
    }

    pub fn customer(&self, customer_number: &str) -> Url {
        self.make(&format!("customers/{customer_number}"))
    }

    pub fn customer_schedule(&self, customer_number: &str) -> Url {
        self.make(&format!("customers/{customer_number}/schedule"))
    }

    pub fn customer_payment_setup(&self, customer_number: &str) -> Url {
        self.make(&format!("customers/{customer_number}/payment-setup"))
    }

    pub fn customer_contact(&self, customer_number: &str) -> Url {
        self.make(&format!("customers/{customer_number}/contact"))
    }

    pub fn transactions(&self) -> Url {
        self.make("transactions")
    }

    pub fn transaction(&self, transaction_id: i64) -> Url {
        self.make(&format!("transactions/{transaction_id}"))
    }

    pub fn transaction_void(&self, transaction_id: i64) -> Url {
        self.make(&format!("transactions/{transaction_id}/void"))
    }

    /// Transactions URL with a caller-supplied path-and-query suffix,
    /// e.g. `/search-customer?customerNumber=990`
    pub fn transactions_query(&self, suffix: &str) -> Result<Url, PaywayError> {
        Url::parse(&format!("{}{suffix}", self.transactions()))
            .map_err(|_| PaywayError::from_catalog("S9990"))
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::production()
    }
}
