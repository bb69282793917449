use api_types::{
    Envelope, ErrorBody,
    account::{AccountLookup, AccountView},
    sacco::{SaccoLookup, SaccoView},
    transaction::{TransactionCreated, TransactionNew},
};
use reqwest::{Response, Url};
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    AuthSession,
    error::{ClientError, Result},
};

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    auth: AuthSession,
}

impl ApiClient {
    pub fn new(base_url: &str, auth: AuthSession) -> Result<Self> {
        Self::with_http(reqwest::Client::new(), base_url, auth)
    }

    pub fn with_http(http: reqwest::Client, base_url: &str, auth: AuthSession) -> Result<Self> {
        // A trailing slash keeps any path prefix (`/api`) when joining endpoints.
        let normalized = format!("{}/", base_url.trim().trim_end_matches('/'));
        let base_url =
            Url::parse(&normalized).map_err(|err| ClientError::InvalidBaseUrl(err.to_string()))?;
        Ok(Self {
            http,
            base_url,
            auth,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|err| ClientError::InvalidBaseUrl(err.to_string()))
    }

    async fn get_json<Q, T>(&self, path: &str, query: &Q) -> Result<T>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let res = self
            .http
            .get(self.endpoint(path)?)
            .bearer_auth(self.auth.token())
            .query(query)
            .send()
            .await?;
        read_entity(res).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let res = self
            .http
            .post(self.endpoint(path)?)
            .bearer_auth(self.auth.token())
            .json(body)
            .send()
            .await?;
        read_entity(res).await
    }

    /// `POST /transactions`. One attempt, never retried.
    pub async fn create_transaction(&self, body: &TransactionNew) -> Result<TransactionCreated> {
        tracing::debug!(
            "creating {:?} transaction with {} entries for sacco {}",
            body.transaction_type,
            body.entries.len(),
            body.sacco_ref
        );
        self.post_json("transactions", body).await
    }

    /// `GET /accounts/lookup`, optionally scoped to one sacco.
    pub async fn lookup_accounts(
        &self,
        query: &str,
        sacco_ref: Option<&str>,
    ) -> Result<Vec<AccountView>> {
        let query = AccountLookup {
            query: query.to_string(),
            sacco_ref: sacco_ref.map(str::to_string),
        };
        self.get_json("accounts/lookup", &query).await
    }

    /// `GET /saccos/lookup`.
    pub async fn lookup_saccos(&self, query: &str) -> Result<Vec<SaccoView>> {
        let query = SaccoLookup {
            query: query.to_string(),
        };
        self.get_json("saccos/lookup", &query).await
    }
}

/// Unwraps the `{"entity": ...}` envelope of a success response, or turns an
/// error response into [`ClientError::Api`] with the server's message.
async fn read_entity<T: DeserializeOwned>(res: Response) -> Result<T> {
    let status = res.status();
    let bytes = res.bytes().await?;

    if status.is_success() {
        return serde_json::from_slice::<Envelope<T>>(&bytes)
            .map(|envelope| envelope.entity)
            .map_err(|err| ClientError::MalformedResponse(err.to_string()));
    }

    let message = match serde_json::from_slice::<ErrorBody>(&bytes) {
        Ok(body) => body.error,
        Err(_) => {
            let text = String::from_utf8_lossy(&bytes).trim().to_string();
            if text.is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string()
            } else {
                text
            }
        }
    };
    Err(ClientError::Api { status, message })
}
