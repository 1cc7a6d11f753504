use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::application::{ListingLog, SecretsProvider};
use crate::domain::{DomainError, LogRow};

/// Secret key holding the service-account JSON blob.
pub const SERVICE_ACCOUNT_SECRET: &str = "GCP_SERVICE_ACCOUNT";
/// Spreadsheet the log rows go to, unless overridden.
pub const DEFAULT_SPREADSHEET_NAME: &str = "DB_BienDit_MVP";

const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const DRIVE_FILES_URL: &str = "https://www.googleapis.com/drive/v3/files";
const SHEETS_BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";
const SCOPES: &str =
    "https://www.googleapis.com/auth/spreadsheets https://www.googleapis.com/auth/drive";
const JWT_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const ASSERTION_LIFETIME_SECS: u64 = 3600;
/// Refresh the cached token this long before it actually expires.
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// The subset of a Google service-account JSON file we need.
#[derive(Deserialize)]
struct ServiceAccount {
    client_email: String,
    private_key: String,
}

#[derive(Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: u64,
    exp: u64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

#[derive(Deserialize)]
struct DriveFile {
    id: String,
}

#[derive(Serialize)]
struct AppendRequest {
    values: Vec<Vec<serde_json::Value>>,
}

struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

impl CachedToken {
    fn is_valid(&self) -> bool {
        Instant::now() + TOKEN_EXPIRY_MARGIN < self.expires_at
    }
}

/// Lazily-initialized remote handle: resolved spreadsheet id plus the
/// current access token. Both survive across appends within the process.
#[derive(Default)]
struct SheetsState {
    token: Option<CachedToken>,
    spreadsheet_id: Option<String>,
}

/// [`ListingLog`] appending rows to the first sheet of a named Google
/// spreadsheet.
///
/// The first successful append exchanges a service-account JWT for an access
/// token and resolves the spreadsheet by name through the Drive files query;
/// both results are memoized behind a mutex and reused by later appends.
/// Losing the race just re-authenticates, it never corrupts the handle.
///
/// Every error maps to [`DomainError::Log`] (or `MissingSecret` when the
/// service-account blob is absent); callers treat either as "logging
/// unavailable" and keep going.
pub struct SheetsListingLog {
    client: reqwest::Client,
    secrets: Arc<dyn SecretsProvider>,
    spreadsheet_name: String,
    state: tokio::sync::Mutex<SheetsState>,
}

impl SheetsListingLog {
    pub fn new(secrets: Arc<dyn SecretsProvider>, spreadsheet_name: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            secrets,
            spreadsheet_name: spreadsheet_name.into(),
            state: tokio::sync::Mutex::new(SheetsState::default()),
        }
    }

    fn service_account(&self) -> Result<ServiceAccount, DomainError> {
        let blob = self.secrets.get(SERVICE_ACCOUNT_SECRET)?;
        serde_json::from_str(&blob).map_err(|e| {
            DomainError::log(format!(
                "{SERVICE_ACCOUNT_SECRET} is not valid service-account JSON: {e}"
            ))
        })
    }

    /// RS256-signed JWT asserting the service-account identity and scopes.
    fn signed_assertion(&self, account: &ServiceAccount) -> Result<String, DomainError> {
        let now = chrono::Utc::now().timestamp() as u64;
        let claims = Claims {
            iss: &account.client_email,
            scope: SCOPES,
            aud: TOKEN_URL,
            iat: now,
            exp: now + ASSERTION_LIFETIME_SECS,
        };

        let key = EncodingKey::from_rsa_pem(account.private_key.as_bytes())
            .map_err(|e| DomainError::log(format!("invalid service-account private key: {e}")))?;

        encode(&Header::new(Algorithm::RS256), &claims, &key)
            .map_err(|e| DomainError::log(format!("failed to sign token assertion: {e}")))
    }

    async fn ensure_token(
        &self,
        state: &mut SheetsState,
        account: &ServiceAccount,
    ) -> Result<String, DomainError> {
        if let Some(token) = state.token.as_ref().filter(|t| t.is_valid()) {
            return Ok(token.access_token.clone());
        }

        let assertion = self.signed_assertion(account)?;
        let response = self
            .client
            .post(TOKEN_URL)
            .form(&[("grant_type", JWT_GRANT_TYPE), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|e| DomainError::log(format!("token exchange failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("Sheets token exchange returned {status}: {body}");
            return Err(DomainError::log(format!(
                "token exchange returned {status}"
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| DomainError::log(format!("failed to parse token response: {e}")))?;

        debug!(
            "Authenticated as {} (token valid {}s)",
            account.client_email, token.expires_in
        );

        let access_token = token.access_token.clone();
        state.token = Some(CachedToken {
            access_token: token.access_token,
            expires_at: Instant::now() + Duration::from_secs(token.expires_in),
        });
        Ok(access_token)
    }

    /// Resolve the spreadsheet id from its name via the Drive files query.
    async fn ensure_spreadsheet_id(
        &self,
        state: &mut SheetsState,
        access_token: &str,
    ) -> Result<String, DomainError> {
        if let Some(id) = state.spreadsheet_id.as_ref() {
            return Ok(id.clone());
        }

        let query = format!(
            "name = '{}' and mimeType = 'application/vnd.google-apps.spreadsheet' and trashed = false",
            self.spreadsheet_name.replace('\'', "\\'")
        );
        let response = self
            .client
            .get(DRIVE_FILES_URL)
            .bearer_auth(access_token)
            .query(&[
                ("q", query.as_str()),
                ("fields", "files(id)"),
                ("pageSize", "1"),
            ])
            .send()
            .await
            .map_err(|e| DomainError::log(format!("spreadsheet lookup failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(DomainError::log(format!(
                "spreadsheet lookup returned {status}"
            )));
        }

        let list: FileList = response
            .json()
            .await
            .map_err(|e| DomainError::log(format!("failed to parse spreadsheet lookup: {e}")))?;

        let id = list
            .files
            .into_iter()
            .next()
            .map(|file| file.id)
            .ok_or_else(|| {
                DomainError::log(format!(
                    "spreadsheet '{}' not found or not shared with the service account",
                    self.spreadsheet_name
                ))
            })?;

        debug!("Resolved spreadsheet '{}' to {id}", self.spreadsheet_name);
        state.spreadsheet_id = Some(id.clone());
        Ok(id)
    }
}

#[async_trait]
impl ListingLog for SheetsListingLog {
    async fn append(&self, row: &LogRow) -> Result<(), DomainError> {
        let account = self.service_account()?;

        let mut state = self.state.lock().await;
        let access_token = self.ensure_token(&mut state, &account).await?;
        let spreadsheet_id = self.ensure_spreadsheet_id(&mut state, &access_token).await?;

        // "A1" without a sheet prefix targets the first sheet, matching the
        // original sheet1 behavior.
        let url = format!("{SHEETS_BASE_URL}/{spreadsheet_id}/values/A1:append");
        let body = AppendRequest {
            values: vec![row.to_values()],
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&access_token)
            .query(&[
                ("valueInputOption", "USER_ENTERED"),
                ("insertDataOption", "INSERT_ROWS"),
            ])
            .json(&body)
            .send()
            .await
            .map_err(|e| DomainError::log(format!("append request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            // A rejected token means our cache is stale; drop it so the next
            // append re-authenticates.
            if status.as_u16() == 401 || status.as_u16() == 403 {
                state.token = None;
            }
            let body = response.text().await.unwrap_or_default();
            warn!("Sheets append returned {status}: {body}");
            return Err(DomainError::log(format!("append returned {status}")));
        }

        debug!("Appended one row to '{}'", self.spreadsheet_name);
        Ok(())
    }
}
