//! HTTP Connect API
//!
//! Implementation of `ConnectApi` over `reqwest`. Every request carries
//! `X-Organization-ID` and `Authorization: Bearer <token>`; non-success
//! responses are mapped to `ConsoleError::Api` with the body's `error`
//! field.

use async_trait::async_trait;
use connect_core::{
    api::{API_BASE_PATH, ConnectApi, DEFAULT_HISTORY_LIMIT},
    error::{ConsoleError, Result},
    model::{
        ConnectedDeveloperPage, ErrorBody, OnboardingLink, OnboardingRequest, OnboardingStatus,
        PaymentReceipt, PaymentRequest, TransactionPage, WalletBalance, WithdrawalPage,
        WithdrawalReceipt, WithdrawalRequest,
    },
    session::{ORGANIZATION_HEADER, Session},
};
use reqwest::{RequestBuilder, header::AUTHORIZATION};
use rust_decimal::Decimal;
use serde::{Serialize, de::DeserializeOwned};

/// HTTP backend configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Absolute URL of the API base path
    pub base_url: String,

    /// Rows fetched per history table
    pub history_limit: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: format!("http://localhost:8080{API_BASE_PATH}"),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl ClientConfig {
    /// API served from the same origin as the console page
    pub fn for_origin(origin: &str) -> Self {
        Self {
            base_url: format!("{}{API_BASE_PATH}", origin.trim_end_matches('/')),
            ..Default::default()
        }
    }

    /// Native tooling: `CONNECT_API_URL`, `CONNECT_HISTORY_LIMIT`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let base_url = std::env::var("CONNECT_API_URL").unwrap_or(defaults.base_url);
        let history_limit = std::env::var("CONNECT_HISTORY_LIMIT")
            .ok()
            .and_then(|l| l.parse().ok())
            .unwrap_or(defaults.history_limit);

        Self {
            base_url,
            history_limit,
        }
    }
}

/// Payments backend reached over HTTP
#[derive(Clone, Debug)]
pub struct HttpConnectApi {
    client: reqwest::Client,
    config: ClientConfig,
}

impl HttpConnectApi {
    /// Create with an absolute base URL (including `/api/v1/connect`)
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::from_config(ClientConfig {
            base_url: base_url.into(),
            ..Default::default()
        })
    }

    pub fn from_config(config: ClientConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    pub fn for_origin(origin: &str) -> Self {
        Self::from_config(ClientConfig::for_origin(origin))
    }

    pub fn from_env() -> Self {
        Self::from_config(ClientConfig::from_env())
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url.trim_end_matches('/'))
    }

    fn authorized(builder: RequestBuilder, session: &Session) -> RequestBuilder {
        builder
            .header(ORGANIZATION_HEADER, session.organization_id.as_str())
            .header(AUTHORIZATION, session.bearer())
    }

    async fn get<T: DeserializeOwned>(
        &self,
        session: &Session,
        path: &str,
        limit: Option<u32>,
    ) -> Result<T> {
        let mut builder = self.client.get(self.url(path));
        if let Some(limit) = limit {
            builder = builder.query(&[("limit", limit)]);
        }
        Self::send(Self::authorized(builder, session), path).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        session: &Session,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let builder = self.client.post(self.url(path)).json(body);
        Self::send(Self::authorized(builder, session), path).await
    }

    async fn send<T: DeserializeOwned>(builder: RequestBuilder, path: &str) -> Result<T> {
        let response = builder.send().await.map_err(|e| {
            tracing::warn!("Request to {} failed: {}", path, e);
            ConsoleError::Network(e.to_string())
        })?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| ConsoleError::Decode(e.to_string()));
        }

        let body: ErrorBody = response.json().await.unwrap_or_default();
        tracing::warn!("{} returned {}: {:?}", path, status, body.error);
        Err(ConsoleError::Api {
            status: status.as_u16(),
            message: body.error,
        })
    }
}

#[async_trait(?Send)]
impl ConnectApi for HttpConnectApi {
    fn history_limit(&self) -> u32 {
        self.config.history_limit
    }

    async fn status(&self, session: &Session) -> Result<OnboardingStatus> {
        self.get(session, "/status", None).await
    }

    async fn wallet_balance(&self, session: &Session) -> Result<WalletBalance> {
        self.get(session, "/wallet/balance", None).await
    }

    async fn transactions(&self, session: &Session, limit: u32) -> Result<TransactionPage> {
        self.get(session, "/wallet/transactions", Some(limit)).await
    }

    async fn withdrawal_history(&self, session: &Session, limit: u32) -> Result<WithdrawalPage> {
        self.get(session, "/withdrawals/history", Some(limit)).await
    }

    async fn start_onboarding(
        &self,
        session: &Session,
        request: &OnboardingRequest,
    ) -> Result<OnboardingLink> {
        self.post(session, "/onboard", request).await
    }

    async fn refresh_onboarding(
        &self,
        session: &Session,
        request: &OnboardingRequest,
    ) -> Result<OnboardingLink> {
        self.post(session, "/refresh-onboarding", request).await
    }

    async fn request_withdrawal(
        &self,
        session: &Session,
        amount: Decimal,
    ) -> Result<WithdrawalReceipt> {
        self.post(session, "/withdrawals/request", &WithdrawalRequest { amount })
            .await
    }

    async fn connected_developers(&self, session: &Session) -> Result<ConnectedDeveloperPage> {
        self.get(session, "/connected-developers", None).await
    }

    async fn execute_payment(
        &self,
        session: &Session,
        request: &PaymentRequest,
    ) -> Result<PaymentReceipt> {
        self.post(session, "/payments/execute", request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Json, Router,
        extract::{Query, State},
        http::{HeaderMap, StatusCode},
        routing::{get, post},
    };
    use rust_decimal_macros::dec;
    use serde_json::{Value, json};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    /// Requests observed by the fake backend: (path, headers, query, body)
    type Seen = Arc<Mutex<Vec<(String, HashMap<String, String>, HashMap<String, String>, Value)>>>;

    fn headers_of(headers: &HeaderMap) -> HashMap<String, String> {
        headers
            .iter()
            .filter_map(|(k, v)| Some((k.as_str().to_string(), v.to_str().ok()?.to_string())))
            .collect()
    }

    async fn spawn_backend() -> (String, Seen) {
        let seen: Seen = Arc::new(Mutex::new(Vec::new()));

        let app = Router::new()
            .route(
                "/api/v1/connect/status",
                get(|State(seen): State<Seen>, headers: HeaderMap| async move {
                    seen.lock().unwrap().push((
                        "/status".into(),
                        headers_of(&headers),
                        HashMap::new(),
                        Value::Null,
                    ));
                    Json(json!({
                        "account_id": "acct_1",
                        "onboarding_completed": true,
                        "payouts_enabled": true,
                        "charges_enabled": true,
                        "balance": 120.5
                    }))
                }),
            )
            .route(
                "/api/v1/connect/wallet/transactions",
                get(
                    |State(seen): State<Seen>,
                     headers: HeaderMap,
                     Query(query): Query<HashMap<String, String>>| async move {
                        seen.lock().unwrap().push((
                            "/wallet/transactions".into(),
                            headers_of(&headers),
                            query,
                            Value::Null,
                        ));
                        Json(json!({
                            "transactions": [{
                                "id": "tx-1",
                                "function_id": "func-test-123",
                                "function_name": "resize",
                                "user_organization": "org-2",
                                "amount": 5,
                                "platform_fee": 0,
                                "net_amount": 5,
                                "status": "completed",
                                "executed_at": "2024-03-07T12:00:00Z"
                            }],
                            "total": 1, "page": 1, "limit": 10
                        }))
                    },
                ),
            )
            .route(
                "/api/v1/connect/wallet/balance",
                get(|| async {
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(json!({"error": "wallet not found for organization"})),
                    )
                }),
            )
            .route(
                "/api/v1/connect/withdrawals/history",
                get(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }),
            )
            .route(
                "/api/v1/connect/payments/execute",
                post(
                    |State(seen): State<Seen>, headers: HeaderMap, Json(body): Json<Value>| async move {
                        seen.lock().unwrap().push((
                            "/payments/execute".into(),
                            headers_of(&headers),
                            HashMap::new(),
                            body,
                        ));
                        Json(json!({
                            "transaction_id": "t1",
                            "amount": 5,
                            "platform_fee": 0.5,
                            "net_amount": 4.5,
                            "user_balance": 95,
                            "developer_balance": 4.5,
                            "message": "Payment processed successfully"
                        }))
                    },
                ),
            )
            .with_state(seen.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{addr}"), seen)
    }

    fn session() -> Session {
        Session::new("org-1", "abc")
    }

    #[test]
    fn test_config_for_origin() {
        let config = ClientConfig::for_origin("http://localhost:3000/");
        assert_eq!(config.base_url, "http://localhost:3000/api/v1/connect");
        assert_eq!(config.history_limit, 10);
    }

    #[tokio::test]
    async fn test_status_sends_session_headers() {
        let (origin, seen) = spawn_backend().await;
        let api = HttpConnectApi::for_origin(&origin);

        let status = api.status(&session()).await.unwrap();
        assert_eq!(status.account_id, "acct_1");
        assert!(status.onboarding_completed);
        assert_eq!(status.balance, dec!(120.5));

        let seen = seen.lock().unwrap();
        let (path, headers, _, _) = &seen[0];
        assert_eq!(path, "/status");
        assert_eq!(headers.get("x-organization-id").map(String::as_str), Some("org-1"));
        assert_eq!(headers.get("authorization").map(String::as_str), Some("Bearer abc"));
    }

    #[tokio::test]
    async fn test_history_limit_query() {
        let (origin, seen) = spawn_backend().await;
        let api = HttpConnectApi::for_origin(&origin);

        let page = api.transactions(&session(), 10).await.unwrap();
        assert_eq!(page.transactions.len(), 1);
        assert_eq!(page.transactions[0].amount, dec!(5));

        let seen = seen.lock().unwrap();
        let (_, _, query, _) = &seen[0];
        assert_eq!(query.get("limit").map(String::as_str), Some("10"));
    }

    #[tokio::test]
    async fn test_configured_limit_reaches_dashboard_reads() {
        let (origin, seen) = spawn_backend().await;
        let api = HttpConnectApi::from_config(ClientConfig {
            history_limit: 3,
            ..ClientConfig::for_origin(&origin)
        });

        let mut state = connect_core::DeveloperState::new();
        state.load_dashboard_data(&api, &session()).await;
        assert_eq!(state.transactions.len(), 1);

        let seen = seen.lock().unwrap();
        let (_, _, query, _) = seen
            .iter()
            .find(|(path, ..)| path == "/wallet/transactions")
            .unwrap();
        assert_eq!(query.get("limit").map(String::as_str), Some("3"));
    }

    #[tokio::test]
    async fn test_error_field_is_surfaced() {
        let (origin, _) = spawn_backend().await;
        let api = HttpConnectApi::for_origin(&origin);

        let err = api.wallet_balance(&session()).await.unwrap_err();
        assert_eq!(
            err,
            ConsoleError::Api {
                status: 500,
                message: Some("wallet not found for organization".into()),
            }
        );
    }

    #[tokio::test]
    async fn test_non_json_error_has_no_message() {
        let (origin, _) = spawn_backend().await;
        let api = HttpConnectApi::for_origin(&origin);

        let err = api.withdrawal_history(&session(), 10).await.unwrap_err();
        assert_eq!(err, ConsoleError::Api { status: 502, message: None });
        assert_eq!(err.user_message("Failed to load dashboard data"), "Failed to load dashboard data");
    }

    #[tokio::test]
    async fn test_execute_payment_body() {
        let (origin, seen) = spawn_backend().await;
        let api = HttpConnectApi::for_origin(&origin);

        let receipt = api
            .execute_payment(
                &session(),
                &PaymentRequest {
                    function_id: "f1".into(),
                    version: "v1".into(),
                    amount: dec!(5),
                    developer_organization_id: "d1".into(),
                },
            )
            .await
            .unwrap();
        assert_eq!(receipt.transaction_id, "t1");
        assert_eq!(receipt.net_amount, dec!(4.5));

        let seen = seen.lock().unwrap();
        let (_, _, _, body) = &seen[0];
        assert_eq!(body["function_id"], "f1");
        assert_eq!(body["version"], "v1");
        assert_eq!(body["amount"].as_f64(), Some(5.0));
        assert_eq!(body["developer_organization_id"], "d1");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let api = HttpConnectApi::for_origin(&format!("http://{addr}"));
        let err = api.status(&session()).await.unwrap_err();
        assert!(matches!(err, ConsoleError::Network(_)));
    }
}
