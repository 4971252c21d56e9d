//! Catalog backend client
//!
//! Every endpoint is a JSON `POST` answered with
//! `{ success, message?, ... }`. The admin token, when configured, travels
//! in a `token` header.

mod error;
pub mod request;

pub use error::{ApiError, UNEXPECTED};
pub use request::{ListPage, ListQuery};

use crate::config::{Config, OptionSource, ResourceConfig};
use crate::table::{Record, SelectOption};
use request::Envelope;
use serde_json::{Map, Value};
use std::time::Duration;

#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        Self::with_base_url(
            &config.api_url,
            config.token.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn with_base_url(
        base_url: &str,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Map<String, Value>, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "POST");

        let mut request = self.client.post(&url).json(body);
        if let Some(token) = &self.token {
            request = request.header("token", token);
        }
        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        match serde_json::from_slice::<Envelope>(&bytes) {
            Ok(envelope) => envelope.into_payload(),
            Err(_) if !status.is_success() => Err(ApiError::Status {
                status: status.as_u16(),
                message: String::from_utf8_lossy(&bytes).chars().take(200).collect(),
            }),
            Err(e) => Err(ApiError::Decode(e.to_string())),
        }
    }

    pub async fn list(
        &self,
        resource: &ResourceConfig,
        query: &ListQuery,
        locale: &str,
    ) -> Result<ListPage, ApiError> {
        let payload = self
            .post(&resource.list_path, &request::list_body(resource, query))
            .await?;
        request::parse_list(resource, locale, payload)
    }

    pub async fn update(&self, resource: &ResourceConfig, row: &Record) -> Result<(), ApiError> {
        let path = endpoint(resource, &resource.update_path, "update")?;
        self.post(path, &request::update_body(resource, row)).await?;
        Ok(())
    }

    pub async fn remove(&self, resource: &ResourceConfig, id: &str) -> Result<(), ApiError> {
        let path = endpoint(resource, &resource.remove_path, "remove")?;
        self.post(path, &request::remove_body(id)).await?;
        Ok(())
    }

    pub async fn add(&self, resource: &ResourceConfig, row: &Record) -> Result<(), ApiError> {
        let path = endpoint(resource, &resource.add_path, "add")?;
        self.post(path, &request::add_body(resource, row)).await?;
        Ok(())
    }

    /// Select options from another resource's list endpoint
    pub async fn options(
        &self,
        source: &OptionSource,
        locale: &str,
    ) -> Result<Vec<SelectOption>, ApiError> {
        let payload = self.post(&source.path, &Value::Object(Map::new())).await?;
        request::parse_options(source, locale, payload)
    }
}

fn endpoint<'a>(
    resource: &ResourceConfig,
    path: &'a Option<String>,
    operation: &'static str,
) -> Result<&'a str, ApiError> {
    path.as_deref().ok_or_else(|| ApiError::Unsupported {
        resource: resource.name.clone(),
        operation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{default_resources, resources::find};
    use crate::table::Row;
    use axum::extract::State;
    use axum::http::HeaderMap;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    /// Requests seen by the mock backend: (path, token header, body)
    type Seen = Arc<Mutex<Vec<(String, Option<String>, Value)>>>;

    async fn record_request(
        State(seen): State<Seen>,
        uri: axum::http::Uri,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> Json<Value> {
        let token = headers
            .get("token")
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let path = uri.path().to_string();
        seen.lock().unwrap().push((path.clone(), token, body.clone()));

        Json(match path.as_str() {
            "/api/brand/" => json!({
                "success": true,
                "brands": [
                    { "_id": "b1", "name": "Acme", "country": "UA" },
                    { "_id": "b2", "name": "Bolt", "country": "PL" }
                ],
                "count": 21
            }),
            "/api/brand/update" if body["newName"] == "Taken" => {
                json!({ "success": false, "message": "Brand exists" })
            }
            "/api/category/" => json!({
                "success": true,
                "categories": [{ "_id": "c1", "name_en": "Shoes", "name_uk": "Взуття" }]
            }),
            _ => json!({ "success": true }),
        })
    }

    async fn spawn_backend() -> (String, Seen) {
        let seen: Seen = Arc::default();
        let app = Router::new()
            .route("/api/brand/", post(record_request))
            .route("/api/brand/update", post(record_request))
            .route("/api/brand/remove", post(record_request))
            .route("/api/brand/add", post(record_request))
            .route("/api/category/", post(record_request))
            .with_state(seen.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind listener");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });
        (format!("http://{addr}"), seen)
    }

    fn brands() -> ResourceConfig {
        find(&default_resources(), "brands").unwrap().clone()
    }

    #[tokio::test]
    async fn list_sends_query_and_token() {
        let (url, seen) = spawn_backend().await;
        let client =
            ApiClient::with_base_url(&url, Some("t0k".into()), Duration::from_secs(5)).unwrap();

        let query = ListQuery {
            page: 1,
            results_on_page: 20,
            filters: vec![("name".into(), "red".into()), ("country".into(), "".into())],
            ..Default::default()
        };
        let page = client.list(&brands(), &query, "en").await.unwrap();
        assert_eq!(page.count, 21);
        assert_eq!(page.items[1].id(), "b2");

        let seen = seen.lock().unwrap();
        let (path, token, body) = &seen[0];
        assert_eq!(path, "/api/brand/");
        assert_eq!(token.as_deref(), Some("t0k"));
        assert_eq!(body["name"], "red");
        assert_eq!(body["resultsOnPage"], 20);
    }

    #[tokio::test]
    async fn rejected_update_surfaces_message() {
        let (url, _seen) = spawn_backend().await;
        let client = ApiClient::with_base_url(&url, None, Duration::from_secs(5)).unwrap();
        let row = Record::from_json(json!({ "_id": "b1", "name": "Taken", "country": "UA" }), "_id")
            .unwrap();

        let err = client.update(&brands(), &row).await.unwrap_err();
        assert!(matches!(err, ApiError::Rejected(ref m) if m == "Brand exists"));
    }

    #[tokio::test]
    async fn add_and_remove_hit_their_endpoints() {
        let (url, seen) = spawn_backend().await;
        let client = ApiClient::with_base_url(&url, None, Duration::from_secs(5)).unwrap();
        let row =
            Record::from_json(json!({ "_id": "", "name": "Acme", "country": "UA" }), "_id").unwrap();

        client.add(&brands(), &row).await.unwrap();
        client.remove(&brands(), "b1").await.unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen[0].0, "/api/brand/add");
        assert_eq!(seen[0].2["brand"]["name"], "Acme");
        assert_eq!(seen[0].1, None);
        assert_eq!(seen[1].0, "/api/brand/remove");
        assert_eq!(seen[1].2, json!({ "id": "b1" }));
    }

    #[tokio::test]
    async fn options_load_from_source() {
        let (url, _seen) = spawn_backend().await;
        let client = ApiClient::with_base_url(&url, None, Duration::from_secs(5)).unwrap();
        let resources = default_resources();
        let source = find(&resources, "sizes")
            .unwrap()
            .field("categoryId")
            .and_then(|f| f.options_from.clone())
            .unwrap();

        let options = client.options(&source, "en").await.unwrap();
        assert_eq!(options, vec![SelectOption::new("c1", "Shoes")]);
    }

    #[tokio::test]
    async fn missing_endpoint_is_unsupported() {
        let client =
            ApiClient::with_base_url("http://127.0.0.1:9", None, Duration::from_secs(1)).unwrap();
        let managers = find(&default_resources(), "managers").unwrap().clone();
        let err = client.remove(&managers, "u1").await.unwrap_err();
        assert!(matches!(err, ApiError::Unsupported { operation: "remove", .. }));
    }

    #[tokio::test]
    async fn unreachable_backend_is_transport_error() {
        let client =
            ApiClient::with_base_url("http://127.0.0.1:9", None, Duration::from_secs(1)).unwrap();
        let err = client
            .list(&brands(), &ListQuery::default(), "en")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }
}
