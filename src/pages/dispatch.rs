use super::{Outcome, PageEvent, Request};
use crate::api::ApiClient;
use crate::config::ResourceConfig;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Run one request to completion
pub async fn execute(
    client: &ApiClient,
    resource: &ResourceConfig,
    locale: &str,
    request: Request,
) -> Outcome {
    match request {
        Request::Options => {
            let mut loaded = Vec::new();
            for (key, source) in resource.option_sources() {
                match client.options(source, locale).await {
                    Ok(options) => loaded.push((key.to_string(), options)),
                    Err(e) => return Outcome::Options(Err(e)),
                }
            }
            Outcome::Options(Ok(loaded))
        }
        Request::List { seq, query } => Outcome::Listed {
            seq,
            result: client.list(resource, &query, locale).await,
        },
        Request::Update(row) => {
            let result = client.update(resource, &row).await;
            Outcome::Updated { row, result }
        }
        Request::Remove(id) => Outcome::Removed(client.remove(resource, &id).await),
        Request::Add(row) => Outcome::Added(client.add(resource, &row).await),
    }
}

/// Run a request on its own task and report back on `tx`.
///
/// Requests are independent: nothing orders them and a slow one never
/// blocks the UI loop.
pub fn spawn_request(
    client: ApiClient,
    resource: Arc<ResourceConfig>,
    page: usize,
    locale: String,
    request: Request,
    tx: mpsc::Sender<PageEvent>,
) {
    tokio::spawn(async move {
        tracing::debug!(resource = %resource.name, ?request, "Dispatching");
        let outcome = execute(&client, &resource, &locale, request).await;
        if tx.send(PageEvent { page, outcome }).await.is_err() {
            tracing::debug!(resource = %resource.name, "UI gone, result dropped");
        }
    });
}
