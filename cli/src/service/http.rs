use super::{handle_empty_response, handle_response};
use crate::{
    algebra::TaskApi,
    domain::{ACCOUNTS_PATH, BALANCE_PATH, CARDS_PATH, TASKS_PATH, URL_PROVIDED_IS_INVALID},
};
use entities::{
    Account, AutoError, Balance, Card, CreateTaskRequest, Page, PageQuery, Task, TaskQuery, Unit,
};
use reqwest::{Client, ClientBuilder, Method, RequestBuilder};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// [`TaskApi`] over HTTP with a bearer token.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    base: Url,
    token: Option<String>,
}

impl HttpApi {
    pub fn new(base: &str, token: Option<String>, timeout: Duration) -> Result<Self, AutoError> {
        // Without the trailing slash `Url::join` would replace the last segment.
        let base = if base.ends_with('/') {
            base.to_string()
        } else {
            format!("{base}/")
        };
        let base = Url::parse(&base)
            .map_err(|e| AutoError::invalid_argument(&format!("{URL_PROVIDED_IS_INVALID}: {e}")))?;

        let client = ClientBuilder::new()
            .timeout(timeout)
            .build()
            .map_err(|e| AutoError::io_err(&format!("{e}")))?;

        Ok(Self {
            client,
            base,
            token,
        })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, AutoError> {
        let url = self
            .base
            .join(path)
            .map_err(|e| AutoError::invalid_argument(&format!("{URL_PROVIDED_IS_INVALID}: {e}")))?;

        debug!(%method, %url, "Sending request");

        let builder = self.client.request(method, url);

        Ok(match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }
}

impl TaskApi for HttpApi {
    async fn list_tasks(&self, query: &TaskQuery) -> Result<Page<Task>, AutoError> {
        let req = self.request(Method::GET, TASKS_PATH)?.query(&query.to_pairs());

        handle_response(req.send().await).await
    }

    async fn get_task(&self, id: u64) -> Result<Task, AutoError> {
        let req = self.request(Method::GET, &format!("{TASKS_PATH}{id}/"))?;

        handle_response(req.send().await).await
    }

    async fn create_task(&self, request: &CreateTaskRequest) -> Result<Task, AutoError> {
        let req = self.request(Method::POST, TASKS_PATH)?.json(request);

        handle_response(req.send().await).await
    }

    async fn cancel_task(&self, id: u64) -> Result<Unit, AutoError> {
        let req = self.request(Method::POST, &format!("{TASKS_PATH}{id}/cancel/"))?;

        handle_empty_response(req.send().await).await
    }

    async fn delete_task(&self, id: u64) -> Result<Unit, AutoError> {
        let req = self.request(Method::DELETE, &format!("{TASKS_PATH}{id}/"))?;

        handle_empty_response(req.send().await).await
    }

    async fn list_accounts(&self, query: &PageQuery) -> Result<Page<Account>, AutoError> {
        let req = self
            .request(Method::GET, ACCOUNTS_PATH)?
            .query(&query.to_pairs());

        handle_response(req.send().await).await
    }

    async fn list_cards(&self, query: &PageQuery) -> Result<Page<Card>, AutoError> {
        let req = self.request(Method::GET, CARDS_PATH)?.query(&query.to_pairs());

        handle_response(req.send().await).await
    }

    async fn balance(&self) -> Result<Balance, AutoError> {
        let req = self.request(Method::GET, BALANCE_PATH)?;

        handle_response(req.send().await).await
    }
}
