use super::Printer;
use crate::domain::{CONFIRM_SUFFIX, REQUEST_FAILED_MESSAGE_ERR};
use entities::{AutoError, DEFAULT_PAGE, ERROR_KEY, MAX_PAGE_SIZE, Page, PageQuery, Unit};
use reqwest::{Error as ReqwestError, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

pub async fn handle_response<T>(req: Result<Response, ReqwestError>) -> Result<T, AutoError>
where
    T: DeserializeOwned,
{
    check_status(req)
        .await?
        .json()
        .await
        .map_err(|e| AutoError::api(None, &format!("{e}")))
}

pub async fn handle_empty_response(req: Result<Response, ReqwestError>) -> Result<Unit, AutoError> {
    check_status(req).await.map(|_| ())
}

async fn check_status(req: Result<Response, ReqwestError>) -> Result<Response, AutoError> {
    let response = req.map_err(|e| {
        warn!("Request could not be completed: {e}");
        AutoError::api(None, &format!("{e}"))
    })?;

    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message =
        error_message(&body).unwrap_or_else(|| format!("{REQUEST_FAILED_MESSAGE_ERR} ({status})"));

    warn!(status = status.as_u16(), "Request rejected: {message}");

    Err(AutoError::api(status.as_u16(), &message))
}

/// The backend reports failures as `{"error": "..."}`.
pub fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<Value>(body)
        .ok()?
        .get(ERROR_KEY)?
        .as_str()
        .map(str::to_string)
}

/// Walks a listing page by page at the largest page size until `count` records are collected.
pub async fn collect_pages<T, F, Fut>(mut fetch: F) -> Result<Vec<T>, AutoError>
where
    F: FnMut(PageQuery) -> Fut,
    Fut: Future<Output = Result<Page<T>, AutoError>>,
{
    let mut query = PageQuery {
        page: DEFAULT_PAGE,
        page_size: MAX_PAGE_SIZE,
    };
    let mut items = Vec::new();

    loop {
        let Page { results, count } = fetch(query).await?;
        // A short server-side count must not loop forever.
        let exhausted = results.is_empty();
        items.extend(results);

        if exhausted || items.len() as u64 >= count {
            return Ok(items);
        }

        query.page += 1;
    }
}

pub fn readline() -> Result<String, AutoError> {
    let mut buffer = String::new();
    std::io::stdin()
        .read_line(&mut buffer)
        .map_err(|e| AutoError::io_err(&format!("{e}")))?;

    Ok(buffer)
}

/// Anything but an explicit yes declines.
pub fn confirm(printer: &Printer, question: &str) -> Result<bool, AutoError> {
    printer.write(&format!("{question}{CONFIRM_SUFFIX}"));
    let line = readline()?;

    Ok(matches!(
        line.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}
