//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only a `base_url` and carries no mutable state between
//! calls. Each endpoint is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The caller executes the actual HTTP round-trip.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Data, ErrorBody, ItemPatch, NewItem, Page, TodoItem};

const ITEMS_PATH: &str = "/v1/items";

/// Synchronous, stateless client for the todo API.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_create_item(&self, input: &NewItem) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Post, self.items_url(), input)
    }

    /// Omitted paging values are left to the server's defaults.
    pub fn build_list_items(&self, page: Option<i64>, limit: Option<i64>) -> HttpRequest {
        let mut query = Vec::new();
        if let Some(page) = page {
            query.push(format!("page={page}"));
        }
        if let Some(limit) = limit {
            query.push(format!("limit={limit}"));
        }
        let mut path = self.items_url();
        if !query.is_empty() {
            path.push('?');
            path.push_str(&query.join("&"));
        }
        bare_request(HttpMethod::Get, path)
    }

    pub fn build_get_item(&self, id: i64) -> HttpRequest {
        bare_request(HttpMethod::Get, self.item_url(id))
    }

    pub fn build_update_item(&self, id: i64, patch: &ItemPatch) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Patch, self.item_url(id), patch)
    }

    pub fn build_delete_item(&self, id: i64) -> HttpRequest {
        bare_request(HttpMethod::Delete, self.item_url(id))
    }

    pub fn parse_create_item(&self, response: HttpResponse) -> Result<TodoItem, ApiError> {
        parse_data(response)
    }

    pub fn parse_list_items(&self, response: HttpResponse) -> Result<Page<TodoItem>, ApiError> {
        check_status(&response, 200)?;
        decode(&response.body)
    }

    pub fn parse_get_item(&self, response: HttpResponse) -> Result<TodoItem, ApiError> {
        parse_data(response)
    }

    pub fn parse_update_item(&self, response: HttpResponse) -> Result<bool, ApiError> {
        parse_data(response)
    }

    pub fn parse_delete_item(&self, response: HttpResponse) -> Result<bool, ApiError> {
        parse_data(response)
    }

    fn items_url(&self) -> String {
        format!("{}{ITEMS_PATH}", self.base_url)
    }

    fn item_url(&self, id: i64) -> String {
        format!("{}{ITEMS_PATH}/{id}", self.base_url)
    }

    fn json_request<T: Serialize>(
        &self,
        method: HttpMethod,
        path: String,
        body: &T,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(body).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method,
            path,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }
}

fn bare_request(method: HttpMethod, path: String) -> HttpRequest {
    HttpRequest {
        method,
        path,
        headers: Vec::new(),
        body: None,
    }
}

/// Every endpoint answers 200 with a `{"data": ...}` envelope on success.
fn parse_data<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response, 200)?;
    let envelope: Data<T> = decode(&response.body)?;
    Ok(envelope.data)
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    let message = serde_json::from_str::<ErrorBody>(&response.body)
        .map(|body| body.error)
        .unwrap_or_else(|_| response.body.clone());
    Err(ApiError::HttpError {
        status: response.status,
        message,
    })
}
