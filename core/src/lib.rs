//! Shared domain types and an I/O-free API client for the todo service.
//!
//! # Overview
//! `status`, `types` and `paging` define the wire format used by the
//! `todo-server` crate. `client` builds `HttpRequest` values and parses
//! `HttpResponse` values without touching the network (host-does-IO
//! pattern), so any HTTP stack can drive it.

pub mod client;
pub mod error;
pub mod http;
pub mod paging;
pub mod status;
pub mod types;

pub use client::TodoClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use paging::{Paging, PagingQuery};
pub use status::{ParseStatusError, Status};
pub use types::{Data, ErrorBody, ItemPatch, NewItem, Page, TodoItem};
