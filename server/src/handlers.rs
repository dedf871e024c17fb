//! HTTP handlers for `/v1/items`.
//!
//! Each handler validates its input, makes one storage call and wraps the
//! result in the `{"data": ...}` envelope. Extractors are taken as `Result`
//! so that rejections render through `AppError` like every other failure.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use todo_core::{Data, ItemPatch, NewItem, Page, Paging, PagingQuery, TodoItem};
use tracing::info;

use crate::error::AppError;
use crate::storage::ItemStore;

pub type Store = Arc<dyn ItemStore>;

const BLANK_TITLE: &str = "title cannot be blank";

/// Trims `raw` and rejects it if nothing is left.
fn require_title(raw: &str) -> Result<&str, AppError> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(AppError::Validation(BLANK_TITLE));
    }
    Ok(title)
}

pub async fn create_item(
    State(store): State<Store>,
    payload: Result<Json<NewItem>, JsonRejection>,
) -> Result<Json<Data<TodoItem>>, AppError> {
    let Json(input) = payload?;
    let title = require_title(&input.title)?;
    info!("Creating item '{}'", title);

    let item = store.create(title, input.status.unwrap_or_default()).await?;
    Ok(Json(Data::new(item)))
}

pub async fn list_items(
    State(store): State<Store>,
    query: Result<Query<PagingQuery>, QueryRejection>,
) -> Result<Json<Page<TodoItem>>, AppError> {
    let Query(query) = query?;
    let mut paging = Paging::from(query);
    info!("Listing items (page: {}, limit: {})", paging.page, paging.limit);

    let (items, total) = store.list(&paging).await?;
    paging.total = total;
    Ok(Json(Page {
        data: items,
        paging,
    }))
}

pub async fn get_item(
    State(store): State<Store>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Data<TodoItem>>, AppError> {
    let Path(id) = id?;
    info!("Getting item: {}", id);

    let item = store.get(id).await?;
    Ok(Json(Data::new(item)))
}

pub async fn update_item(
    State(store): State<Store>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ItemPatch>, JsonRejection>,
) -> Result<Json<Data<bool>>, AppError> {
    let Path(id) = id?;
    let Json(mut patch) = payload?;
    if let Some(title) = patch.title.take() {
        patch.title = Some(require_title(&title)?.to_string());
    }
    info!("Updating item: {}", id);

    store.update(id, &patch).await?;
    Ok(Json(Data::new(true)))
}

pub async fn delete_item(
    State(store): State<Store>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Data<bool>>, AppError> {
    let Path(id) = id?;
    info!("Deleting item: {}", id);

    store.soft_delete(id).await?;
    Ok(Json(Data::new(true)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_title_trims() {
        assert_eq!(require_title("  Buy milk \n").unwrap(), "Buy milk");
    }

    #[test]
    fn require_title_rejects_whitespace() {
        for raw in ["", "   ", "\t\n"] {
            let err = require_title(raw).unwrap_err();
            assert_eq!(err.to_string(), BLANK_TITLE);
        }
    }
}
