use axum::extract::State;

use crate::database::{Product, SortOrder};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /api/products - all products, newest id first
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Product>> {
    let products = state.store.list_all(SortOrder::Descending).await?;
    Ok(ApiResponse::success(products))
}
