use axum::extract::{Extension, State};

use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::validation::RequestSnapshot;

use super::utils::find_product;
use super::PRODUCT_DELETED;

/// DELETE /api/products/:id - hard delete
pub async fn delete(
    State(state): State<AppState>,
    Extension(request): Extension<RequestSnapshot>,
) -> ApiResult<&'static str> {
    let product = find_product(&state, &request).await?;
    state.store.delete(&product).await?;
    tracing::info!("Deleted product {}", product.id);
    Ok(ApiResponse::success(PRODUCT_DELETED))
}
