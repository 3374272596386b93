use axum::extract::{Extension, State};

use crate::database::Product;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::validation::RequestSnapshot;

use super::utils::find_product;

/// PATCH /api/products/:id - flip `status`; the body is not read
pub async fn toggle_status(
    State(state): State<AppState>,
    Extension(request): Extension<RequestSnapshot>,
) -> ApiResult<Product> {
    let mut product = find_product(&state, &request).await?;

    product.toggle_status();
    state.store.persist(&mut product).await?;
    tracing::debug!("Product {} status is now {}", product.id, product.status);

    Ok(ApiResponse::success(product))
}
