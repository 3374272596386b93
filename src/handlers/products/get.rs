use axum::extract::{Extension, State};

use crate::database::Product;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::validation::RequestSnapshot;

use super::utils::find_product;

/// GET /api/products/:id
pub async fn get(
    State(state): State<AppState>,
    Extension(request): Extension<RequestSnapshot>,
) -> ApiResult<Product> {
    let product = find_product(&state, &request).await?;
    Ok(ApiResponse::success(product))
}
