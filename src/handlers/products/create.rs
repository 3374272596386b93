use axum::extract::{Extension, State};

use crate::database::{Product, ProductInput};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::validation::RequestSnapshot;

/// POST /api/products - 201 with the stored record
pub async fn create(
    State(state): State<AppState>,
    Extension(request): Extension<RequestSnapshot>,
) -> ApiResult<Product> {
    let input = ProductInput::from_body(&request.body);
    let product = state.store.create(input).await?;
    tracing::info!("Created product {} ({})", product.id, product.name);
    Ok(ApiResponse::created(product))
}
