use axum::extract::{Extension, State};

use crate::database::{Product, ProductInput};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::validation::RequestSnapshot;

use super::utils::find_product;

/// PUT /api/products/:id - overwrite name, price and status
pub async fn update(
    State(state): State<AppState>,
    Extension(request): Extension<RequestSnapshot>,
) -> ApiResult<Product> {
    let mut product = find_product(&state, &request).await?;

    product.apply(ProductInput::from_body(&request.body));
    state.store.persist(&mut product).await?;

    Ok(ApiResponse::success(product))
}
