use crate::database::Product;
use crate::error::ApiError;
use crate::state::AppState;
use crate::validation::RequestSnapshot;

use super::PRODUCT_NOT_FOUND;

/// Lookup step shared by the id-keyed handlers
pub(super) async fn find_product(state: &AppState, request: &RequestSnapshot) -> Result<Product, ApiError> {
    // Ids that pass validation but overflow the key type cannot exist
    let id = match request.param("id").and_then(|raw| raw.parse::<i32>().ok()) {
        Some(id) => id,
        None => return Err(ApiError::not_found(PRODUCT_NOT_FOUND)),
    };

    state
        .store
        .get_by_key(id)
        .await?
        .ok_or_else(|| ApiError::not_found(PRODUCT_NOT_FOUND))
}
