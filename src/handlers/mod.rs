// handlers/mod.rs - HTTP handlers
//
// products/  CRUD over the product store, mounted under the API base path
// docs       Swagger UI and the OpenAPI document
// service    service info and health

pub mod docs;
pub mod products;
pub mod service;
