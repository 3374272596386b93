//! OpenAPI 3.0 description of the product routes, served under `/docs`.

use serde_json::{json, Map, Value};

pub const DOCS_TITLE: &str = "Documentación REST API";

/// Build the document with product paths mounted under `base_path`
pub fn document(base_path: &str) -> Value {
    let collection = base_path.to_string();
    let item = format!("{}/{{id}}", base_path);

    let mut paths = Map::new();
    paths.insert(
        collection,
        json!({
            "get": {
                "summary": "Get a list of products",
                "tags": ["Products"],
                "description": "Return a list of products",
                "responses": {
                    "200": {
                        "description": "Successful response",
                        "content": {
                            "application/json": {
                                "schema": envelope(json!({
                                    "type": "array",
                                    "items": { "$ref": "#/components/schemas/Product" }
                                }))
                            }
                        }
                    }
                }
            },
            "post": {
                "summary": "Create a new product",
                "tags": ["Products"],
                "description": "Return a new record in the database",
                "requestBody": {
                    "required": true,
                    "content": {
                        "application/json": {
                            "schema": {
                                "type": "object",
                                "properties": {
                                    "name": { "type": "string", "example": "Monitor curvo de 49 pulgadas" },
                                    "price": { "type": "number", "example": 400 }
                                }
                            }
                        }
                    }
                },
                "responses": {
                    "201": product_response("Successful response"),
                    "400": { "$ref": "#/components/responses/ValidationFailed" }
                }
            }
        }),
    );
    paths.insert(
        item,
        json!({
            "parameters": [id_parameter()],
            "get": {
                "summary": "Get a product by ID",
                "tags": ["Products"],
                "description": "Return a product based on its unique ID",
                "responses": {
                    "200": product_response("Successful response"),
                    "400": { "$ref": "#/components/responses/ValidationFailed" },
                    "404": { "$ref": "#/components/responses/NotFound" }
                }
            },
            "put": {
                "summary": "Update a product with user input",
                "tags": ["Products"],
                "description": "Returns the updated product",
                "requestBody": {
                    "required": true,
                    "content": {
                        "application/json": {
                            "schema": {
                                "type": "object",
                                "properties": {
                                    "name": { "type": "string", "example": "Monitor curvo de 49 pulgadas" },
                                    "price": { "type": "number", "example": 400 },
                                    "status": { "type": "boolean", "example": true }
                                }
                            }
                        }
                    }
                },
                "responses": {
                    "200": product_response("Successful response"),
                    "400": { "$ref": "#/components/responses/ValidationFailed" },
                    "404": { "$ref": "#/components/responses/NotFound" }
                }
            },
            "patch": {
                "summary": "Update product status",
                "tags": ["Products"],
                "description": "Flips the product status and returns the product",
                "responses": {
                    "200": product_response("Successful response"),
                    "400": { "$ref": "#/components/responses/ValidationFailed" },
                    "404": { "$ref": "#/components/responses/NotFound" }
                }
            },
            "delete": {
                "summary": "Delete a product by a given ID",
                "tags": ["Products"],
                "description": "Returns a confirmation message",
                "responses": {
                    "200": {
                        "description": "Successful response",
                        "content": {
                            "application/json": {
                                "schema": envelope(json!({ "type": "string", "example": "Producto eliminado" }))
                            }
                        }
                    },
                    "400": { "$ref": "#/components/responses/ValidationFailed" },
                    "404": { "$ref": "#/components/responses/NotFound" }
                }
            }
        }),
    );

    json!({
        "openapi": "3.0.2",
        "info": {
            "title": "REST API Rust / Axum",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "API Docs for Products"
        },
        "tags": [
            { "name": "Products", "description": "API operations related to products" }
        ],
        "paths": Value::Object(paths),
        "components": {
            "schemas": {
                "Product": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "integer", "description": "The Product ID", "example": 1 },
                        "name": { "type": "string", "description": "The Product name", "example": "Monitor curvo de 49 pulgadas" },
                        "price": { "type": "number", "description": "The Product price", "example": 300 },
                        "status": { "type": "boolean", "description": "The Product status", "example": true },
                        "createdAt": { "type": "string", "format": "date-time" },
                        "updatedAt": { "type": "string", "format": "date-time" }
                    }
                },
                "ValidationError": {
                    "type": "object",
                    "properties": {
                        "type": { "type": "string", "example": "field" },
                        "value": {},
                        "msg": { "type": "string", "example": "ID no válido" },
                        "path": { "type": "string", "example": "id" },
                        "location": { "type": "string", "enum": ["params", "body"] }
                    }
                }
            },
            "responses": {
                "ValidationFailed": {
                    "description": "Bad Request - invalid ID or invalid input data",
                    "content": {
                        "application/json": {
                            "schema": {
                                "type": "object",
                                "properties": {
                                    "errors": {
                                        "type": "array",
                                        "items": { "$ref": "#/components/schemas/ValidationError" }
                                    }
                                }
                            }
                        }
                    }
                },
                "NotFound": {
                    "description": "Product Not Found",
                    "content": {
                        "application/json": {
                            "schema": {
                                "type": "object",
                                "properties": {
                                    "error": { "type": "string", "example": "Producto no encontrado" }
                                }
                            }
                        }
                    }
                }
            }
        }
    })
}

fn envelope(data: Value) -> Value {
    json!({
        "type": "object",
        "properties": { "data": data }
    })
}

fn product_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": envelope(json!({ "$ref": "#/components/schemas/Product" }))
            }
        }
    })
}

fn id_parameter() -> Value {
    json!({
        "in": "path",
        "name": "id",
        "description": "The ID of the product",
        "required": true,
        "schema": { "type": "integer" }
    })
}

/// Swagger UI page pointing at the JSON document
pub fn swagger_ui_html(spec_url: &str) -> String {
    format!(
        r##"<!DOCTYPE html>
<html lang="es">
<head>
  <meta charset="utf-8" />
  <title>{DOCS_TITLE}</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
  <style>
    .swagger-ui .topbar {{ background-color: #2b3b45; }}
  </style>
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
  <script>
    window.ui = SwaggerUIBundle({{ url: "{spec_url}", dom_id: "#swagger-ui" }});
  </script>
</body>
</html>
"##
    )
}
