//! Rule tables for the product routes.

use serde_json::Value;

use super::{coerce, Check, Rule, RuleSet};

fn price_above_zero(value: Option<&Value>) -> bool {
    coerce::to_number(value) > 0.0
}

/// GET, PATCH and DELETE on `/:id`
pub static PRODUCT_ID: RuleSet = &[Rule::param("id", Check::IsInt, "ID no válido")];

/// POST `/`
pub static CREATE_PRODUCT: RuleSet = &[
    Rule::body("name", Check::NotEmpty, "El nombre de producto no puede ir vacío"),
    Rule::body("price", Check::NotEmpty, "El precio no puede ir vacío"),
    Rule::body("price", Check::IsNumeric, "Valor no válido"),
    Rule::body("price", Check::Custom(price_above_zero), "Ingrese un precio válido mayor a 0"),
];

/// PUT `/:id`
pub static UPDATE_PRODUCT: RuleSet = &[
    Rule::param("id", Check::IsInt, "ID no válido"),
    Rule::body("name", Check::NotEmpty, "El nombre del producto no puede ir vacío"),
    Rule::body("price", Check::IsNumeric, "Valor no válido"),
    Rule::body("price", Check::NotEmpty, "El precio del producto no puede ir vacío"),
    Rule::body("price", Check::Custom(price_above_zero), "Precio no válido"),
    Rule::body("status", Check::IsBoolean, "Valor no válido para el estatus"),
];
