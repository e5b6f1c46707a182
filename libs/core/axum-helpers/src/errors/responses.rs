//! Reusable OpenAPI responses for envelope-shaped failures.

use crate::response::HttpResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Bad Request - request body could not be bound",
    content_type = "application/json",
    example = json!({
        "success": false,
        "code": 400,
        "message": "error bind param",
        "data": {},
        "errors": {"bindParam": "Failed to parse the request body as JSON"}
    })
)]
pub struct BindErrorResponse(pub HttpResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - validation failed",
    content_type = "application/json",
    example = json!({
        "success": false,
        "code": 400,
        "message": "validate params",
        "data": {},
        "errors": {"title": "title is required"}
    })
)]
pub struct ValidationErrorResponse(pub HttpResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - storage or processing failure, raw message",
    content_type = "application/json",
    example = json!({
        "success": false,
        "code": 400,
        "message": "connection refused",
        "data": {}
    })
)]
pub struct OperationErrorResponse(pub HttpResponse);
