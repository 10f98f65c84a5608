//! Invoice HTTP handlers

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use serde_json::{Value, json};

use crate::core::{
    BizError, BizResult, EntityError, InvoiceChanges, InvoiceWithCompany, JsonBody, NewInvoice,
    PathParam, RequestError,
};
use crate::server::ServerHost;

fn parse_id(id: &str) -> BizResult<i32> {
    id.trim()
        .parse::<i32>()
        .map_err(|_| BizError::from(RequestError::InvalidEntityId { id: id.to_string() }))
}

/// GET /invoices
pub async fn list_invoices(State(host): State<ServerHost>) -> BizResult<Json<Value>> {
    let invoices = host.invoices.list().await?;
    Ok(Json(json!({ "invoices": invoices })))
}

/// GET /invoices/{id}
///
/// The invoice with its company attached, read in two steps.
pub async fn get_invoice(
    State(host): State<ServerHost>,
    PathParam(id): PathParam<String>,
) -> BizResult<Json<Value>> {
    let id = parse_id(&id)?;
    let invoice = host
        .invoices
        .get(id)
        .await?
        .ok_or_else(|| EntityError::invoice_not_found(id))?;

    // comp_code is a foreign key, so the company only vanishes if it was
    // deleted between the two reads.
    let company = host
        .companies
        .get(&invoice.comp_code)
        .await?
        .ok_or_else(|| EntityError::invoice_not_found(id))?;

    let invoice = InvoiceWithCompany::new(invoice, company);
    Ok(Json(json!({ "invoice": invoice })))
}

/// POST /invoices
pub async fn create_invoice(
    State(host): State<ServerHost>,
    JsonBody(payload): JsonBody<NewInvoice>,
) -> BizResult<(StatusCode, Json<Value>)> {
    let invoice = host.invoices.create(payload).await?;
    tracing::debug!(id = invoice.id, comp_code = %invoice.comp_code, "invoice created");
    Ok((StatusCode::CREATED, Json(json!({ "invoice": invoice }))))
}

/// PATCH /invoices/{id}
pub async fn update_invoice(
    State(host): State<ServerHost>,
    PathParam(id): PathParam<String>,
    JsonBody(changes): JsonBody<InvoiceChanges>,
) -> BizResult<(StatusCode, Json<Value>)> {
    let id = parse_id(&id)?;
    let invoice = host
        .invoices
        .update(id, changes)
        .await?
        .ok_or_else(|| EntityError::invoice_not_updated(id))?;

    Ok((StatusCode::CREATED, Json(json!({ "invoice": invoice }))))
}

/// DELETE /invoices/{id}
///
/// Succeeds whether or not the invoice existed.
pub async fn delete_invoice(
    State(host): State<ServerHost>,
    PathParam(id): PathParam<String>,
) -> BizResult<Json<Value>> {
    let parsed = parse_id(&id)?;
    let removed = host.invoices.delete(parsed).await?;
    tracing::debug!(id = parsed, removed, "invoice delete");
    Ok(Json(json!({ "msg": format!("{} DELETED!", parsed) })))
}
