//! Company HTTP handlers

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use serde_json::{Value, json};

use crate::core::{
    BizResult, CompanyChanges, CompanyWithInvoices, EntityError, JsonBody, NewCompany, PathParam,
};
use crate::server::ServerHost;

/// GET /companies
pub async fn list_companies(State(host): State<ServerHost>) -> BizResult<Json<Value>> {
    let companies = host.companies.list().await?;
    Ok(Json(json!({ "companies": companies })))
}

/// GET /companies/{code}
///
/// Two sequential reads: the company, then its invoices. A failure on the
/// second read fails the whole request.
pub async fn get_company(
    State(host): State<ServerHost>,
    PathParam(code): PathParam<String>,
) -> BizResult<Json<Value>> {
    let company = host
        .companies
        .get(&code)
        .await?
        .ok_or_else(|| EntityError::company_not_found(&code))?;

    let invoices = host.invoices.list_for_company(&company.code).await?;
    let company = CompanyWithInvoices { company, invoices };

    Ok(Json(json!({ "company": company })))
}

/// POST /companies
pub async fn create_company(
    State(host): State<ServerHost>,
    JsonBody(payload): JsonBody<NewCompany>,
) -> BizResult<(StatusCode, Json<Value>)> {
    let company = host.companies.create(payload).await?;
    tracing::debug!(code = %company.code, "company created");
    Ok((StatusCode::CREATED, Json(json!({ "company": company }))))
}

/// PATCH /companies/{code}
///
/// Answers 201 on success, like the create route.
pub async fn update_company(
    State(host): State<ServerHost>,
    PathParam(code): PathParam<String>,
    JsonBody(changes): JsonBody<CompanyChanges>,
) -> BizResult<(StatusCode, Json<Value>)> {
    let company = host
        .companies
        .update(&code, changes)
        .await?
        .ok_or_else(|| EntityError::company_not_updated(&code))?;

    Ok((StatusCode::CREATED, Json(json!({ "company": company }))))
}

/// DELETE /companies/{code}
///
/// Succeeds whether or not the company existed.
pub async fn delete_company(
    State(host): State<ServerHost>,
    PathParam(code): PathParam<String>,
) -> BizResult<Json<Value>> {
    let removed = host.companies.delete(&code).await?;
    tracing::debug!(code = %code, removed, "company delete");
    Ok(Json(json!({ "msg": format!("{} DELETED!", code) })))
}
