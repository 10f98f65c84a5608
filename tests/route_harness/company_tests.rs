//! Route tests for `/companies`.

/// Generate the `/companies` route suite for a store backend.
///
/// `$store_factory` must produce a store implementing `CompanyService +
/// InvoiceService + Clone + 'static` with empty tables.
///
/// # Generated Tests
///
/// - list, get (with invoices), create, update, delete
/// - 404 for unknown codes on GET and PATCH
/// - 500 for constraint violations on POST
/// - create-then-get round trip
#[macro_export]
macro_rules! company_route_tests {
    ($store_factory:expr) => {
        mod company_route_tests {
            use super::*;
            use axum::http::StatusCode;
            use biztime::prelude::*;
            use serde_json::{Value, json};

            // ==============================================================
            // GET /companies
            // ==============================================================

            #[tokio::test]
            async fn test_list_with_one_company() {
                let (server, seeded) = route_harness::seeded_server($store_factory).await;

                let response = server.get("/companies").await;

                response.assert_status(StatusCode::OK);
                let body: Value = response.json();
                assert_eq!(
                    body,
                    json!({ "companies": [route_harness::to_json(&seeded.company)] })
                );
            }

            // ==============================================================
            // GET /companies/{code}
            // ==============================================================

            #[tokio::test]
            async fn test_get_includes_invoices() {
                let (server, seeded) = route_harness::seeded_server($store_factory).await;

                let response = server.get("/companies/ibm").await;

                response.assert_status(StatusCode::OK);
                let body: Value = response.json();
                assert_eq!(
                    body,
                    json!({
                        "company": {
                            "code": "ibm",
                            "name": "IBM",
                            "description": "Big blue.",
                            "invoices": [route_harness::to_json(&seeded.invoice)]
                        }
                    })
                );
            }

            #[tokio::test]
            async fn test_get_only_lists_own_invoices() {
                let store = $store_factory;
                let seeded = route_harness::seed(&store).await;
                CompanyService::create(
                    &store,
                    NewCompany {
                        code: Some("apple".to_string()),
                        name: Some("Apple Computer".to_string()),
                        description: None,
                    },
                )
                .await
                .unwrap();
                let second = InvoiceService::create(
                    &store,
                    NewInvoice {
                        comp_code: Some("ibm".to_string()),
                        amt: Some(25.5),
                    },
                )
                .await
                .unwrap();
                InvoiceService::create(
                    &store,
                    NewInvoice {
                        comp_code: Some("apple".to_string()),
                        amt: Some(99.0),
                    },
                )
                .await
                .unwrap();

                let server = axum_test::TestServer::new(
                    ServerBuilder::new().with_store(store).build().unwrap(),
                );
                let body: Value = server.get("/companies/ibm").await.json();

                let mut ids: Vec<i64> = body["company"]["invoices"]
                    .as_array()
                    .unwrap()
                    .iter()
                    .map(|inv| {
                        assert_eq!(inv["comp_code"], "ibm");
                        inv["id"].as_i64().unwrap()
                    })
                    .collect();
                ids.sort_unstable();
                assert_eq!(ids, vec![seeded.invoice.id as i64, second.id as i64]);
            }

            #[tokio::test]
            async fn test_get_unknown_code_is_404() {
                let (server, _) = route_harness::seeded_server($store_factory).await;

                let response = server.get("/companies/feaf").await;

                response.assert_status(StatusCode::NOT_FOUND);
                let body: Value = response.json();
                assert_eq!(
                    body,
                    json!({
                        "error": {
                            "message": "Can't find company with code of feaf",
                            "status": 404
                        }
                    })
                );
            }

            #[tokio::test]
            async fn test_undecodable_code_is_400_envelope() {
                let (server, _) = route_harness::seeded_server($store_factory).await;

                let response = server.get("/companies/%FF").await;

                response.assert_status(StatusCode::BAD_REQUEST);
                let body: Value = response.json();
                assert_eq!(body["error"]["status"], 400);
                assert!(body["error"]["message"].as_str().unwrap().contains("`code`"));
            }

            // ==============================================================
            // POST /companies
            // ==============================================================

            #[tokio::test]
            async fn test_create_company() {
                let (server, _) = route_harness::seeded_server($store_factory).await;

                let response = server
                    .post("/companies")
                    .json(&json!({
                        "code": "apple",
                        "name": "Apple Computer",
                        "description": "Overpriced junk."
                    }))
                    .await;

                response.assert_status(StatusCode::CREATED);
                let body: Value = response.json();
                assert_eq!(
                    body,
                    json!({
                        "company": {
                            "code": "apple",
                            "name": "Apple Computer",
                            "description": "Overpriced junk."
                        }
                    })
                );
            }

            #[tokio::test]
            async fn test_create_duplicate_code_is_500() {
                let (server, _) = route_harness::seeded_server($store_factory).await;

                let response = server
                    .post("/companies")
                    .json(&json!({ "code": "ibm", "name": "Another", "description": "x" }))
                    .await;

                response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
                let body: Value = response.json();
                assert_eq!(body["error"]["status"], 500);
                assert!(
                    body["error"]["message"]
                        .as_str()
                        .unwrap()
                        .contains("duplicate key")
                );
            }

            #[tokio::test]
            async fn test_create_missing_name_is_500() {
                let (server, _) = route_harness::seeded_server($store_factory).await;

                let response = server
                    .post("/companies")
                    .json(&json!({ "code": "nameless" }))
                    .await;

                response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
                let body: Value = response.json();
                assert!(
                    body["error"]["message"]
                        .as_str()
                        .unwrap()
                        .contains("not-null")
                );
            }

            #[tokio::test]
            async fn test_create_then_get_round_trip() {
                let (server, _) = route_harness::seeded_server($store_factory).await;

                server
                    .post("/companies")
                    .json(&json!({
                        "code": "apple",
                        "name": "Apple Computer",
                        "description": "Overpriced junk."
                    }))
                    .await
                    .assert_status(StatusCode::CREATED);

                let body: Value = server.get("/companies/apple").await.json();
                assert_eq!(
                    body,
                    json!({
                        "company": {
                            "code": "apple",
                            "name": "Apple Computer",
                            "description": "Overpriced junk.",
                            "invoices": []
                        }
                    })
                );
            }

            // ==============================================================
            // PATCH /companies/{code}
            // ==============================================================

            #[tokio::test]
            async fn test_update_company() {
                let (server, seeded) = route_harness::seeded_server($store_factory).await;

                let response = server
                    .patch("/companies/ibm")
                    .json(&json!({ "code": "ibm", "name": "IBM", "description": "GOAT" }))
                    .await;

                response.assert_status(StatusCode::CREATED);
                let body: Value = response.json();
                assert_eq!(
                    body,
                    json!({
                        "company": {
                            "code": seeded.company.code,
                            "name": "IBM",
                            "description": "GOAT"
                        }
                    })
                );
            }

            #[tokio::test]
            async fn test_update_unknown_code_is_404() {
                let (server, _) = route_harness::seeded_server($store_factory).await;

                let response = server.patch("/companies/android").await;

                response.assert_status(StatusCode::NOT_FOUND);
                let body: Value = response.json();
                assert_eq!(
                    body["error"]["message"],
                    "Can't update company with code of android"
                );
                assert_eq!(body["error"]["status"], 404);
            }

            // ==============================================================
            // DELETE /companies/{code}
            // ==============================================================

            #[tokio::test]
            async fn test_delete_company() {
                let (server, _) = route_harness::seeded_server($store_factory).await;

                let response = server.delete("/companies/ibm").await;

                response.assert_status(StatusCode::OK);
                let body: Value = response.json();
                assert_eq!(body, json!({ "msg": "ibm DELETED!" }));

                server
                    .get("/companies/ibm")
                    .await
                    .assert_status(StatusCode::NOT_FOUND);
            }

            #[tokio::test]
            async fn test_delete_unknown_code_still_succeeds() {
                let (server, _) = route_harness::seeded_server($store_factory).await;

                let response = server.delete("/companies/nobody").await;

                response.assert_status(StatusCode::OK);
                let body: Value = response.json();
                assert_eq!(body, json!({ "msg": "nobody DELETED!" }));
            }
        }
    };
}
