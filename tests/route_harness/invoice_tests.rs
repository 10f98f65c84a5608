//! Route tests for `/invoices`.

/// Generate the `/invoices` route suite for a store backend.
///
/// `$store_factory` must produce a store implementing `CompanyService +
/// InvoiceService + Clone + 'static` with empty tables.
#[macro_export]
macro_rules! invoice_route_tests {
    ($store_factory:expr) => {
        mod invoice_route_tests {
            use super::*;
            use axum::http::StatusCode;
            use serde_json::{Value, json};

            #[tokio::test]
            async fn test_list_invoices() {
                let (server, seeded) = route_harness::seeded_server($store_factory).await;

                let response = server.get("/invoices").await;

                response.assert_status(StatusCode::OK);
                let body: Value = response.json();
                assert_eq!(
                    body,
                    json!({ "invoices": [route_harness::to_json(&seeded.invoice)] })
                );
            }

            #[tokio::test]
            async fn test_get_invoice_includes_company() {
                let (server, seeded) = route_harness::seeded_server($store_factory).await;
                let id = seeded.invoice.id;

                let response = server.get(&format!("/invoices/{}", id)).await;

                response.assert_status(StatusCode::OK);
                let body: Value = response.json();
                assert_eq!(
                    body,
                    json!({
                        "invoice": {
                            "id": id,
                            "amt": 400.0,
                            "paid": false,
                            "add_date": seeded.invoice.add_date.to_string(),
                            "paid_date": null,
                            "company": route_harness::to_json(&seeded.company)
                        }
                    })
                );
            }

            #[tokio::test]
            async fn test_get_unknown_invoice_is_404() {
                let (server, _) = route_harness::seeded_server($store_factory).await;

                let response = server.get("/invoices/987654").await;

                response.assert_status(StatusCode::NOT_FOUND);
                let body: Value = response.json();
                assert_eq!(
                    body,
                    json!({
                        "error": {
                            "message": "Can't find invoice with id of 987654",
                            "status": 404
                        }
                    })
                );
            }

            #[tokio::test]
            async fn test_get_non_numeric_id_is_400() {
                let (server, _) = route_harness::seeded_server($store_factory).await;

                let response = server.get("/invoices/abc").await;

                response.assert_status(StatusCode::BAD_REQUEST);
                let body: Value = response.json();
                assert_eq!(body["error"]["status"], 400);
            }

            #[tokio::test]
            async fn test_undecodable_id_is_400_envelope() {
                let (server, _) = route_harness::seeded_server($store_factory).await;

                let response = server.delete("/invoices/%FF").await;

                response.assert_status(StatusCode::BAD_REQUEST);
                let body: Value = response.json();
                assert_eq!(body["error"]["status"], 400);
                assert!(body["error"]["message"].as_str().unwrap().contains("`id`"));
            }

            #[tokio::test]
            async fn test_create_invoice() {
                let (server, _) = route_harness::seeded_server($store_factory).await;

                let response = server
                    .post("/invoices")
                    .json(&json!({ "comp_code": "ibm", "amt": 125.5 }))
                    .await;

                response.assert_status(StatusCode::CREATED);
                let body: Value = response.json();
                let invoice = &body["invoice"];
                assert!(invoice["id"].as_i64().is_some());
                assert_eq!(invoice["comp_code"], "ibm");
                assert_eq!(invoice["amt"], 125.5);
                assert_eq!(invoice["paid"], false);
                assert_eq!(invoice["add_date"], route_harness::today());
                assert_eq!(invoice["paid_date"], Value::Null);
            }

            #[tokio::test]
            async fn test_create_invoice_for_unknown_company_is_500() {
                let (server, _) = route_harness::seeded_server($store_factory).await;

                let response = server
                    .post("/invoices")
                    .json(&json!({ "comp_code": "ghost", "amt": 10 }))
                    .await;

                response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
                let body: Value = response.json();
                assert!(
                    body["error"]["message"]
                        .as_str()
                        .unwrap()
                        .contains("foreign key")
                );
            }

            #[tokio::test]
            async fn test_create_invoice_with_non_positive_amount_is_500() {
                let (server, _) = route_harness::seeded_server($store_factory).await;

                let response = server
                    .post("/invoices")
                    .json(&json!({ "comp_code": "ibm", "amt": -3 }))
                    .await;

                response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
                let body: Value = response.json();
                assert!(
                    body["error"]["message"]
                        .as_str()
                        .unwrap()
                        .contains("invoices_amt_check")
                );
            }

            #[tokio::test]
            async fn test_pay_then_unpay_invoice() {
                let (server, seeded) = route_harness::seeded_server($store_factory).await;
                let path = format!("/invoices/{}", seeded.invoice.id);

                let response = server
                    .patch(&path)
                    .json(&json!({ "amt": 400, "paid": true }))
                    .await;
                response.assert_status(StatusCode::CREATED);
                let body: Value = response.json();
                assert_eq!(body["invoice"]["paid"], true);
                assert_eq!(body["invoice"]["paid_date"], route_harness::today());

                let response = server
                    .patch(&path)
                    .json(&json!({ "amt": 400, "paid": false }))
                    .await;
                response.assert_status(StatusCode::CREATED);
                let body: Value = response.json();
                assert_eq!(body["invoice"]["paid"], false);
                assert_eq!(body["invoice"]["paid_date"], Value::Null);
            }

            #[tokio::test]
            async fn test_update_amount_only_keeps_paid_state() {
                let (server, seeded) = route_harness::seeded_server($store_factory).await;

                let response = server
                    .patch(&format!("/invoices/{}", seeded.invoice.id))
                    .json(&json!({ "amt": 50 }))
                    .await;

                response.assert_status(StatusCode::CREATED);
                let body: Value = response.json();
                assert_eq!(body["invoice"]["amt"], 50.0);
                assert_eq!(body["invoice"]["paid"], false);
                assert_eq!(body["invoice"]["paid_date"], Value::Null);
            }

            #[tokio::test]
            async fn test_update_unknown_invoice_is_404() {
                let (server, _) = route_harness::seeded_server($store_factory).await;

                let response = server
                    .patch("/invoices/987654")
                    .json(&json!({ "amt": 1 }))
                    .await;

                response.assert_status(StatusCode::NOT_FOUND);
                let body: Value = response.json();
                assert_eq!(
                    body["error"]["message"],
                    "Can't update invoice with id of 987654"
                );
            }

            #[tokio::test]
            async fn test_delete_invoice_is_unconditional() {
                let (server, seeded) = route_harness::seeded_server($store_factory).await;
                let path = format!("/invoices/{}", seeded.invoice.id);
                let expected = json!({ "msg": format!("{} DELETED!", seeded.invoice.id) });

                let first: Value = server.delete(&path).await.json();
                assert_eq!(first, expected);

                let second = server.delete(&path).await;
                second.assert_status(StatusCode::OK);
                assert_eq!(second.json::<Value>(), expected);

                server.get(&path).await.assert_status(StatusCode::NOT_FOUND);
            }

            #[tokio::test]
            async fn test_deleting_company_removes_its_invoices() {
                let (server, seeded) = route_harness::seeded_server($store_factory).await;

                server
                    .delete("/companies/ibm")
                    .await
                    .assert_status(StatusCode::OK);

                server
                    .get(&format!("/invoices/{}", seeded.invoice.id))
                    .await
                    .assert_status(StatusCode::NOT_FOUND);
                let body: Value = server.get("/invoices").await.json();
                assert_eq!(body, json!({ "invoices": [] }));
            }
        }
    };
}
