//! Tests for the campaign server API
//!
//! Test categories:
//! - Endpoint integration tests (axum-test)
//! - Request body fuzzing (proptest)

#[cfg(test)]
mod http_tests {
    //! HTTP endpoint integration tests using axum-test

    use std::net::SocketAddr;
    use std::sync::Arc;

    use axum::http::StatusCode;
    use axum_test::multipart::{MultipartForm, Part};
    use axum_test::TestServer;
    use campaign_core::{CampaignConfig, SimulatedMailer};
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    use crate::app::{build_router, with_rate_limit, AppState, DEFAULT_MAX_UPLOAD_BYTES};

    const CSV: &str = "LeadID,First Name,Last Name,Email,Phone,Interest Category,Lead Score,Buyer Persona
L1,Ada,Lovelace,ada@example.com,555-0100,Analytics,9,Enterprise
L2,Alan,Turing,not-an-email,555-0101,Security,4,Startup

L3,Grace,Hopper,grace@example.com,555-0102,Compilers,6,Technical Buyer
";

    /// Test server whose mailer always succeeds and never waits
    fn create_test_server() -> TestServer {
        create_server_with(1.0, DEFAULT_MAX_UPLOAD_BYTES)
    }

    fn create_server_with(success_rate: f64, max_upload_bytes: usize) -> TestServer {
        TestServer::new(test_router(success_rate, max_upload_bytes)).unwrap()
    }

    fn test_router(success_rate: f64, max_upload_bytes: usize) -> axum::Router {
        let mailer = SimulatedMailer::with_seed(success_rate, 11).unwrap();
        let state = AppState::new(Arc::new(mailer), CampaignConfig::with_delay_ms(0));
        build_router(state, max_upload_bytes)
    }

    fn csv_form(name: &str, body: &str) -> MultipartForm {
        MultipartForm::new().add_part(
            "file",
            Part::bytes(body.as_bytes().to_vec())
                .file_name(name)
                .mime_type("text/csv"),
        )
    }

    fn credentials() -> Value {
        json!({ "email": "sales@example.com", "appPassword": "abcd efgh ijkl mnop" })
    }

    // ============================================================
    // Dashboard & Health
    // ============================================================

    #[tokio::test]
    async fn test_health_returns_200() {
        let server = create_test_server();
        let response = server.get("/health").await;
        response.assert_status_ok();

        let json = response.json::<Value>();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["service"], "campaign-api");
    }

    #[tokio::test]
    async fn test_dashboard_serves_html() {
        let server = create_test_server();
        let response = server.get("/").await;
        response.assert_status_ok();
        assert!(response.text().contains("/api/send-emails"));
    }

    // ============================================================
    // Upload
    // ============================================================

    #[tokio::test]
    async fn test_upload_parses_leads() {
        let server = create_test_server();
        let response = server
            .post("/api/upload")
            .multipart(csv_form("leads.csv", CSV))
            .await;
        response.assert_status_ok();

        let json = response.json::<Value>();
        assert_eq!(json["success"], true);
        assert_eq!(json["leads"].as_array().unwrap().len(), 3);
        assert_eq!(json["leads"][0]["LeadID"], "L1");
        assert_eq!(json["leads"][0]["Lead Score"], 9.0);
        assert_eq!(json["leads"][2]["Buyer Persona"], "Technical Buyer");
        assert_eq!(
            json["stats"],
            json!({ "totalLeads": 3, "emailsSent": 0, "emailsFailed": 0 })
        );
    }

    #[tokio::test]
    async fn test_upload_ignores_other_fields() {
        let server = create_test_server();
        let form = MultipartForm::new()
            .add_text("note", "ignored")
            .add_part(
                "file",
                Part::bytes(CSV.as_bytes().to_vec()).file_name("LEADS.CSV"),
            );

        let response = server.post("/api/upload").multipart(form).await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["leads"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_upload_without_file_is_rejected() {
        let server = create_test_server();
        let form = MultipartForm::new().add_text("note", "no file here");

        let response = server.post("/api/upload").multipart(form).await;
        response.assert_status_bad_request();

        let json = response.json::<Value>();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "No file provided");
    }

    #[tokio::test]
    async fn test_upload_rejects_non_csv_name() {
        let server = create_test_server();
        let response = server
            .post("/api/upload")
            .multipart(csv_form("leads.xlsx", CSV))
            .await;
        response.assert_status_bad_request();
        assert_eq!(response.json::<Value>()["error"], "Please upload a CSV file");
    }

    #[tokio::test]
    async fn test_upload_of_non_multipart_body_fails() {
        let server = create_test_server();
        let response = server.post("/api/upload").json(&json!({ "csv": CSV })).await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.json::<Value>()["error"], "Failed to process file");
    }

    #[tokio::test]
    async fn test_upload_header_only_file() {
        let server = create_test_server();
        let response = server
            .post("/api/upload")
            .multipart(csv_form("empty.csv", "LeadID,Email\n"))
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["stats"]["totalLeads"], 0);
    }

    #[tokio::test]
    async fn test_upload_over_limit_is_refused() {
        let server = create_server_with(1.0, 64);
        let big = format!("LeadID,Email\n{}", "L,a@b.co\n".repeat(100));
        let response = server
            .post("/api/upload")
            .multipart(csv_form("big.csv", &big))
            .await;
        response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);

        let json = response.json::<Value>();
        assert_eq!(json["success"], false);
        assert_eq!(json["code"], "PAYLOAD_TOO_LARGE");
    }

    // ============================================================
    // Send
    // ============================================================

    #[tokio::test]
    async fn test_upload_then_send() {
        let server = create_test_server();
        let uploaded = server
            .post("/api/upload")
            .multipart(csv_form("leads.csv", CSV))
            .await
            .json::<Value>();

        let response = server
            .post("/api/send-emails")
            .json(&json!({
                "leads": uploaded["leads"],
                "emailCredentials": credentials(),
            }))
            .await;
        response.assert_status_ok();

        let json = response.json::<Value>();
        assert_eq!(json["success"], true);
        assert_eq!(json["emailsSent"], 2);
        assert_eq!(json["emailsFailed"], 1);
        assert_eq!(json["message"], "Email campaign completed! 2 successful, 1 failed");

        let leads = json["updatedLeads"].as_array().unwrap();
        assert_eq!(leads[0]["Email Status"], "Sent");
        assert_eq!(leads[1]["Email Status"], "Failed: Invalid email format");
        assert_eq!(leads[2]["Email Status"], "Sent");
        assert_eq!(leads[2]["Lead Score"], 6.0);

        let results = json["results"].as_array().unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[1]["leadId"], "L2");
        assert!(results[0]["messageId"].is_string());
    }

    #[tokio::test]
    async fn test_send_with_failing_mailer() {
        let server = create_server_with(0.0, DEFAULT_MAX_UPLOAD_BYTES);
        let response = server
            .post("/api/send-emails")
            .json(&json!({
                "leads": [{ "LeadID": "1", "Email": "a@example.com" }],
                "emailCredentials": credentials(),
            }))
            .await;
        response.assert_status_ok();

        let json = response.json::<Value>();
        assert_eq!(json["emailsSent"], 0);
        assert_eq!(
            json["updatedLeads"][0]["Email Status"],
            "Failed: Temporary server error"
        );
        assert_eq!(json["results"][0]["error"], "Temporary server error");
    }

    #[tokio::test]
    async fn test_send_keeps_unknown_columns() {
        let server = create_test_server();
        let response = server
            .post("/api/send-emails")
            .json(&json!({
                "leads": [{ "LeadID": "1", "Email": "a@example.com", "Company": "Acme" }],
                "emailCredentials": credentials(),
                "emailSubject": "Spring promo",
            }))
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["updatedLeads"][0]["Company"], "Acme");
    }

    #[tokio::test]
    async fn test_send_empty_batch() {
        let server = create_test_server();
        let response = server
            .post("/api/send-emails")
            .json(&json!({ "leads": [], "emailCredentials": credentials() }))
            .await;
        response.assert_status_ok();

        let json = response.json::<Value>();
        assert_eq!(json["emailsSent"], 0);
        assert_eq!(json["emailsFailed"], 0);
        assert_eq!(json["updatedLeads"], json!([]));
    }

    #[tokio::test]
    async fn test_send_rejects_missing_leads() {
        let server = create_test_server();
        let response = server
            .post("/api/send-emails")
            .json(&json!({ "emailCredentials": credentials() }))
            .await;
        response.assert_status_bad_request();

        let json = response.json::<Value>();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Missing required data");
    }

    #[tokio::test]
    async fn test_send_rejects_incomplete_credentials() {
        let server = create_test_server();

        for creds in [
            json!({ "email": "sales@example.com", "appPassword": "" }),
            json!({ "email": "", "appPassword": "pw" }),
            json!({}),
        ] {
            let response = server
                .post("/api/send-emails")
                .json(&json!({ "leads": [], "emailCredentials": creds }))
                .await;
            response.assert_status_bad_request();
        }

        let response = server
            .post("/api/send-emails")
            .json(&json!({ "leads": [] }))
            .await;
        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_send_rejects_malformed_json() {
        let server = create_test_server();
        let response = server
            .post("/api/send-emails")
            .text("{ not json")
            .content_type("application/json")
            .await;
        response.assert_status_bad_request();
        assert_eq!(response.json::<Value>()["code"], "INVALID_REQUEST");
    }

    #[tokio::test]
    async fn test_send_over_limit_is_refused() {
        let server = create_server_with(1.0, 64);
        let leads: Vec<Value> = (0..20)
            .map(|i| json!({ "LeadID": i.to_string(), "Email": "a@example.com" }))
            .collect();
        let response = server
            .post("/api/send-emails")
            .json(&json!({ "leads": leads, "emailCredentials": credentials() }))
            .await;
        response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(response.json::<Value>()["code"], "PAYLOAD_TOO_LARGE");
    }

    #[tokio::test]
    async fn test_send_requires_json_content_type() {
        let server = create_test_server();
        let response = server
            .post("/api/send-emails")
            .text(r#"{"leads":[]}"#)
            .await;
        response.assert_status(StatusCode::UNSUPPORTED_MEDIA_TYPE);

        let json = response.json::<Value>();
        assert_eq!(json["success"], false);
        assert_eq!(json["code"], "UNSUPPORTED_MEDIA_TYPE");
    }

    #[tokio::test]
    async fn test_send_rejects_text_score() {
        let server = create_test_server();
        let response = server
            .post("/api/send-emails")
            .json(&json!({
                "leads": [{ "LeadID": "1", "Lead Score": "very high" }],
                "emailCredentials": credentials(),
            }))
            .await;
        response.assert_status_bad_request();
    }

    // ============================================================
    // Rate limiting
    // ============================================================

    #[tokio::test]
    async fn test_rate_limit_uses_json_envelope() {
        let app = with_rate_limit(test_router(1.0, DEFAULT_MAX_UPLOAD_BYTES), 1).unwrap();
        let server =
            TestServer::new(app.into_make_service_with_connect_info::<SocketAddr>()).unwrap();

        // Burst of two, then refused
        server.get("/health").await.assert_status_ok();
        server.get("/health").await.assert_status_ok();
        let response = server.get("/health").await;
        response.assert_status(StatusCode::TOO_MANY_REQUESTS);

        let json = response.json::<Value>();
        assert_eq!(json["success"], false);
        assert_eq!(json["code"], "RATE_LIMIT_EXCEEDED");
    }

    #[test]
    fn test_zero_rate_limit_is_rejected() {
        assert!(with_rate_limit(test_router(1.0, DEFAULT_MAX_UPLOAD_BYTES), 0).is_err());
    }
}

#[cfg(test)]
mod property_tests {
    use proptest::prelude::*;
    use serde_json::json;

    use crate::api::SendEmailsRequest;

    proptest! {
        /// Property: any string credential pair deserializes; completeness decides acceptance
        #[test]
        fn credentials_always_deserialize(email in ".{0,40}", password in ".{0,40}") {
            let body = json!({
                "leads": [],
                "emailCredentials": { "email": email, "appPassword": password },
            });
            let req: SendEmailsRequest = serde_json::from_value(body).unwrap();
            let creds = req.email_credentials.unwrap();
            prop_assert_eq!(
                creds.is_complete(),
                !email.is_empty() && !password.is_empty()
            );
        }

        /// Property: numeric scores in any JSON form are accepted
        #[test]
        fn numeric_scores_accepted(score in 0u32..100, as_string in any::<bool>()) {
            let value = if as_string { json!(score.to_string()) } else { json!(score) };
            let body = json!({ "leads": [{ "LeadID": "1", "Lead Score": value }] });
            let req: SendEmailsRequest = serde_json::from_value(body).unwrap();
            prop_assert_eq!(req.leads.unwrap()[0].lead_score, Some(score as f64));
        }
    }
}
