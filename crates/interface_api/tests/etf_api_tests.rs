//! HTTP tests for the ETF composition API
//!
//! The router runs against the in-memory store from `test_utils`, so every
//! test is hermetic.

use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::{json, Value};

use domain_etf::EtfCompositionPort;
use interface_api::config::ApiConfig;
use interface_api::create_router;
use test_utils::{
    assert_json_ids_increasing, assert_json_keys, assert_json_no_orphans, assert_json_sorted_by,
    DateFixtures, EtfFixtures, FailingEtfStore, InMemoryEtfStore,
};

const ENDPOINTS: [&str; 3] = [
    "/api/etf_data",
    "/api/solactive_etf_details",
    "/api/sp_etf_details",
];

fn server_with(port: Arc<dyn EtfCompositionPort>, config: ApiConfig) -> TestServer {
    TestServer::new(create_router(port, config)).unwrap()
}

fn fixture_server() -> TestServer {
    server_with(Arc::new(EtfFixtures::store()), ApiConfig::default())
}

async fn get_json(server: &TestServer, path: &str, date: &str) -> Value {
    let response = server.get(path).add_query_param("date", date).await;
    response.assert_status_ok();
    response.json::<Value>()
}

mod missing_date {
    use super::*;

    #[tokio::test]
    async fn test_missing_date_is_bad_request() {
        let server = fixture_server();

        for path in ENDPOINTS {
            let response = server.get(path).await;
            response.assert_status(StatusCode::BAD_REQUEST);
            assert_eq!(
                response.json::<Value>(),
                json!({"error": "Date parameter is required."}),
                "{path}"
            );
        }
    }

    #[tokio::test]
    async fn test_empty_date_is_bad_request() {
        let server = fixture_server();

        for path in ENDPOINTS {
            let response = server.get(path).add_query_param("date", "").await;
            response.assert_status(StatusCode::BAD_REQUEST);
        }
    }

    #[tokio::test]
    async fn test_missing_date_never_reaches_the_store() {
        let store = Arc::new(EtfFixtures::store());
        let server = server_with(store.clone(), ApiConfig::default());

        for path in ENDPOINTS {
            server.get(path).await.assert_status(StatusCode::BAD_REQUEST);
        }

        assert!(store.log().snapshot_queries.is_empty());
    }
}

mod etf_data {
    use super::*;

    #[tokio::test]
    async fn test_funds_ordered_by_code_with_nested_stocks() {
        let server = fixture_server();
        let body = get_json(&server, "/api/etf_data", DateFixtures::QUERY_DATE).await;

        assert_json_sorted_by(&body, "etf_code");
        let codes: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["etf_code"].as_str().unwrap())
            .collect();
        assert_eq!(codes, vec!["2800", "2828", "3033"]);

        for fund in body.as_array().unwrap() {
            assert_json_sorted_by(&fund["stocks"], "stock_code");
        }
    }

    #[tokio::test]
    async fn test_fund_shape() {
        let server = fixture_server();
        let body = get_json(&server, "/api/etf_data", DateFixtures::QUERY_DATE).await;

        let tracker = &body[0];
        assert_json_keys(
            tracker,
            &[
                "etf_code",
                "etf_name",
                "fund_cash_component",
                "shares_outstanding",
                "fund_date",
                "stocks",
            ],
        );
        assert_eq!(tracker["etf_name"], "Tracker Fund of Hong Kong");
        assert_eq!(tracker["fund_cash_component"], "-58213.72");
        assert_eq!(tracker["shares_outstanding"], "5713500000");
        assert_eq!(tracker["fund_date"], "20240115");

        assert_eq!(
            tracker["stocks"][0],
            json!({
                "stock_code": "0005",
                "stock_name": "HSBC Holdings",
                "isin": "GB0005405286",
                "exchange": "XHKG",
                "currency": "HKD",
                "shares_amount": "610000",
                "stock_price": "61.05"
            })
        );
    }

    #[tokio::test]
    async fn test_stocks_nested_under_their_own_fund() {
        let server = fixture_server();
        let body = get_json(&server, "/api/etf_data", DateFixtures::QUERY_DATE).await;

        let tech = body
            .as_array()
            .unwrap()
            .iter()
            .find(|f| f["etf_code"] == "3033")
            .unwrap();
        let stocks: Vec<&str> = tech["stocks"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["stock_code"].as_str().unwrap())
            .collect();
        assert_eq!(stocks, vec!["0020", "0700", "9988"]);
    }

    #[tokio::test]
    async fn test_unknown_date_is_empty_list() {
        let server = fixture_server();
        let body = get_json(&server, "/api/etf_data", DateFixtures::EMPTY_QUERY_DATE).await;

        assert_eq!(body, json!([]));
    }
}

mod solactive_etf_details {
    use super::*;

    #[tokio::test]
    async fn test_summaries_ordered_by_id() {
        let server = fixture_server();
        let body = get_json(&server, "/api/solactive_etf_details", DateFixtures::QUERY_DATE).await;

        assert_json_ids_increasing(&body["etf_details"], "id");
        assert_eq!(body["etf_details"][0]["etf_code"], "3033");
        assert_eq!(body["etf_details"][0]["id"], 1);
        assert_json_keys(
            &body["etf_details"][0],
            &[
                "id",
                "etf_code",
                "etf_name",
                "fund_cash_component",
                "shares_outstanding",
                "fund_date",
            ],
        );
    }

    #[tokio::test]
    async fn test_stock_details_flat_and_ordered() {
        let server = fixture_server();
        let body = get_json(&server, "/api/solactive_etf_details", DateFixtures::QUERY_DATE).await;

        let stocks = &body["stock_details"];
        assert_eq!(stocks.as_array().unwrap().len(), 8);
        assert_json_sorted_by(stocks, "stock_code");
        assert_json_no_orphans(&body["etf_details"], stocks);
        assert_json_keys(
            &stocks[0],
            &[
                "etf_code",
                "stock_code",
                "stock_name",
                "isin",
                "exchange",
                "currency",
                "shares_amount",
                "stock_price",
            ],
        );

        // Shared stock, ties broken by fund code
        assert_eq!(stocks[2]["stock_code"], "0700");
        assert_eq!(stocks[2]["etf_code"], "2800");
        assert_eq!(stocks[3]["etf_code"], "3033");
    }

    #[tokio::test]
    async fn test_unknown_date_is_empty_details() {
        let server = fixture_server();
        let body = get_json(&server, "/api/solactive_etf_details", DateFixtures::EMPTY_QUERY_DATE).await;

        assert_eq!(body, json!({"etf_details": [], "stock_details": []}));
    }
}

mod sp_etf_details {
    use super::*;

    #[tokio::test]
    async fn test_summaries_ordered_by_code_without_id() {
        let server = fixture_server();
        let body = get_json(&server, "/api/sp_etf_details", DateFixtures::QUERY_DATE).await;

        assert_json_sorted_by(&body["etf_details"], "etf_code");
        for summary in body["etf_details"].as_array().unwrap() {
            assert!(summary.get("id").is_none());
        }
        assert_json_no_orphans(&body["etf_details"], &body["stock_details"]);
    }

    #[tokio::test]
    async fn test_unknown_date_matches_solactive_shape() {
        let server = fixture_server();
        let sp = server
            .get("/api/sp_etf_details")
            .add_query_param("date", DateFixtures::EMPTY_QUERY_DATE)
            .await;
        let solactive = server
            .get("/api/solactive_etf_details")
            .add_query_param("date", DateFixtures::EMPTY_QUERY_DATE)
            .await;

        sp.assert_status_ok();
        assert_eq!(sp.text(), solactive.text());
    }

    #[tokio::test]
    async fn test_single_fund_on_next_date() {
        let server = fixture_server();
        let body = get_json(&server, "/api/sp_etf_details", DateFixtures::NEXT_QUERY_DATE).await;

        assert_eq!(body["etf_details"].as_array().unwrap().len(), 1);
        assert_eq!(body["etf_details"][0]["fund_date"], "20240116");
        assert_eq!(body["stock_details"].as_array().unwrap().len(), 3);
    }
}

mod date_handling {
    use super::*;

    #[tokio::test]
    async fn test_hyphenated_date_queries_compact_key() {
        let store = Arc::new(EtfFixtures::store());
        let server = server_with(store.clone(), ApiConfig::default());

        server
            .get("/api/etf_data")
            .add_query_param("date", "2024-01-15")
            .await
            .assert_status_ok();

        let log = store.log();
        assert_eq!(log.snapshot_queries.len(), 1);
        assert_eq!(log.snapshot_queries[0].fund_date.as_key(), "20240115");
    }

    #[tokio::test]
    async fn test_compact_date_accepted() {
        let server = fixture_server();
        let body = get_json(&server, "/api/etf_data", "20240115").await;

        assert_eq!(body.as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_repeated_date_uses_first_value() {
        let store = Arc::new(EtfFixtures::store());
        let server = server_with(store.clone(), ApiConfig::default());

        for path in ENDPOINTS {
            let response = server
                .get(path)
                .add_query_param("date", "2024-01-15")
                .add_query_param("date", "2024-01-16")
                .await;
            response.assert_status_ok();
        }

        let response = server.get("/api/etf_data?date=2024-01-15&date=2024-01-16").await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>().as_array().unwrap().len(), 3);

        let log = store.log();
        assert!(log.snapshot_queries.iter().all(|q| q.fund_date.as_key() == "20240115"));
    }

    #[tokio::test]
    async fn test_malformed_date_matches_nothing() {
        let server = fixture_server();

        for date in ["15/01/2024", "not-a-date", "2024-13-45"] {
            let body = get_json(&server, "/api/solactive_etf_details", date).await;
            assert_eq!(body, json!({"etf_details": [], "stock_details": []}), "{date}");
        }
    }

    #[tokio::test]
    async fn test_no_holdings_query_without_summaries() {
        let store = Arc::new(EtfFixtures::store());
        let server = server_with(store.clone(), ApiConfig::default());

        for path in ENDPOINTS {
            server
                .get(path)
                .add_query_param("date", DateFixtures::EMPTY_QUERY_DATE)
                .await
                .assert_status_ok();
        }

        assert_eq!(store.log().holdings_queries, 0);
    }

    #[tokio::test]
    async fn test_identical_requests_identical_bodies() {
        let server = fixture_server();

        for path in ENDPOINTS {
            let first = server.get(path).add_query_param("date", DateFixtures::QUERY_DATE).await;
            let second = server.get(path).add_query_param("date", DateFixtures::QUERY_DATE).await;
            assert_eq!(first.text(), second.text(), "{path}");
        }
    }
}

mod failures {
    use super::*;

    #[tokio::test]
    async fn test_data_source_failure_is_internal_error() {
        let store = FailingEtfStore::new("connection refused");
        let server = server_with(Arc::new(store), ApiConfig::default());

        for path in ENDPOINTS {
            let response = server.get(path).add_query_param("date", DateFixtures::QUERY_DATE).await;
            response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(
                response.json::<Value>(),
                json!({"error": "connection refused"}),
                "{path}"
            );
        }
    }

    #[tokio::test]
    async fn test_failure_details_can_be_hidden() {
        let config = ApiConfig {
            expose_error_details: false,
            ..ApiConfig::default()
        };
        let server = server_with(Arc::new(FailingEtfStore::default()), config);

        let response = server
            .get("/api/sp_etf_details")
            .add_query_param("date", DateFixtures::QUERY_DATE)
            .await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.json::<Value>(), json!({"error": "Internal server error"}));
    }

    #[tokio::test]
    async fn test_missing_date_checked_before_data_source() {
        let server = server_with(Arc::new(FailingEtfStore::default()), ApiConfig::default());

        server
            .get("/api/etf_data")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}

mod cross_cutting {
    use super::*;

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let server = fixture_server();

        let response = server
            .get("/api/etf_data")
            .add_query_param("date", DateFixtures::QUERY_DATE)
            .add_header(
                HeaderName::from_static("origin"),
                HeaderValue::from_static("http://dashboard.local"),
            )
            .await;

        response.assert_status_ok();
        assert_eq!(response.header("access-control-allow-origin"), "*");
    }

    #[tokio::test]
    async fn test_request_id_generated() {
        let server = fixture_server();

        let response = server.get("/health").await;
        let id = response.header("x-request-id");
        assert!(!id.is_empty());
    }

    #[tokio::test]
    async fn test_request_id_propagated() {
        let server = fixture_server();

        let response = server
            .get("/api/etf_data")
            .add_header(
                HeaderName::from_static("x-request-id"),
                HeaderValue::from_static("dashboard-42"),
            )
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.header("x-request-id"), "dashboard-42");
    }

    #[tokio::test]
    async fn test_health() {
        let server = fixture_server();

        let response = server.get("/health").await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["status"], "healthy");
    }

    #[tokio::test]
    async fn test_readiness_with_reachable_store() {
        let server = server_with(Arc::new(InMemoryEtfStore::empty()), ApiConfig::default());

        let response = server.get("/health/ready").await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["status"], "ready");
    }

    #[tokio::test]
    async fn test_readiness_with_unreachable_store() {
        let server = server_with(Arc::new(FailingEtfStore::default()), ApiConfig::default());

        let response = server.get("/health/ready").await;
        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(response.json::<Value>()["status"], "unavailable");
    }
}
