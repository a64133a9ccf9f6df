//! Verify build/parse methods against JSON test vectors in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected outcomes. Request bodies are compared as parsed JSON, not raw
//! strings, so field ordering cannot produce false negatives.

use gateway_core::{
    Config, Error, HttpMethod, HttpResponse, Plugin, PluginClient, PluginRequest,
};

const BASE_URL: &str = "http://localhost:8001";

fn client() -> PluginClient {
    PluginClient::new(Config::new(BASE_URL))
}

fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "PUT" => HttpMethod::Put,
        "PATCH" => HttpMethod::Patch,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn simulated_response(case: &serde_json::Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        body: sim["body"].as_str().unwrap().to_string(),
    }
}

#[test]
fn create_test_vectors() {
    let raw = include_str!("../../test-vectors/create.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input: PluginRequest = serde_json::from_value(case["input"].clone()).unwrap();
        let expected_req = &case["expected_request"];

        let req = c.build_create(&input).unwrap();
        assert_eq!(
            req.method,
            parse_method(expected_req["method"].as_str().unwrap()),
            "{name}: method"
        );
        assert_eq!(
            req.url,
            format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap()),
            "{name}: url"
        );
        let req_body: serde_json::Value =
            serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(req_body, expected_req["body"], "{name}: body");

        let outcome = c.parse_create(simulated_response(case));
        if let Some(expected_error) = case.get("expected_error") {
            let err = outcome.expect_err(name);
            match err {
                Error::RemoteRejection { body } => {
                    assert!(
                        body.contains(expected_error.as_str().unwrap()),
                        "{name}: error body"
                    );
                }
                other => panic!("{name}: expected RemoteRejection, got {other:?}"),
            }
        } else {
            let plugin = outcome.expect(name);
            let expected: Plugin =
                serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(plugin, expected, "{name}: parsed result");
        }
    }
}

#[test]
fn get_test_vectors() {
    let raw = include_str!("../../test-vectors/get.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_str().unwrap();
        let expected_req = &case["expected_request"];

        let req = c.build_get_by_id(id);
        assert_eq!(
            req.method,
            parse_method(expected_req["method"].as_str().unwrap()),
            "{name}: method"
        );
        assert_eq!(
            req.url,
            format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap()),
            "{name}: url"
        );
        assert!(req.body.is_none(), "{name}: body should be None");

        let result = c.parse_get_by_id(simulated_response(case)).expect(name);
        if case["expected_result"].is_null() {
            assert!(result.is_none(), "{name}: expected absent");
        } else {
            let expected: Plugin =
                serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(result, Some(expected), "{name}: parsed result");
        }
    }
}

#[test]
fn schema_test_vectors() {
    let raw = include_str!("../../test-vectors/schema.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let plugin_name = case["input_name"].as_str().unwrap();
        let expected_req = &case["expected_request"];

        let req = c.build_get_schema(plugin_name);
        assert_eq!(
            req.url,
            format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap()),
            "{name}: url"
        );

        let outcome = c.parse_get_schema(simulated_response(case));
        if let Some(expected_error) = case.get("expected_error") {
            let err = outcome.expect_err(name);
            match err {
                Error::RemoteRejection { body } => {
                    assert!(
                        body.contains(expected_error.as_str().unwrap()),
                        "{name}: error body"
                    );
                }
                other => panic!("{name}: expected RemoteRejection, got {other:?}"),
            }
        } else {
            let schema = outcome.expect(name);
            for field in case["fields_with_default"].as_array().unwrap() {
                let field = field.as_str().unwrap();
                assert!(
                    schema.fields[field].has_default_value(),
                    "{name}: {field} should have a default"
                );
            }
            for field in case["fields_without_default"].as_array().unwrap() {
                let field = field.as_str().unwrap();
                assert!(
                    !schema.fields[field].has_default_value(),
                    "{name}: {field} should have no default"
                );
            }
        }
    }
}
