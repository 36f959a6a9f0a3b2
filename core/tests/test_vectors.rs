//! Verify request building against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes a client configuration, call inputs and the
//! expected request. Bodies are compared as parsed JSON (not raw strings) to
//! avoid false negatives from field ordering.

use jet_core::{ApiError, ClientConfig, Headers, HttpMethod, JetClient};

// ---------------------------------------------------------------------------
// URL resolution
// ---------------------------------------------------------------------------

#[test]
fn url_test_vectors() {
    let raw = include_str!("../../test-vectors/url.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let config = ClientConfig {
            base_url: case["base_url"].as_str().map(str::to_string),
            ..ClientConfig::default()
        };
        let client = JetClient::new(config);
        let result = client.resolve_url(case["path"].as_str());

        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            match expected_error.as_str().unwrap() {
                "MissingUrl" => {
                    assert!(matches!(err, ApiError::MissingUrl), "{name}: expected MissingUrl")
                }
                other => panic!("{name}: unknown expected_error: {other}"),
            }
        } else {
            assert_eq!(result.unwrap(), case["expected"].as_str().unwrap(), "{name}: url");
        }
    }
}

// ---------------------------------------------------------------------------
// Full request building
// ---------------------------------------------------------------------------

#[test]
fn request_test_vectors() {
    let raw = include_str!("../../test-vectors/requests.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let config = ClientConfig::from_json(&case["config"].to_string()).unwrap();
        let client = JetClient::new(config);

        let method = HttpMethod::from(case["method"].as_str().unwrap());
        let body = case.get("body").cloned();
        let headers: Option<Headers> = case
            .get("headers")
            .map(|h| serde_json::from_value(h.clone()).unwrap());
        let secure = case["secure"].as_bool().unwrap();

        let req = client
            .build(method, case["path"].as_str(), body, headers.as_ref(), None, secure)
            .unwrap();

        let expected_req = &case["expected_request"];
        assert_eq!(req.method.as_str(), expected_req["method"].as_str().unwrap(), "{name}: method");
        assert_eq!(req.url, expected_req["url"].as_str().unwrap(), "{name}: url");

        let expected_headers: Vec<(String, String)> = expected_req["headers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let arr = h.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(req.headers.as_slice(), expected_headers.as_slice(), "{name}: headers");

        let req_body: serde_json::Value = req
            .body
            .as_deref()
            .map(|b| serde_json::from_str(b).unwrap())
            .unwrap_or(serde_json::Value::Null);
        assert_eq!(req_body, expected_req["body"], "{name}: body");
    }
}
