//! Tests for HTTP request/response types.

use super::{HttpRequest, HttpResponse};

fn url() -> url::Url {
    url::Url::parse("https://slack.com/api/chat.postMessage").unwrap()
}

mod http_request {
    use super::*;

    #[test]
    fn new_creates_request_with_method_and_url() {
        let req = HttpRequest::new(http::Method::PUT, url());

        assert_eq!(req.method, http::Method::PUT);
        assert_eq!(req.url, url());
        assert!(req.headers.is_empty());
        assert!(req.body.is_none());
    }

    #[test]
    fn post_creates_post_request() {
        let req = HttpRequest::post(url());

        assert_eq!(req.method, http::Method::POST);
    }

    #[test]
    fn with_body_sets_body() {
        let req = HttpRequest::post(url()).with_body(b"raw".to_vec());

        assert_eq!(req.body.as_deref(), Some(&b"raw"[..]));
    }

    #[test]
    fn with_header_appends_values() {
        let req = HttpRequest::post(url())
            .with_header(
                http::header::ACCEPT,
                http::HeaderValue::from_static("application/json"),
            )
            .with_header(http::header::ACCEPT, http::HeaderValue::from_static("text/plain"));

        let values: Vec<_> = req.headers.get_all(http::header::ACCEPT).iter().collect();
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn with_form_encodes_fields_and_sets_content_type() {
        let req = HttpRequest::post(url()).with_form(&[("channel", "#general"), ("text", "a b&c")]);

        assert_eq!(
            req.headers.get(http::header::CONTENT_TYPE).unwrap(),
            "application/x-www-form-urlencoded"
        );
        assert_eq!(
            req.body.as_deref(),
            Some(&b"channel=%23general&text=a+b%26c"[..])
        );
    }

    #[test]
    fn form_fields_round_trip_unicode() {
        let req = HttpRequest::post(url()).with_form(&[("text", "こんにちは\n改行")]);

        assert_eq!(
            req.form_fields(),
            vec![("text".to_string(), "こんにちは\n改行".to_string())]
        );
    }

    #[test]
    fn form_fields_empty_without_body() {
        assert!(HttpRequest::post(url()).form_fields().is_empty());
    }
}

mod http_response {
    use super::*;

    #[test]
    fn ok_builds_200_response() {
        let resp = HttpResponse::ok(r#"{"ok":true}"#);

        assert_eq!(resp.status, http::StatusCode::OK);
        assert!(resp.is_success());
        assert_eq!(resp.body_text(), Some(r#"{"ok":true}"#));
    }

    #[test]
    fn is_success_false_for_errors() {
        let resp = HttpResponse::new(
            http::StatusCode::INTERNAL_SERVER_ERROR,
            http::HeaderMap::new(),
            vec![],
        );

        assert!(!resp.is_success());
    }

    #[test]
    fn body_text_none_for_invalid_utf8() {
        let resp = HttpResponse::ok(vec![0xff, 0xfe]);

        assert!(resp.body_text().is_none());
    }
}
