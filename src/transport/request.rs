//! Browser-like request headers.

/// Browser-like request headers for redirect hops.
///
/// `Accept-Encoding` is left to reqwest; the client decodes no compressed bodies.
pub(crate) struct RequestHeaders;

impl RequestHeaders {
    /// Applies the standard request headers to a `reqwest::RequestBuilder`.
    pub(crate) fn apply_to_request_builder(
        builder: reqwest::RequestBuilder,
    ) -> reqwest::RequestBuilder {
        builder
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .header(
                reqwest::header::ACCEPT_LANGUAGE,
                "zh-CN,zh;q=0.9,en-US;q=0.8,en;q=0.7",
            )
            .header(
                reqwest::header::HeaderName::from_static("sec-fetch-dest"),
                "document",
            )
            .header(
                reqwest::header::HeaderName::from_static("sec-fetch-mode"),
                "navigate",
            )
            .header(reqwest::header::UPGRADE_INSECURE_REQUESTS, "1")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_headers_builds_request() {
        let client = reqwest::Client::new();
        let request = RequestHeaders::apply_to_request_builder(client.get("http://a.test/"))
            .build()
            .expect("request should build");
        let headers = request.headers();
        assert!(headers
            .get(reqwest::header::ACCEPT_LANGUAGE)
            .is_some_and(|v| v.to_str().unwrap_or("").starts_with("zh-CN")));
        assert_eq!(
            headers.get("sec-fetch-mode").map(|v| v.as_bytes()),
            Some(&b"navigate"[..])
        );
        assert!(headers.get(reqwest::header::ACCEPT_ENCODING).is_none());
    }
}
