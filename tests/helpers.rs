// Shared test helpers for mock servers and configuration.

use httptest::Server;

use search_digest::Config;

/// Results page header as the render service returns it.
#[allow(dead_code)] // Used by other test files
pub const RESULTS_HEADER: &str = "时间不限所有网页和文件站点内检索\n百度为您找到以下结果";

/// Absolute URL for `path` on the mock server.
pub fn url(server: &Server, path: &str) -> String {
    server.url(path).to_string()
}

/// Configuration pointing the render endpoint at the mock server.
#[allow(dead_code)] // Used by other test files
pub fn config_for(server: &Server) -> Config {
    Config {
        render_endpoint: url(server, "/render"),
        search_url_template: "https://search.test/s?wd={query}".to_string(),
        timeout_seconds: 5,
        render_timeout_seconds: 5,
        ..Default::default()
    }
}
