/// Configuration for creating the document WebView.
#[derive(Debug, Clone)]
pub struct WebViewConfig {
    /// Initial URL to load; an empty page when `None`.
    pub url: Option<String>,
    pub transparent: bool,
    /// Always on in debug builds.
    pub devtools: bool,
    pub user_agent: Option<String>,
    pub clipboard: bool,
}

impl Default for WebViewConfig {
    fn default() -> Self {
        Self {
            url: None,
            transparent: false,
            devtools: cfg!(debug_assertions),
            user_agent: Some(concat!("docview/", env!("CARGO_PKG_VERSION")).to_string()),
            clipboard: true,
        }
    }
}

impl WebViewConfig {
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Default::default()
        }
    }
}
