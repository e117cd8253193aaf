//! Page navigation.

/// Where the page is and how it leaves.
pub trait Navigator {
    /// Full URL of the current page.
    fn href(&self) -> String;

    /// Navigate to `url` (`location.href = url`).
    fn assign(&mut self, url: &str);
}

/// In-memory navigator that records every navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    current: String,
    visits: Vec<String>,
}

impl History {
    /// Start at `href`.
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            current: href.into(),
            visits: Vec::new(),
        }
    }

    /// URLs navigated to, oldest first.
    pub fn visits(&self) -> &[String] {
        &self.visits
    }

    /// Most recent navigation.
    pub fn last_visit(&self) -> Option<&str> {
        self.visits.last().map(String::as_str)
    }
}

impl Navigator for History {
    fn href(&self) -> String {
        self.current.clone()
    }

    fn assign(&mut self, url: &str) {
        self.visits.push(url.to_string());
        self.current = url.to_string();
    }
}

/// The browser's `window.location`.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct BrowserNavigator;

#[cfg(target_arch = "wasm32")]
impl Navigator for BrowserNavigator {
    fn href(&self) -> String {
        web_sys::window()
            .and_then(|w| w.location().href().ok())
            .unwrap_or_default()
    }

    fn assign(&mut self, url: &str) {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().set_href(url) {
                tracing::warn!(url, error = ?e, "navigation failed");
            }
        }
    }
}

/// Login URL that returns to `current_href` afterwards.
pub fn login_redirect_url(login_path: &str, current_href: &str) -> String {
    format!(
        "{}?redirect={}",
        login_path,
        urlencoding::encode(current_href)
    )
}

/// Detail page URL for a product.
pub fn product_url(product_prefix: &str, product_id: &str) -> String {
    format!("{}{}", product_prefix, product_id)
}
