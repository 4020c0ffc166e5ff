use log::LevelFilter;

pub const TOAST_MS: i32 = 3000;

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    /// Absolute origin the API paths are joined onto.
    pub base_url: String,
    pub toast_ms: i32,
    pub log_level: LevelFilter,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            toast_ms: TOAST_MS,
            log_level: LevelFilter::Info,
        }
    }
}

impl AppConfig {
    /// reqwest on wasm wants absolute URLs, so the page origin is the base.
    /// `?debug` in the query string turns on debug logging.
    pub fn from_window() -> Self {
        let mut config = Self::default();
        let Some(location) = web_sys::window().map(|w| w.location()) else {
            return config;
        };
        if let Ok(origin) = location.origin() {
            config.base_url = origin;
        }
        let search = location.search().unwrap_or_default();
        config.log_level = level_from_query(&search);
        config
    }
}

fn level_from_query(search: &str) -> LevelFilter {
    let debug = search
        .trim_start_matches('?')
        .split('&')
        .any(|pair| pair == "debug" || pair.starts_with("debug="));
    if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}
