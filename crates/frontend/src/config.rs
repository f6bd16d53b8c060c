//! Build-time configuration.
//!
//! Values come from environment variables at compile time (`dx build` runs
//! with the shell's environment), falling back to local-development defaults.

use tracing::Level;

const DEFAULT_API_URL: &str = "http://localhost:6969";

/// localStorage key holding the bearer token of the logged-in user.
pub const TOKEN_STORAGE_KEY: &str = "auth_token";
/// localStorage key holding the logged-in user as JSON.
pub const USER_STORAGE_KEY: &str = "user";

pub fn api_base_url() -> &'static str {
    normalize_base_url(option_env!("SMOKES_API_URL").unwrap_or(DEFAULT_API_URL))
}

fn normalize_base_url(raw: &str) -> &str {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_API_URL
    } else {
        trimmed
    }
}

pub fn log_level() -> Level {
    parse_level(option_env!("SMOKES_LOG").unwrap_or("info"))
}

fn parse_level(raw: &str) -> Level {
    match raw.trim().to_ascii_lowercase().as_str() {
        "error" => Level::ERROR,
        "warn" => Level::WARN,
        "debug" => Level::DEBUG,
        "trace" => Level::TRACE,
        _ => Level::INFO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url_strips_trailing_slash() {
        assert_eq!(normalize_base_url("https://api.example.com/"), "https://api.example.com");
        assert_eq!(normalize_base_url("  "), DEFAULT_API_URL);
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("DEBUG"), Level::DEBUG);
        assert_eq!(parse_level("warn"), Level::WARN);
        assert_eq!(parse_level("nonsense"), Level::INFO);
    }
}
