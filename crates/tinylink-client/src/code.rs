use reqwest::Url;
use tinylink_core::ShortCode;

const FULL_URL_PREFIX: &str = "getFullURL/";

/// Reduces user input to a short code.
///
/// Accepts a bare code, a redirect link (`<server>/<code>`) or a lookup link
/// (`<server>/getFullURL/<code>`). Links pointing at another server are
/// passed through unchanged, so the gateway decides whether they exist.
pub fn short_code_from(input: &str, server: &Url) -> ShortCode {
    let input = input.trim();
    let base = server.as_str();
    let base = base.strip_suffix('/').unwrap_or(base);

    let Some(rest) = input.strip_prefix(base) else {
        return ShortCode::new(input);
    };

    let Some(rest) = rest.strip_prefix('/') else {
        // `http://host:80801` shares a prefix with `http://host:8080`
        return ShortCode::new(input);
    };

    let rest = rest.strip_prefix(FULL_URL_PREFIX).unwrap_or(rest);
    ShortCode::new(rest.trim_end_matches('/'))
}
