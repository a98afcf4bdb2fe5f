//! Browser-mimicking request headers.
//!
//! The upstream planning service is a public website backend; requests that
//! look like a browser's XHR calls are far less likely to be rejected, so
//! every fetch carries a rotating Chrome user agent with consistent
//! client-hint, origin and referer headers.

use rand::seq::SliceRandom;
use reqwest::header::{HeaderMap, HeaderValue};

/// Pool of current Chrome user-agent strings to rotate between requests.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/125.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/125.0.0.0 Safari/537.36",
];

/// Fallback Chrome major version when the user agent cannot be parsed.
const FALLBACK_CHROME_VERSION: &str = "100";

/// Builds headers that mimic a real Chrome browser for a request to `url`.
///
/// Picks a random user agent, derives the matching `Sec-Ch-Ua` major
/// version, and sets `Origin`/`Referer` to the URL's origin.
pub fn browser_headers(url: &str) -> HeaderMap {
    let mut rng = rand::thread_rng();
    let user_agent = USER_AGENTS
        .choose(&mut rng)
        .copied()
        .unwrap_or(USER_AGENTS[0]);

    let chrome_version = chrome_major_version(user_agent);
    let sec_ch_ua = format!(
        "\"Not)A;Brand\";v=\"8\", \"Chromium\";v=\"{chrome_version}\", \"Google Chrome\";v=\"{chrome_version}\""
    );

    let origin = url_origin(url);
    let referer = format!("{origin}/");

    let mut headers = HeaderMap::new();
    insert(&mut headers, "User-Agent", user_agent);
    insert(&mut headers, "Accept", "application/json, text/plain, */*");
    insert(&mut headers, "Accept-Language", "en-US,en;q=0.9,vi;q=0.8");
    insert(&mut headers, "Connection", "keep-alive");
    insert(&mut headers, "Referer", &referer);
    insert(&mut headers, "Origin", &origin);
    insert(&mut headers, "Sec-Ch-Ua", &sec_ch_ua);
    insert(&mut headers, "Sec-Ch-Ua-Mobile", "?0");
    insert(&mut headers, "Sec-Ch-Ua-Platform", "\"Windows\"");
    insert(&mut headers, "Sec-Fetch-Dest", "empty");
    insert(&mut headers, "Sec-Fetch-Mode", "cors");
    insert(&mut headers, "Sec-Fetch-Site", "same-origin");

    headers
}

fn insert(headers: &mut HeaderMap, name: &'static str, value: &str) {
    if let Ok(value) = HeaderValue::from_str(value) {
        headers.insert(name, value);
    }
}

/// Extracts the Chrome major version from a user-agent string.
fn chrome_major_version(user_agent: &str) -> &str {
    user_agent
        .split_once("Chrome/")
        .and_then(|(_, rest)| rest.split('.').next())
        .filter(|major| !major.is_empty())
        .unwrap_or(FALLBACK_CHROME_VERSION)
}

/// Returns the `scheme://host[:port]` origin of a URL.
fn url_origin(url: &str) -> String {
    match url.split_once("://") {
        Some((scheme, rest)) => {
            let host = rest.split('/').next().unwrap_or(rest);
            format!("{scheme}://{host}")
        }
        None => url.to_string(),
    }
}
