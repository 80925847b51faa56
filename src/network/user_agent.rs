//! Browser-like request headers

use rand::seq::SliceRandom;

const PLATFORMS: &[&str] = &[
    "Windows NT 10.0; Win64; x64",
    "Macintosh; Intel Mac OS X 14_2_1",
    "X11; Linux x86_64",
];

const CHROME_VERSIONS: &[&str] = &["122.0.0.0", "123.0.0.0", "124.0.0.0", "125.0.0.0"];

/// Pick a desktop Chrome user agent. Storefronts tend to serve stripped
/// pages or captchas to obvious bots.
pub fn browser_user_agent() -> String {
    let mut rng = rand::thread_rng();
    let platform = PLATFORMS.choose(&mut rng).copied().unwrap_or(PLATFORMS[0]);
    let version = CHROME_VERSIONS
        .choose(&mut rng)
        .copied()
        .unwrap_or(CHROME_VERSIONS[0]);

    format!(
        "Mozilla/5.0 ({platform}) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/{version} Safari/537.36"
    )
}

pub(crate) fn accept_header() -> &'static str {
    "text/html,application/xhtml+xml,application/json;q=0.9,*/*;q=0.8"
}

pub(crate) fn accept_language() -> &'static str {
    "ru-RU,ru;q=0.9,en-US;q=0.8,en;q=0.7"
}
