use regex::Regex;
use std::sync::LazyLock;
use url::Url;

static PROFILE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:https?://)?(?:www\.)?linkedin\.com/in/[^/?#]+").unwrap()
});

static SLUG_ID_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-[a-z0-9]{5,}$").unwrap());

static TRAILING_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)/?$").unwrap());

static DETAIL_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/candidates/(\d+)/?$").unwrap());

/// Canonical form of a profile URL for equality comparison: lowercase,
/// `https` scheme, no `www.` host prefix, no trailing slash. Idempotent, so
/// already-normalized URLs pass through unchanged.
pub fn normalize_profile_url(raw: &str) -> String {
    let mut url = raw.trim().to_lowercase();
    if let Some(rest) = url.strip_prefix("http://") {
        url = format!("https://{rest}");
    } else if !url.starts_with("https://") {
        url = format!("https://{url}");
    }
    if let Some(rest) = url.strip_prefix("https://www.") {
        url = format!("https://{rest}");
    }
    while url.ends_with('/') {
        url.pop();
    }
    url
}

/// Whether an href points at a profile page (as opposed to company pages,
/// internal CRM links, or anything else a row may carry).
pub fn is_profile_url(href: &str) -> bool {
    PROFILE_URL.is_match(href.trim())
}

/// The final path segment of a profile URL, which the network uses to
/// identify the profile.
pub fn profile_slug(url: &str) -> Option<String> {
    let parsed = Url::parse(&normalize_profile_url(url)).ok()?;
    parsed
        .path_segments()?
        .filter(|segment| !segment.is_empty())
        .last()
        .map(str::to_string)
}

/// Splits a profile slug into searchable name tokens.
///
/// A trailing run of 5+ alphanumerics after a hyphen is treated as the
/// network's appended identifier and stripped before splitting; one-character
/// tokens are noise and dropped. A slug without hyphens is itself the single
/// token. The suffix rule is a heuristic: a long vanity word in final
/// position gets stripped too, which the explicit name-hint search exists to
/// compensate for.
pub fn tokens_from_slug(slug: &str) -> Vec<String> {
    let slug = slug.trim().to_lowercase();
    let base = SLUG_ID_SUFFIX.replace(&slug, "");
    base.split('-')
        .filter(|token| token.len() > 1)
        .map(str::to_string)
        .collect()
}

/// The numeric record id from a URL's trailing path suffix.
pub fn candidate_id_from_url(url: &str) -> Option<u64> {
    TRAILING_ID
        .captures(url)
        .and_then(|caps| caps[1].parse().ok())
}

/// The record id when `url` is exactly a candidate detail page. This is the
/// structural success signal for existence checks and creation posts: the
/// CRM redirects onto the detail page when it accepts, and re-renders the
/// form when it does not.
pub fn detail_page_id(url: &str) -> Option<u64> {
    let parsed = Url::parse(url).ok()?;
    DETAIL_PATH
        .captures(parsed.path())
        .and_then(|caps| caps[1].parse().ok())
}

/// Whether a resolved URL landed on the CRM's sign-in page.
pub fn is_login_url(url: &str) -> bool {
    Url::parse(url)
        .map(|u| u.path().starts_with("/users/sign_in"))
        .unwrap_or(false)
}
