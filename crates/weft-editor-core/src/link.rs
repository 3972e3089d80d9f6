//! Link prompt handling: turning free-form input into a link target.

use std::sync::LazyLock;

use regex_lite::Regex;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))$"#,
    )
    .unwrap()
});

static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+?(\d{1,3}[-\s.]?)?\(?\d{3}\)?[-\s.]?\d{3}[-\s.]?\d{4,6}$").unwrap()
});

/// Schemes that are taken as-is.
const EXPLICIT_PREFIXES: [&str; 3] = ["http", "tel:", "mailto:"];

/// What to do with the text entered in the link prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkIntent {
    /// Wrap the selection in a link to this URL.
    Create(String),
    /// Empty input: remove any link from the selection.
    Remove,
}

pub fn is_email(input: &str) -> bool {
    EMAIL_RE.is_match(&input.to_lowercase())
}

pub fn is_phone_number(input: &str) -> bool {
    PHONE_RE.is_match(input)
}

/// Classify prompt input. A cancelled prompt never reaches this.
///
/// Input already carrying a scheme is used verbatim. Otherwise email
/// addresses become `mailto:`, phone numbers become `tel:`, and anything
/// else is treated as a host and given `https://`.
pub fn classify_link_input(input: &str) -> LinkIntent {
    let input = input.trim();
    if input.is_empty() {
        return LinkIntent::Remove;
    }
    if EXPLICIT_PREFIXES.iter().any(|p| input.starts_with(p)) {
        return LinkIntent::Create(input.to_string());
    }
    let url = if is_email(input) {
        format!("mailto:{input}")
    } else if is_phone_number(input) {
        format!("tel:{input}")
    } else {
        format!("https://{input}")
    };
    LinkIntent::Create(url)
}
