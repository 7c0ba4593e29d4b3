//! Guessing an `api:` label from free-text issue titles.
//!
//! An issue titled `spanner/transactions: TestSample failed` is labeled
//! `api: spanner`; one titled `fix(kms): rotate keys` is labeled `api: kms`
//! or `api: cloudkms`, whichever the known API list contains.

use crate::settings::DriftApi;
use regex::Regex;
use std::sync::LazyLock;

// Scope of a Conventional Commit style title, e.g. `feat(scope): ...`.
static CONVENTIONAL_SCOPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^(]+\(([^)]+)\):").unwrap());

const TRIM_PREFIXES: [&str; 3] = ["com.example.", "com.google.", "snippets."];

const DELIMITERS: [char; 4] = [':', '/', '.', '_'];

const CONVERSIONS: [(&str, &str); 1] = [("video", "videointelligence")];

pub fn auto_detect_label(apis: Option<&[DriftApi]>, title: &str) -> Option<String> {
    let apis = apis.filter(|a| !a.is_empty())?;
    if title.is_empty() {
        return None;
    }

    let base = label_base(title);
    let candidates = [format!("api: {base}"), format!("api: cloud{base}")];

    apis.iter()
        .find(|api| candidates.contains(&api.github_label))
        .map(|api| api.github_label.clone())
}

/// Reduces a title to the bare product name the label is built from.
fn label_base(title: &str) -> String {
    let mut part = CONVENTIONAL_SCOPE
        .captures(title)
        .and_then(|c| c.get(1))
        .map_or(title, |m| m.as_str());

    if let Some(prefix) = TRIM_PREFIXES.iter().find(|p| part.starts_with(*p)) {
        part = &part[prefix.len()..];
    }

    part = part.strip_prefix('/').unwrap_or(part);

    for delim in DELIMITERS {
        part = part.split(delim).next().unwrap_or(part);
    }

    let mut base = part.to_lowercase();
    // Only the first whitespace character goes.
    if let Some((idx, ch)) = base.char_indices().find(|(_, c)| is_title_whitespace(*c)) {
        base.replace_range(idx..idx + ch.len_utf8(), "");
    }

    match CONVERSIONS.iter().find(|(from, _)| *from == base) {
        Some((_, to)) => to.to_string(),
        None => base,
    }
}

/// Unicode `White_Space` without NEL (U+0085), plus the byte order mark.
/// Titles pasted from editors sometimes carry a leading U+FEFF.
fn is_title_whitespace(c: char) -> bool {
    match c {
        '\u{85}' => false,
        '\u{feff}' => true,
        c => c.is_whitespace(),
    }
}
