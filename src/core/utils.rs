use std::sync::OnceLock;

use regex::Regex;

/// Case-insensitive substring match. An empty query matches everything.
pub fn text_matches_search(text: &str, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    text.to_lowercase().contains(&query.to_lowercase())
}

fn fold_turkish(c: char) -> char {
    match c {
        'ç' | 'Ç' => 'c',
        'ğ' | 'Ğ' => 'g',
        'ı' | 'İ' => 'i',
        'ö' | 'Ö' => 'o',
        'ş' | 'Ş' => 's',
        'ü' | 'Ü' => 'u',
        other => other,
    }
}

// Kyrenia Villa / İskele Şehir -> kyrenia-villa / iskele-sehir
pub fn normalize_slug(input: &str) -> String {
    static NON_SLUG: OnceLock<Regex> = OnceLock::new();
    let re = NON_SLUG.get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("valid slug pattern"));

    let folded: String = input.chars().map(fold_turkish).collect::<String>().to_lowercase();
    re.replace_all(&folded, "-").trim_matches('-').to_string()
}

/// Gives bare hosts an `https://` scheme, leaves absolute and site-relative links alone.
pub fn normalize_url(input: &str) -> String {
    static SCHEME: OnceLock<Regex> = OnceLock::new();
    let re = SCHEME.get_or_init(|| {
        Regex::new(r"^(?i)([a-z][a-z0-9+.\-]*://|mailto:|tel:)").expect("valid scheme pattern")
    });

    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return trimmed.to_string();
    }
    if let Some(rest) = trimmed.strip_prefix("//") {
        return format!("https://{}", rest);
    }
    if trimmed.starts_with('/') || re.is_match(trimmed) {
        return trimmed.to_string();
    }
    format!("https://{}", trimmed)
}
