//! Lenient cell coercion. Nothing here fails: unparseable input becomes `None`.

/// Strip thousands separators and surrounding whitespace
fn clean_numeric(raw: &str) -> String {
    raw.replace(',', "").trim().to_string()
}

/// Parse a float, yielding `None` for anything malformed or non-finite
pub fn to_float(raw: Option<&str>) -> Option<f64> {
    let s = clean_numeric(raw?);
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse via float first so "50.0" is accepted, then truncate
pub fn to_int(raw: Option<&str>) -> Option<i64> {
    let v = to_float(raw)?.trunc();
    if v < i64::MIN as f64 || v > i64::MAX as f64 {
        return None;
    }
    Some(v as i64)
}

/// NPS with the trailing inch mark removed. Fractional sizes such as `1/8`
/// do not parse and stay `None`.
pub fn to_nps(raw: &str) -> Option<f64> {
    let stripped = raw.trim().trim_end_matches(['"', '\u{2033}']);
    to_float(Some(stripped))
}

/// Trimmed, non-empty text
pub fn to_text(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
