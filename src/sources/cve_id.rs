use regex::Regex;

/// Lexical pattern for CVE identifiers embedded in ids or file names.
const CVE_PATTERN: &str = r"CVE-(\d{4})-(\d{4,7})";

/// Extract `(year, number)` from the first `CVE-YYYY-NNNN+` occurrence.
///
/// Absence of a match yields `None`; callers map that to empty strings.
#[must_use]
pub fn parse_cve_id(text: &str) -> Option<(String, String)> {
    let re = Regex::new(CVE_PATTERN).ok()?;
    let caps = re.captures(text)?;
    Some((caps[1].to_string(), caps[2].to_string()))
}

/// Like [`parse_cve_id`] but yielding empty strings on a miss, matching the
/// canonical record fields directly.
#[must_use]
pub fn parse_cve_id_or_empty(text: &str) -> (String, String) {
    parse_cve_id(text).unwrap_or_default()
}
