/// Canonicalizes a raw skill string into its comparison key: lower-cased,
/// trimmed, every whitespace run collapsed to a single space.
pub fn normalize_skill(raw: &str) -> String {
    raw.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}
