pub(crate) fn normalize_optional_string(raw: Option<&str>, max_len: usize) -> Option<String> {
    raw.map(str::trim)
        .filter(|v| !v.is_empty())
        .filter(|v| v.len() <= max_len)
        .map(ToOwned::to_owned)
}
