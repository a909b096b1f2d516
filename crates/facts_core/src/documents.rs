/// Splits the raw documents field on `,`, trimming each entry and dropping
/// empty ones. Order and duplicates are preserved.
pub fn parse_documents(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}
