//! Identifier conversion rules.

/// Derives a structure entity name from a parameter's local name.
///
/// Leading characters that are not alphanumeric are stripped and the first
/// remaining character is upper-cased; the rest is kept as is.
/// Returns `None` if nothing is left.
///
/// ```rust
/// assert_eq!(bapigen::naming::entity_name("_priceInfo").as_deref(), Some("PriceInfo"));
/// assert_eq!(bapigen::naming::entity_name("__"), None);
/// ```
pub fn entity_name(local_name: &str) -> Option<String> {
    let trimmed = local_name.trim_start_matches(|c: char| !c.is_alphanumeric());
    let mut chars = trimmed.chars();
    let first = chars.next()?;

    let mut name: String = first.to_uppercase().collect();
    name.push_str(chars.as_str());
    Some(name)
}

/// Converts `spacer` separated words to upper camel case.
///
/// Every word is capitalized and the remainder lower-cased, so
/// `BAPI_FLCONN_GETDETAIL` becomes `BapiFlconnGetdetail`. Empty words
/// produced by repeated spacers are skipped.
pub fn to_camel_case(input: &str, spacer: char) -> String {
    input
        .split(spacer)
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    let mut out: String = first.to_uppercase().collect();
                    out.push_str(&chars.as_str().to_lowercase());
                    out
                }
                None => String::new(),
            }
        })
        .collect()
}
