use super::*;

use rust_fuzzy_search::fuzzy_compare;

const MAX_QUERY_LEN: usize = 30;
const TOP_RESULTS: usize = 10;
const MIN_SCORE: f32 = 0.4;

/// Fuzzy-matches the query against first name, last name, and the full name,
/// returning the best matches first. The query is trimmed and lowercased;
/// stored values are matched case-insensitively.
pub fn fuzzy_match_names<'a>(
    contacts: &[&'a Contact],
    query: &str,
) -> Result<Vec<&'a Contact>, RegistryError> {
    let query = query.trim().to_ascii_lowercase();

    if query.is_empty() {
        return Err(RegistryError::InvalidArgument(
            "No name provided".to_string(),
        ));
    }
    if query.chars().count() > MAX_QUERY_LEN {
        return Err(RegistryError::InvalidArgument(format!(
            "Search string too long (max {} characters)",
            MAX_QUERY_LEN
        )));
    }

    let mut scored: Vec<(f32, &Contact)> = contacts
        .iter()
        .filter_map(|&contact| {
            let score = name_score(contact, &query);
            (score >= MIN_SCORE).then_some((score, contact))
        })
        .collect();

    scored.sort_by(|a, b| b.0.total_cmp(&a.0));

    Ok(scored
        .into_iter()
        .take(TOP_RESULTS)
        .map(|(_, contact)| contact)
        .collect())
}

fn name_score(contact: &Contact, query: &str) -> f32 {
    let first = contact.first_name().to_ascii_lowercase();
    let last = contact.last_name().to_ascii_lowercase();
    let full = format!("{} {}", first, last);

    fuzzy_compare(&first, query)
        .max(fuzzy_compare(&last, query))
        .max(fuzzy_compare(&full, query))
}
