//! Parsing pasted name lists.
//!
//! Hosts let operators paste a whole list (one name per line, or separated
//! by commas or semicolons), often copied from a chat with numbering and
//! emoji. Each entry is cleaned down to letters and single spaces.

/// Split and clean a pasted list of names.
///
/// ```
/// use pickup_roster::store::parse_name_list;
///
/// let names = parse_name_list("1. Ana ⚽\n2) Bruno  Lima; carla,,\n  ");
/// assert_eq!(names, vec!["Ana", "Bruno Lima", "carla"]);
/// ```
#[must_use]
pub fn parse_name_list(text: &str) -> Vec<String> {
    text.split(['\n', ',', ';'])
        .map(clean_name)
        .filter(|name| !name.is_empty())
        .collect()
}

/// Keep letters, collapse whitespace runs, trim.
fn clean_name(raw: &str) -> String {
    let letters: String = raw
        .chars()
        .filter(|c| c.is_alphabetic() || c.is_whitespace())
        .collect();
    letters.split_whitespace().collect::<Vec<_>>().join(" ")
}
