use std::sync::LazyLock;
use regex::{Captures, Regex};

static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\p{Alphabetic}+").unwrap());

fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

// "  eARTH " -> "Earth"
pub(crate) fn normalize_name(name: &str) -> String {
    WORD.replace_all(name.trim(), |captures: &Captures| title_case_word(&captures[0]))
        .into_owned()
}
