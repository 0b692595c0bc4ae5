//! Naming conventions shared by every target: plural collection names and title-cased type names.

/// Plural form used in URL paths and collection identifiers.
/// e.g. "book" -> "books", "person" -> "persons" (no irregular forms)
pub fn plural(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 1);
    out.push_str(name);
    out.push('s');
    out
}

/// Title form used for type and component names in generated code.
/// Upper-cases every letter that starts a word (first char, or after a non-letter), lower-cases the rest.
/// e.g. "book" -> "Book", "line_item" -> "Line_Item"
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}
