//! Identifier and display-name helpers.

/// Turn a free-text phrase into a `snake_case` identifier.
///
/// Runs of non-alphanumeric characters collapse into a single underscore;
/// leading and trailing underscores are dropped.
pub fn slugify(phrase: &str) -> String {
    let mut slug = String::with_capacity(phrase.len());
    let mut pending_sep = false;
    for c in phrase.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_sep && !slug.is_empty() {
                slug.push('_');
            }
            slug.push(c.to_ascii_lowercase());
            pending_sep = false;
        } else {
            pending_sep = true;
        }
    }
    slug
}

/// Capitalise the first letter of every whitespace-separated word.
pub fn title_case(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_phrases() {
        assert_eq!(slugify("Valuable Data Shard"), "valuable_data_shard");
        assert_eq!(slugify("  Mr. Blue-Eyes' deck "), "mr_blue_eyes_deck");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn title_case_words() {
        assert_eq!(title_case("valuable data shard"), "Valuable Data Shard");
        assert_eq!(title_case(""), "");
    }
}
