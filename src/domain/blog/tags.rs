/// Turns the comma-separated tag field of the post form into a tag list.
///
/// All whitespace is removed (not only around commas), so `"rust lang"`
/// becomes `"rustlang"`. Empty fragments are dropped and order is kept.
pub fn parse_tags(raw: &str) -> Vec<String> {
    let stripped: String = raw.chars().filter(|c| !c.is_whitespace()).collect();

    stripped
        .split(',')
        .filter(|tag| !tag.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Inverse used to pre-fill the edit form.
pub fn join_tags(tags: &[String]) -> String {
    tags.join(", ")
}
