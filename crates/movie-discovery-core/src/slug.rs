/// URL slug of a title as used by the platforms' title pages.
///
/// Lower-cases the title, drops everything except ASCII letters, digits,
/// whitespace, `_` and `-`, then joins the remaining words with single
/// hyphens. Separators at either end disappear.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut pending_separator = false;

    for c in lowered.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c);
        } else if c.is_whitespace() || c == '_' || c == '-' {
            pending_separator = true;
        }
    }

    slug
}
