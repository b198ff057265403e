//! URL slugs for posts and topics

const MAX_SLUG_LEN: usize = 100;

/// Turn a post title into a URL slug.
///
/// Lowercases, maps spaces to `-`, drops anything outside `[a-z0-9-]`,
/// collapses runs of `-` and trims them from both ends. The result is
/// capped at 100 characters and falls back to `post` when nothing is left.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.to_lowercase().chars() {
        let c = if c == ' ' { '-' } else { c };
        let keep = c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-';
        if !keep || (c == '-' && slug.ends_with('-')) {
            continue;
        }
        slug.push(c);
    }

    let mut slug = slug.trim_matches('-').to_string();
    if slug.len() > MAX_SLUG_LEN {
        slug.truncate(MAX_SLUG_LEN);
        slug = slug.trim_end_matches('-').to_string();
    }

    if slug.is_empty() {
        "post".to_string()
    } else {
        slug
    }
}

/// Topic slugs only lowercase the name and map spaces to `-`
pub fn topic_slug(name: &str) -> String {
    name.trim().replace(' ', "-").to_lowercase()
}
