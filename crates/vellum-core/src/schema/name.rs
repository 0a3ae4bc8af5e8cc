/// Default physical table name for a model in plural mode.
pub(crate) fn plural(name: &str) -> String {
    pluralizer::pluralize(name, 2, false)
}

/// Singular forms to try for a plural name, most likely first.
pub(crate) fn singular_candidates(name: &str) -> Vec<String> {
    let mut candidates = vec![pluralizer::pluralize(name, 1, false)];

    if let Some(stripped) = name.strip_suffix('s') {
        if candidates[0] != stripped {
            candidates.push(stripped.to_string());
        }
    }

    candidates
}
