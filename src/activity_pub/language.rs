use std::collections::BTreeMap;

/// Pick the language of a post from its language map.
///
/// With several candidates the configured default language wins, then the
/// lexicographically first tag. Content is never guessed from.
pub(crate) fn select_language(
    content_by_language: &BTreeMap<String, String>,
    default_language: Option<&str>,
) -> Option<String> {
    if content_by_language.len() > 1 {
        let preferred = default_language
            .map(|lang| lang.trim().to_lowercase())
            .filter(|lang| content_by_language.contains_key(lang));
        if preferred.is_some() {
            return preferred;
        }
    }
    // BTreeMap keys are sorted
    content_by_language.keys().next().cloned()
}
