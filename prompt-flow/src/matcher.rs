//! Resolves parsed tokens against the tag library.

use crate::types::Tag;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchRule {
    /// Case-insensitive equality with the English name.
    ExactEnglish,
    /// Equality with the Chinese name.
    ExactChinese,
    /// The library name contains the token.
    LibraryContainsToken,
    /// The token contains the library name.
    TokenContainsLibrary,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TagMatch<'a> {
    pub tag: &'a Tag,
    pub rule: MatchRule,
}

fn first_hit<'a>(
    library: &'a [Tag],
    lowered: &[String],
    rule: MatchRule,
    hit: impl Fn(&Tag, &str) -> bool,
) -> Option<TagMatch<'a>> {
    library
        .iter()
        .zip(lowered)
        .find(|(tag, name)| hit(tag, name.as_str()))
        .map(|(tag, _)| TagMatch { tag, rule })
}

/// First rule that fires wins; within a rule the first tag in library order
/// wins. Tags with an empty English name never take part in the substring
/// rules since every token would contain them.
pub fn match_token<'a>(token: &str, library: &'a [Tag]) -> Option<TagMatch<'a>> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }
    let needle = token.to_lowercase();
    let lowered: Vec<String> = library.iter().map(|t| t.name_en.to_lowercase()).collect();

    first_hit(library, &lowered, MatchRule::ExactEnglish, |_, name| name == needle)
        .or_else(|| first_hit(library, &lowered, MatchRule::ExactChinese, |tag, _| tag.name_zh == token))
        .or_else(|| {
            first_hit(library, &lowered, MatchRule::LibraryContainsToken, |_, name| {
                !name.is_empty() && name.contains(needle.as_str())
            })
        })
        .or_else(|| {
            first_hit(library, &lowered, MatchRule::TokenContainsLibrary, |_, name| {
                !name.is_empty() && needle.contains(name)
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(id: &str, en: &str, zh: &str) -> Tag {
        Tag {
            id: id.to_string(),
            name_en: en.to_string(),
            name_zh: zh.to_string(),
            category_id: None,
            weight: 1.0,
        }
    }

    fn matched(token: &str, library: &[Tag]) -> Option<(String, MatchRule)> {
        match_token(token, library).map(|m| (m.tag.id.clone(), m.rule))
    }

    #[test]
    fn exact_english_ignores_case() {
        let library = [tag("1", "Long Hair", "长发")];
        assert_eq!(matched("long hair", &library), Some(("1".into(), MatchRule::ExactEnglish)));
    }

    #[test]
    fn exact_chinese_is_checked_second() {
        let library = [tag("1", "cat", "猫"), tag("2", "猫猫", "")];
        assert_eq!(matched("猫", &library), Some(("1".into(), MatchRule::ExactChinese)));
    }

    #[test]
    fn plural_token_resolves_by_substring() {
        let library = [tag("1", "cat", "猫")];
        assert_eq!(matched("cats", &library), Some(("1".into(), MatchRule::TokenContainsLibrary)));
    }

    #[test]
    fn library_name_containing_token_beats_reverse_containment() {
        let library = [tag("1", "hair", ""), tag("2", "long hair", "")];
        assert_eq!(matched("long", &library), Some(("2".into(), MatchRule::LibraryContainsToken)));
    }

    #[test]
    fn exact_rule_beats_earlier_substring_hit() {
        let library = [tag("1", "blue eyes", ""), tag("2", "blue", "")];
        assert_eq!(matched("Blue", &library), Some(("2".into(), MatchRule::ExactEnglish)));
    }

    #[test]
    fn first_in_library_order_wins_within_a_rule() {
        let library = [tag("1", "red eyes", ""), tag("2", "blue eyes", "")];
        assert_eq!(matched("eyes", &library), Some(("1".into(), MatchRule::LibraryContainsToken)));
    }

    #[test]
    fn unmatched_token_yields_none() {
        let library = [tag("1", "cat", "猫")];
        assert_eq!(matched("dog", &library), None);
        assert_eq!(matched("   ", &library), None);
    }

    #[test]
    fn empty_library_names_are_ignored() {
        let library = [tag("1", "", "")];
        assert_eq!(matched("anything", &library), None);
    }
}
