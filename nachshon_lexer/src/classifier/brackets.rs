//! Bracket matching over a classified token sequence

use crate::tokens::{ClassifiedToken, TokenKind};

fn closer_for(open: &str) -> Option<&'static str> {
    match open {
        "(" => Some(")"),
        "[" => Some("]"),
        "{" => Some("}"),
        _ => None,
    }
}

fn is_closer(text: &str) -> bool {
    matches!(text, ")" | "]" | "}")
}

/// Pairs of (open index, close index) sorted by the open index.
///
/// A closer that does not match the innermost open bracket is left unpaired and
/// the open bracket stays pending.
pub fn bracket_pairs(tokens: &[ClassifiedToken]) -> Vec<(usize, usize)> {
    let mut stack: Vec<(usize, &'static str)> = Vec::new();
    let mut pairs = Vec::new();

    for (index, classified) in tokens.iter().enumerate() {
        if classified.token.kind != TokenKind::Punctuation {
            continue;
        }
        let text = classified.token.text.as_str();

        if let Some(closer) = closer_for(text) {
            stack.push((index, closer));
        } else if is_closer(text) {
            if let Some(&(open, expected)) = stack.last() {
                if expected == text {
                    stack.pop();
                    pairs.push((open, index));
                }
            }
        }
    }

    pairs.sort_unstable();
    pairs
}

pub fn matching_bracket(tokens: &[ClassifiedToken], index: usize) -> Option<usize> {
    bracket_pairs(tokens).into_iter().find_map(|(open, close)| {
        if open == index {
            Some(close)
        } else if close == index {
            Some(open)
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::tokenize_with_preferences;
    use crate::config::LexicalPreferences;

    fn texts_of_pairs(source: &str) -> Vec<(String, String)> {
        let stream = tokenize_with_preferences(source, &LexicalPreferences::with_tab_width(4));
        bracket_pairs(stream.tokens())
            .into_iter()
            .map(|(o, c)| {
                (
                    stream.tokens()[o].token.text.clone(),
                    stream.tokens()[c].token.text.clone(),
                )
            })
            .collect()
    }

    #[test]
    fn test_nested_pairs() {
        let pairs = texts_of_pairs("הדפס([1, {2: 3}])");
        assert_eq!(
            pairs,
            vec![
                ("(".to_string(), ")".to_string()),
                ("[".to_string(), "]".to_string()),
                ("{".to_string(), "}".to_string()),
            ]
        );
    }

    #[test]
    fn test_unmatched_brackets_stay_unpaired() {
        assert!(texts_of_pairs("((((").is_empty());
        assert!(texts_of_pairs(")]}").is_empty());
        assert_eq!(texts_of_pairs("(]").len(), 0);
        assert_eq!(texts_of_pairs("(])").len(), 1);
    }

    #[test]
    fn test_matching_bracket_both_directions() {
        let stream = tokenize_with_preferences("א(ב)", &LexicalPreferences::with_tab_width(4));
        let tokens = stream.tokens();
        assert_eq!(matching_bracket(tokens, 1), Some(3));
        assert_eq!(matching_bracket(tokens, 3), Some(1));
        assert_eq!(matching_bracket(tokens, 0), None);
    }
}
