use serde::{Deserialize, Serialize};

const WORD_SEP: char = ':';
const GROUP_SEP: char = '|';
const NOT: &str = "not";

/// The words of a said verb, split into the part that goes before the
/// subject and the part that goes after it.
///
/// "*did* you *walk*" has `pre_words == ["did"]` and `main_words == ["walk"]`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VerbSayResult {
    pub pre_words: Vec<String>,
    pub main_words: Vec<String>,
}

impl VerbSayResult {
    pub fn new(pre_words: Vec<String>, main_words: Vec<String>) -> Self {
        Self {
            pre_words,
            main_words,
        }
    }

    /// `pre0:pre1|main0:main1`
    pub fn to_key(&self) -> String {
        let mut key = self.pre_words.join(":");
        key.push(GROUP_SEP);
        key.push_str(&self.main_words.join(":"));
        key
    }

    pub fn from_key(key: &str) -> Option<Self> {
        let (pre, main) = key.split_once(GROUP_SEP)?;
        if main.contains(GROUP_SEP) {
            return None;
        }
        let split = |group: &str| -> Vec<String> {
            if group.is_empty() {
                Vec::new()
            } else {
                group.split(WORD_SEP).map(str::to_string).collect()
            }
        };
        Some(Self::new(split(pre), split(main)))
    }

    pub fn is_empty(&self) -> bool {
        self.pre_words.is_empty() && self.main_words.is_empty()
    }

    /// All words in speaking order, ignoring where the subject goes.
    pub fn words(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.pre_words
            .iter()
            .chain(self.main_words.iter())
            .map(String::as_str)
    }

    /// The word carrying the verb's own conjugation: the last one that isn't
    /// "not", since counterfactuals negate after it ("if she *walked not*").
    pub fn verb_word(&self) -> Option<&str> {
        self.words().rev().find(|&w| w != NOT)
    }

    pub(crate) fn verb_word_mut(&mut self) -> Option<&mut String> {
        self.pre_words
            .iter_mut()
            .chain(self.main_words.iter_mut())
            .rev()
            .find(|w| w.as_str() != NOT)
    }
}

#[cfg(test)]
mod say_result_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn vsr(pre: &[&str], main: &[&str]) -> VerbSayResult {
        VerbSayResult::new(
            pre.iter().map(|s| s.to_string()).collect(),
            main.iter().map(|s| s.to_string()).collect(),
        )
    }

    #[test]
    fn keys() {
        let r = vsr(&["does", "not"], &["walk"]);
        assert_eq!(r.to_key(), "does:not|walk");
        assert_eq!(VerbSayResult::from_key("does:not|walk"), Some(r));

        let r = vsr(&[], &["will", "have", "walked"]);
        assert_eq!(r.to_key(), "|will:have:walked");
        assert_eq!(VerbSayResult::from_key(&r.to_key()), Some(r));

        assert_eq!(VerbSayResult::from_key("walk"), None);
        assert_eq!(VerbSayResult::from_key("a|b|c"), None);
    }

    #[test]
    fn verb_word() {
        assert_eq!(vsr(&["did"], &["walk"]).verb_word(), Some("walk"));
        assert_eq!(vsr(&["walk"], &[]).verb_word(), Some("walk"));
        assert_eq!(vsr(&[], &["walked", "not"]).verb_word(), Some("walked"));
        assert_eq!(vsr(&["walked"], &["not"]).verb_word(), Some("walked"));
        assert_eq!(vsr(&[], &["not"]).verb_word(), None);
        assert_eq!(vsr(&[], &[]).verb_word(), None);

        let mut r = vsr(&["walked"], &["not"]);
        r.verb_word_mut().unwrap().clear();
        assert_eq!(r.to_key(), "|not");
        assert_eq!(
            vsr(&["is"], &["not", "walking"]).words().collect::<Vec<_>>(),
            vec!["is", "not", "walking"]
        );
    }
}
