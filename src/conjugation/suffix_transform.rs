use std::fmt;

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

pub(crate) fn collect_graphemes(text: &str) -> Vec<&str> {
    text.graphemes(true).collect()
}

/// The edit turning a lemma into one of its inflected forms.
///
/// Applying it drops `truncate.len()` graphemes, re-doubles the new last
/// grapheme `repeat` times, then appends `append`.
///
/// | lemma  | form      | truncate | repeat | append |
/// |--------|-----------|----------|--------|--------|
/// | `walk` | `walked`  | `""`     | 0      | `ed`   |
/// | `bake` | `baking`  | `e`      | 0      | `ing`  |
/// | `stop` | `stopped` | `""`     | 1      | `ed`   |
/// | `be`   | `is`      | `be`     | 0      | `is`   |
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SuffixTransform {
    pub truncate: String,
    pub repeat: usize,
    pub append: String,
}

impl SuffixTransform {
    /// Finds the edit keeping as much of `from` as possible, and within that
    /// the longest run of re-doubled last grapheme.
    pub fn derive(from: &str, to: &str) -> Self {
        let fg = collect_graphemes(from);
        let tg = collect_graphemes(to);

        for k in (1..=fg.len()).rev() {
            if tg.len() < k || fg[..k] != tg[..k] {
                continue;
            }
            let last = fg[k - 1];
            let repeat = tg[k..].iter().take_while(|&&g| g == last).count();
            return Self {
                truncate: fg[k..].concat(),
                repeat,
                append: tg[k + repeat..].concat(),
            };
        }

        // nothing in common, replace the whole word
        Self {
            truncate: from.to_string(),
            repeat: 0,
            append: to.to_string(),
        }
    }

    pub fn transform(&self, from: &str) -> Option<String> {
        let fg = collect_graphemes(from);
        let cut = self.truncate.graphemes(true).count();
        if fg.len() < cut {
            return None;
        }
        let base = &fg[..fg.len() - cut];

        let mut out = base.concat();
        if self.repeat > 0 {
            let last = base.last()?;
            for _ in 0..self.repeat {
                out.push_str(last);
            }
        }
        out.push_str(&self.append);
        Some(out)
    }

    /// Inverse of [`Self::transform`]: recovers the lemma from an inflected
    /// form, or `None` if `to` could not have come from this edit.
    pub fn reverse(&self, to: &str) -> Option<String> {
        let rest = to.strip_suffix(self.append.as_str())?;
        let mut rg = collect_graphemes(rest);

        if self.repeat > 0 {
            // the re-doubled grapheme plus the original it copied
            let run = self.repeat + 1;
            if rg.len() < run {
                return None;
            }
            let last = rg[rg.len() - 1];
            if rg[rg.len() - run..].iter().any(|&g| g != last) {
                return None;
            }
            rg.truncate(rg.len() - self.repeat);
        }

        let mut lemma = rg.concat();
        lemma.push_str(&self.truncate);
        Some(lemma)
    }
}

impl fmt::Display for SuffixTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "-{}+{}+{}", self.truncate, self.repeat, self.append)
    }
}

#[cfg(test)]
mod suffix_transform_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn st(truncate: &str, repeat: usize, append: &str) -> SuffixTransform {
        SuffixTransform {
            truncate: truncate.into(),
            repeat,
            append: append.into(),
        }
    }

    #[test]
    fn derive() {
        assert_eq!(SuffixTransform::derive("walk", "walked"), st("", 0, "ed"));
        assert_eq!(SuffixTransform::derive("walk", "walk"), st("", 0, ""));
        assert_eq!(SuffixTransform::derive("bake", "baking"), st("e", 0, "ing"));
        assert_eq!(SuffixTransform::derive("stop", "stopped"), st("", 1, "ed"));
        assert_eq!(SuffixTransform::derive("see", "seeing"), st("", 0, "ing"));
        assert_eq!(SuffixTransform::derive("go", "went"), st("go", 0, "went"));
        assert_eq!(SuffixTransform::derive("be", "is"), st("be", 0, "is"));
        assert_eq!(SuffixTransform::derive("run", "ran"), st("un", 0, "an"));
        assert_eq!(SuffixTransform::derive("try", "tried"), st("y", 0, "ied"));
    }

    #[test]
    fn transform_generalizes() {
        let doubled = SuffixTransform::derive("stop", "stopped");
        assert_eq!(doubled.transform("grab").as_deref(), Some("grabbed"));
        let e_drop = SuffixTransform::derive("bake", "baking");
        assert_eq!(e_drop.transform("make").as_deref(), Some("making"));
        let y = SuffixTransform::derive("try", "tries");
        assert_eq!(y.transform("cry").as_deref(), Some("cries"));
    }

    #[test]
    fn transform_failures() {
        assert_eq!(st("abc", 0, "").transform("ab"), None);
        // nothing left to double
        assert_eq!(st("ab", 1, "ed").transform("ab"), None);
    }

    #[test]
    fn reverse() {
        let doubled = st("", 1, "ed");
        assert_eq!(doubled.reverse("stopped").as_deref(), Some("stop"));
        assert_eq!(doubled.reverse("walked"), None);
        assert_eq!(doubled.reverse("stops"), None);
        assert_eq!(st("e", 0, "ing").reverse("baking").as_deref(), Some("bake"));
        assert_eq!(st("be", 0, "is").reverse("is").as_deref(), Some("be"));
        assert_eq!(st("be", 0, "is").reverse("was"), None);
    }

    #[test]
    fn derive_then_reverse() {
        let pairs = [
            ("walk", "walked"),
            ("stop", "stopped"),
            ("bake", "baking"),
            ("see", "seen"),
            ("be", "been"),
            ("go", "went"),
            ("have", "has"),
            ("lie", "lying"),
            ("panic", "panicked"),
            ("fuß", "füße"),
            ("a", "aaa"),
            ("x", ""),
        ];
        for (lemma, form) in pairs {
            let t = SuffixTransform::derive(lemma, form);
            assert_eq!(t.transform(lemma).as_deref(), Some(form), "{t}");
            assert_eq!(t.reverse(form).as_deref(), Some(lemma), "{t}");
        }
    }
}
