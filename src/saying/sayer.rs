use std::{path::Path, sync::Arc};

use super::converter::VerbConverter;
use crate::{
    conjugation::Conjugator,
    errors::{InitError, VerbSayError},
    surface::{SurfaceVerb, SurfaceVerbSayer, Whether},
    verb::{ModalFlavor, RelativeContainment, SubjunctiveHandling, VerbSayResult, VerbWithContext},
};

const NOT: &str = "not";

fn wrap_pro_verb(word: &str) -> String {
    format!("<{word}-pv>")
}

/// Says [`VerbWithContext`]s.
pub struct VerbSayer {
    conv: VerbConverter,
    surface: SurfaceVerbSayer,
}

impl VerbSayer {
    pub fn new(conv: VerbConverter, surface: SurfaceVerbSayer) -> Self {
        Self { conv, surface }
    }

    pub fn from_files(
        conjugator: Arc<Conjugator>,
        modalities_path: &Path,
        modal_past_tense_path: &Path,
    ) -> Result<Self, InitError> {
        Ok(Self::new(
            VerbConverter::from_file(modalities_path)?,
            SurfaceVerbSayer::from_file(conjugator, modal_past_tense_path)?,
        ))
    }

    pub fn conjugator(&self) -> &Conjugator {
        self.surface.conjugator()
    }

    /// Splits said words into the part before the subject and the part after.
    ///
    /// A split verb leaves its first word (or "do" plus a contracted "not")
    /// in front of the subject. Pro-verbs keep only their auxiliary and "not",
    /// marked as `<word-pv>`.
    pub fn slice_verb_words(
        words: &[String],
        is_split: bool,
        is_pro_verb: bool,
        contract_not: bool,
    ) -> Result<VerbSayResult, VerbSayError> {
        if words.is_empty() {
            return Err(VerbSayError::NoVerbWords);
        }

        let not_at = |i: usize| words.get(i).is_some_and(|w| w == NOT);
        // "she requests you *not come*"
        let not_at_0 = not_at(0);
        // "I *do not like* you"
        let not_at_1 = not_at(1);
        // "if you *were to not go*"
        let not_at_2 = not_at(2);
        if [not_at_0, not_at_1, not_at_2].iter().filter(|&&b| b).count() > 1 {
            return Err(VerbSayError::MultipleNots);
        }

        let split = match (is_split, not_at_1, contract_not) {
            (false, _, _) => 0,
            (true, true, true) => 2,
            (true, _, _) => 1,
        };

        let z = if !is_pro_verb {
            words.len()
        } else if not_at_1 {
            2
        } else if not_at_2 {
            3
        } else {
            1
        };
        let z = z.max(split);

        let (pre, main) = words[..z].split_at(split);
        let mut r = VerbSayResult::new(pre.to_vec(), main.to_vec());
        if is_pro_verb {
            for w in r.pre_words.iter_mut().chain(r.main_words.iter_mut()) {
                *w = wrap_pro_verb(w);
            }
        }
        Ok(r)
    }

    /// Every way to say `vwc`, at most `max_results` of them. Fails as a whole
    /// if any option fails.
    pub fn get_all_say_options(
        &self,
        vwc: &VerbWithContext,
        max_results: usize,
    ) -> Result<Vec<VerbSayResult>, VerbSayError> {
        if vwc.has_unset_fields() {
            return Err(VerbSayError::HasUnsetFields);
        }
        let verb = &vwc.verb;
        if verb.is_pro_verb && vwc.relative_cont == RelativeContainment::Zero {
            return Err(VerbSayError::RelativeProVerbConflict);
        }
        if !verb.verb_form.is_finite() {
            if vwc.is_split {
                return Err(VerbSayError::CanOnlySplitFinite);
            }
            if verb.modality.flavor != ModalFlavor::Indicative || verb.modality.is_cond {
                return Err(VerbSayError::NonFiniteModalityMustBeIndicative);
            }
        }

        let whether = match (verb.polarity.tf, verb.polarity.is_contrary.is_true()) {
            (false, _) => Whether::No,
            // "no, she *does* write"
            (true, true) => Whether::Emph,
            // "*does* she write", "yes, she *does*"
            (true, false) if vwc.is_split || verb.is_pro_verb => Whether::Emph,
            (true, false) => Whether::Yes,
        };

        let voice = VerbConverter::surface_voice(vwc.voice)?;
        let verb_form = VerbConverter::surface_verb_form(verb.verb_form, vwc.relative_cont)?;
        let mmts = self.conv.moods_modals_tenses(&verb.modality, verb.tense)?;

        mmts.into_iter()
            .take(max_results)
            .map(|mmt| {
                let sv = SurfaceVerb {
                    lemma: verb.lemma.clone(),
                    whether,
                    tense: mmt.tense,
                    aspect: verb.aspect.clone(),
                    modal: mmt.modal,
                    mood: mmt.mood,
                    verb_form,
                    voice,
                    conj: vwc.conj,
                    split_inf: vwc.split_inf.is_true(),
                    use_were_sbj: vwc.sbj_handling == SubjunctiveHandling::WereSbj,
                };
                let words = self.surface.say(&sv)?;
                Self::slice_verb_words(
                    &words,
                    vwc.is_split,
                    verb.is_pro_verb,
                    vwc.contract_not.is_true(),
                )
            })
            .collect()
    }

    /// The first way to say `vwc`.
    pub fn say(&self, vwc: &VerbWithContext) -> Result<VerbSayResult, VerbSayError> {
        let mut options = self.get_all_say_options(vwc, 1)?;
        // moods_modals_tenses never comes back empty
        options.pop().ok_or(VerbSayError::ConditionalFormOfModalityDne)
    }

    /// Saying is the only way to find out.
    pub fn is_valid(&self, vwc: &VerbWithContext) -> bool {
        self.say(vwc).is_ok()
    }
}

#[cfg(test)]
mod sayer_tests {
    use super::*;
    use crate::{
        test_utils::{walk_s3_present, VERB_SAYER},
        verb::{Conjugation, Tense, Throol, VerbForm, Voice},
    };
    use pretty_assertions::assert_eq;

    fn words(ws: &[&str]) -> Vec<String> {
        ws.iter().map(|w| w.to_string()).collect()
    }

    fn result(pre: &[&str], main: &[&str]) -> VerbSayResult {
        VerbSayResult::new(words(pre), words(main))
    }

    #[test]
    fn walks() {
        let vwc = walk_s3_present();
        assert_eq!(VERB_SAYER.say(&vwc), Ok(result(&[], &["walks"])));
    }

    #[test]
    fn split_negative() {
        let mut vwc = walk_s3_present();
        vwc.verb.polarity.tf = false;
        vwc.is_split = true;
        vwc.contract_not = Throol::True;
        assert_eq!(VERB_SAYER.say(&vwc), Ok(result(&["does", "not"], &["walk"])));

        vwc.contract_not = Throol::False;
        assert_eq!(VERB_SAYER.say(&vwc), Ok(result(&["does"], &["not", "walk"])));
    }

    #[test]
    fn split_positive_question() {
        let mut vwc = walk_s3_present();
        vwc.is_split = true;
        vwc.verb.tense = Tense::Past;
        assert_eq!(VERB_SAYER.say(&vwc), Ok(result(&["did"], &["walk"])));
    }

    #[test]
    fn pro_verbs() {
        let mut vwc = walk_s3_present();
        vwc.verb.is_pro_verb = true;
        assert_eq!(VERB_SAYER.say(&vwc), Ok(result(&[], &["<does-pv>"])));

        vwc.verb.polarity.tf = false;
        assert_eq!(
            VERB_SAYER.say(&vwc),
            Ok(result(&[], &["<does-pv>", "<not-pv>"]))
        );

        vwc.relative_cont = RelativeContainment::Zero;
        assert_eq!(
            VERB_SAYER.say(&vwc),
            Err(VerbSayError::RelativeProVerbConflict)
        );
    }

    #[test]
    fn multiple_options() {
        let mut vwc = walk_s3_present();
        vwc.verb.modality.flavor = ModalFlavor::Permissive;
        let options = VERB_SAYER.get_all_say_options(&vwc, usize::MAX).unwrap();
        assert_eq!(
            options,
            vec![result(&[], &["may", "walk"]), result(&[], &["can", "walk"])]
        );
        assert_eq!(VERB_SAYER.get_all_say_options(&vwc, 1).unwrap().len(), 1);
    }

    #[test]
    fn rejections() {
        let mut vwc = walk_s3_present();
        vwc.voice = Voice::Unknown;
        assert_eq!(VERB_SAYER.say(&vwc), Err(VerbSayError::HasUnsetFields));

        let mut vwc = walk_s3_present();
        vwc.verb.verb_form = VerbForm::Gerund;
        vwc.is_split = true;
        assert_eq!(VERB_SAYER.say(&vwc), Err(VerbSayError::CanOnlySplitFinite));

        let mut vwc = walk_s3_present();
        vwc.verb.verb_form = VerbForm::Gerund;
        vwc.verb.modality.flavor = ModalFlavor::Imperative;
        assert_eq!(
            VERB_SAYER.say(&vwc),
            Err(VerbSayError::NonFiniteModalityMustBeIndicative)
        );

        let mut vwc = walk_s3_present();
        vwc.verb.verb_form = VerbForm::ToInf;
        vwc.relative_cont = RelativeContainment::Word;
        assert_eq!(
            VERB_SAYER.say(&vwc),
            Err(VerbSayError::RelClausesCanOnlyContainFinite)
        );

        let mut vwc = walk_s3_present();
        vwc.verb.modality.flavor = ModalFlavor::Imperative;
        assert_eq!(VERB_SAYER.say(&vwc), Err(VerbSayError::ImperativesAre2ndPerson));
        assert!(!VERB_SAYER.is_valid(&vwc));
        vwc.conj = Conjugation::S2;
        assert!(VERB_SAYER.is_valid(&vwc));

        let mut vwc = walk_s3_present();
        vwc.verb.modality.flavor = ModalFlavor::Deductive;
        vwc.verb.modality.is_cond = true;
        assert_eq!(
            VERB_SAYER.say(&vwc),
            Err(VerbSayError::ConditionalFormOfModalityDne)
        );
    }

    #[test]
    fn slicing() {
        assert_eq!(
            VerbSayer::slice_verb_words(&[], false, false, false),
            Err(VerbSayError::NoVerbWords)
        );
        assert_eq!(
            VerbSayer::slice_verb_words(&words(&["not", "not"]), false, false, false),
            Err(VerbSayError::MultipleNots)
        );
        assert_eq!(
            VerbSayer::slice_verb_words(&words(&["were", "to", "not", "go"]), false, true, false),
            Ok(result(&[], &["<were-pv>", "<to-pv>", "<not-pv>"]))
        );
        assert_eq!(
            VerbSayer::slice_verb_words(&words(&["walk"]), true, false, false),
            Ok(result(&["walk"], &[]))
        );
    }
}
