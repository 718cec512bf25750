use serde::{Deserialize, Serialize};

use super::{
    enums::{
        Conjugation, ModalFlavor, RelativeContainment, SubjunctiveHandling, Tense, Throol,
        VerbForm, Voice,
    },
    model::{Aspect, Modality, Polarity, Verb, VerbWithContext},
};
use crate::combinatorics::Slot;

// Same shape as the concrete types, with every field possibly wildcarded.

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PolarityPattern {
    pub tf: Slot<bool>,
    pub is_contrary: Slot<Throol>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AspectPattern {
    pub is_perf: Slot<bool>,
    pub is_prog: Slot<bool>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModalityPattern {
    pub flavor: Slot<ModalFlavor>,
    pub is_cond: Slot<bool>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VerbPattern {
    pub lemma: Slot<String>,
    pub polarity: PolarityPattern,
    pub tense: Slot<Tense>,
    pub aspect: AspectPattern,
    pub modality: ModalityPattern,
    pub verb_form: Slot<VerbForm>,
    pub is_pro_verb: Slot<bool>,
}

/// A set of [`VerbWithContext`]s sharing one surface rendering.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VerbWithContextPattern {
    pub verb: VerbPattern,
    pub voice: Slot<Voice>,
    pub conj: Slot<Conjugation>,
    pub is_split: Slot<bool>,
    pub relative_cont: Slot<RelativeContainment>,
    pub contract_not: Slot<Throol>,
    pub split_inf: Slot<Throol>,
    pub sbj_handling: Slot<SubjunctiveHandling>,
}

impl VerbWithContextPattern {
    pub fn set_lemma(&mut self, lemma: impl Into<String>) {
        self.verb.lemma = Slot::One(lemma.into());
    }

    pub fn matches(&self, vwc: &VerbWithContext) -> bool {
        let (p, v) = (&self.verb, &vwc.verb);
        p.lemma.matches(&v.lemma)
            && p.polarity.tf.matches(&v.polarity.tf)
            && p.polarity.is_contrary.matches(&v.polarity.is_contrary)
            && p.tense.matches(&v.tense)
            && p.aspect.is_perf.matches(&v.aspect.is_perf)
            && p.aspect.is_prog.matches(&v.aspect.is_prog)
            && p.modality.flavor.matches(&v.modality.flavor)
            && p.modality.is_cond.matches(&v.modality.is_cond)
            && p.verb_form.matches(&v.verb_form)
            && p.is_pro_verb.matches(&v.is_pro_verb)
            && self.voice.matches(&vwc.voice)
            && self.conj.matches(&vwc.conj)
            && self.is_split.matches(&vwc.is_split)
            && self.relative_cont.matches(&vwc.relative_cont)
            && self.contract_not.matches(&vwc.contract_not)
            && self.split_inf.matches(&vwc.split_inf)
            && self.sbj_handling.matches(&vwc.sbj_handling)
    }

    /// The single [`VerbWithContext`] this stands for, if nothing is wildcarded.
    pub fn to_concrete(&self) -> Option<VerbWithContext> {
        fn one<T: Clone>(s: &Slot<T>) -> Option<T> {
            match s {
                Slot::One(v) => Some(v.clone()),
                Slot::Any => None,
            }
        }
        let p = &self.verb;
        Some(VerbWithContext {
            verb: Verb {
                lemma: one(&p.lemma)?,
                polarity: Polarity {
                    tf: one(&p.polarity.tf)?,
                    is_contrary: one(&p.polarity.is_contrary)?,
                },
                tense: one(&p.tense)?,
                aspect: Aspect {
                    is_perf: one(&p.aspect.is_perf)?,
                    is_prog: one(&p.aspect.is_prog)?,
                },
                modality: Modality {
                    flavor: one(&p.modality.flavor)?,
                    is_cond: one(&p.modality.is_cond)?,
                },
                verb_form: one(&p.verb_form)?,
                is_pro_verb: one(&p.is_pro_verb)?,
            },
            voice: one(&self.voice)?,
            conj: one(&self.conj)?,
            is_split: one(&self.is_split)?,
            relative_cont: one(&self.relative_cont)?,
            contract_not: one(&self.contract_not)?,
            split_inf: one(&self.split_inf)?,
            sbj_handling: one(&self.sbj_handling)?,
        })
    }
}

impl From<&VerbWithContext> for VerbWithContextPattern {
    fn from(vwc: &VerbWithContext) -> Self {
        let v = &vwc.verb;
        Self {
            verb: VerbPattern {
                lemma: Slot::One(v.lemma.clone()),
                polarity: PolarityPattern {
                    tf: v.polarity.tf.into(),
                    is_contrary: v.polarity.is_contrary.into(),
                },
                tense: v.tense.into(),
                aspect: AspectPattern {
                    is_perf: v.aspect.is_perf.into(),
                    is_prog: v.aspect.is_prog.into(),
                },
                modality: ModalityPattern {
                    flavor: v.modality.flavor.into(),
                    is_cond: v.modality.is_cond.into(),
                },
                verb_form: v.verb_form.into(),
                is_pro_verb: v.is_pro_verb.into(),
            },
            voice: vwc.voice.into(),
            conj: vwc.conj.into(),
            is_split: vwc.is_split.into(),
            relative_cont: vwc.relative_cont.into(),
            contract_not: vwc.contract_not.into(),
            split_inf: vwc.split_inf.into(),
            sbj_handling: vwc.sbj_handling.into(),
        }
    }
}

#[cfg(test)]
mod pattern_tests {
    use super::*;
    use crate::test_utils::walk_s3_present;
    use pretty_assertions::assert_eq;

    #[test]
    fn wildcards_match_anything() {
        let vwc = walk_s3_present();
        let mut p = VerbWithContextPattern::from(&vwc);
        assert!(p.matches(&vwc));
        assert_eq!(p.to_concrete(), Some(vwc.clone()));

        let mut other = vwc.clone();
        other.conj = Conjugation::P1;
        assert!(!p.matches(&other));

        p.conj = Slot::Any;
        assert!(p.matches(&other));
        assert_eq!(p.to_concrete(), None);

        p.set_lemma("run");
        assert!(!p.matches(&other));
    }

    #[test]
    fn wildcard_json() {
        let mut p = VerbWithContextPattern::from(&walk_s3_present());
        p.verb.tense = Slot::Any;
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["verb"]["tense"], "*");
        assert_eq!(json["verb"]["aspect"]["is_perf"], false);
        assert_eq!(json["conj"], "S3");
        let back: VerbWithContextPattern = serde_json::from_value(json).unwrap();
        assert_eq!(back, p);
    }
}
