use serde::{Deserialize, Serialize};

use super::enums::{
    Conjugation, ModalFlavor, RelativeContainment, SubjunctiveHandling, Tense, Throol, VerbForm,
    Voice,
};

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Polarity {
    pub tf: bool,
    /// Whether the polarity goes against what the listener expects, which
    /// makes affirmatives emphatic ("I *did* go").
    pub is_contrary: Throol,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Aspect {
    pub is_perf: bool,
    pub is_prog: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Modality {
    pub flavor: ModalFlavor,
    pub is_cond: bool,
}

/// The deep features of a single verb.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Verb {
    pub lemma: String,
    pub polarity: Polarity,
    pub tense: Tense,
    pub aspect: Aspect,
    pub modality: Modality,
    pub verb_form: VerbForm,
    pub is_pro_verb: bool,
}

impl Verb {
    pub fn has_unset_fields(&self) -> bool {
        self.polarity.is_contrary.is_unset()
            || self.tense.is_unset()
            || self.modality.flavor.is_unset()
            || self.verb_form.is_unset()
    }

    /// Subjunctives and non-finite forms can only appear in subordinate clauses.
    pub fn is_possible_at_sentence_root(&self) -> bool {
        !matches!(
            self.modality.flavor,
            ModalFlavor::SubjunctiveCf | ModalFlavor::SubjunctiveImp
        ) && self.verb_form.is_finite()
    }
}

/// A [`Verb`] plus the clause level context needed to say it.
///
/// This is what saying consumes and what parsing recovers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VerbWithContext {
    pub verb: Verb,
    pub voice: Voice,
    pub conj: Conjugation,
    /// Split for subject-auxiliary inversion, "*did* you *go*".
    pub is_split: bool,
    pub relative_cont: RelativeContainment,
    pub contract_not: Throol,
    pub split_inf: Throol,
    pub sbj_handling: SubjunctiveHandling,
}

impl VerbWithContext {
    pub fn has_unset_fields(&self) -> bool {
        self.voice.is_unset()
            || self.conj.is_unset()
            || self.relative_cont.is_unset()
            || self.contract_not.is_unset()
            || self.split_inf.is_unset()
            || self.sbj_handling.is_unset()
            || self.verb.has_unset_fields()
    }

    pub fn is_possible_at_sentence_root(&self) -> bool {
        self.verb.is_possible_at_sentence_root() && self.relative_cont == RelativeContainment::No
    }
}
