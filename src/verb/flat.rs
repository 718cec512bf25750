use super::{
    enums::{
        Conjugation, ModalFlavor, RelativeContainment, SubjunctiveHandling, Tense, Throol,
        VerbForm, Voice,
    },
    model::VerbWithContext,
    pattern::{AspectPattern, ModalityPattern, PolarityPattern, VerbPattern, VerbWithContextPattern},
};
use crate::{combinatorics::Slot, errors::InitError};

pub const NUM_FLAT_FIELDS: usize = 17;

pub const BOOL_CHOICES: &[bool] = &[false, true];

/// The fields of a [`VerbWithContext`] flattened into a fixed order, so that a
/// verb can be written as one option index per field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FlatField {
    Lemma,
    Tf,
    IsContrary,
    Tense,
    IsPerf,
    IsProg,
    Flavor,
    IsCond,
    VerbForm,
    IsProVerb,
    Voice,
    Conj,
    IsSplit,
    RelativeCont,
    ContractNot,
    SplitInf,
    SbjHandling,
}

impl FlatField {
    pub const ALL: [FlatField; NUM_FLAT_FIELDS] = [
        FlatField::Lemma,
        FlatField::Tf,
        FlatField::IsContrary,
        FlatField::Tense,
        FlatField::IsPerf,
        FlatField::IsProg,
        FlatField::Flavor,
        FlatField::IsCond,
        FlatField::VerbForm,
        FlatField::IsProVerb,
        FlatField::Voice,
        FlatField::Conj,
        FlatField::IsSplit,
        FlatField::RelativeCont,
        FlatField::ContractNot,
        FlatField::SplitInf,
        FlatField::SbjHandling,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// How many options the field ranges over; for the lemma that is the
    /// number of lemmas being enumerated.
    pub fn num_options(self, num_lemmas: usize) -> usize {
        match self {
            FlatField::Lemma => num_lemmas,
            FlatField::Tf
            | FlatField::IsPerf
            | FlatField::IsProg
            | FlatField::IsCond
            | FlatField::IsProVerb
            | FlatField::IsSplit => BOOL_CHOICES.len(),
            FlatField::IsContrary | FlatField::ContractNot | FlatField::SplitInf => {
                Throol::CHOICES.len()
            }
            FlatField::Tense => Tense::CHOICES.len(),
            FlatField::Flavor => ModalFlavor::CHOICES.len(),
            FlatField::VerbForm => VerbForm::CHOICES.len(),
            FlatField::Voice => Voice::CHOICES.len(),
            FlatField::Conj => Conjugation::CHOICES.len(),
            FlatField::RelativeCont => RelativeContainment::CHOICES.len(),
            FlatField::SbjHandling => SubjunctiveHandling::CHOICES.len(),
        }
    }

    /// `count` as an option count for this field; option indices are bytes.
    pub fn checked_count(self, count: usize) -> Result<u8, InitError> {
        u8::try_from(count).map_err(|_| InitError::TooManyOptions { field: self, count })
    }
}

/// Option counts of every field, in [`FlatField`] order.
pub fn global_num_options(num_lemmas: usize) -> Result<Vec<u8>, InitError> {
    FlatField::ALL
        .iter()
        .map(|&f| f.checked_count(f.num_options(num_lemmas)))
        .collect()
}

/// Option index of a value within its field.
pub fn option_index<T: PartialEq>(choices: &[T], value: &T) -> Option<u8> {
    let i = choices.iter().position(|c| c == value)?;
    u8::try_from(i).ok()
}

fn pick<T: Clone>(choices: &[T], slot: Slot<u8>) -> Option<Slot<T>> {
    Some(match slot {
        Slot::One(i) => Slot::One(choices.get(i as usize)?.clone()),
        Slot::Any => Slot::Any,
    })
}

impl VerbWithContextPattern {
    /// Builds a pattern from one (possibly wildcarded) option index per
    /// [`FlatField`]. `None` if the tuple has the wrong length or an index
    /// is out of range.
    pub fn from_flat(tuple: &[Slot<u8>], lemmas: &[String]) -> Option<Self> {
        if tuple.len() != NUM_FLAT_FIELDS {
            return None;
        }
        let at = |f: FlatField| tuple[f.index()];
        Some(Self {
            verb: VerbPattern {
                lemma: pick(lemmas, at(FlatField::Lemma))?,
                polarity: PolarityPattern {
                    tf: pick(BOOL_CHOICES, at(FlatField::Tf))?,
                    is_contrary: pick(Throol::CHOICES, at(FlatField::IsContrary))?,
                },
                tense: pick(Tense::CHOICES, at(FlatField::Tense))?,
                aspect: AspectPattern {
                    is_perf: pick(BOOL_CHOICES, at(FlatField::IsPerf))?,
                    is_prog: pick(BOOL_CHOICES, at(FlatField::IsProg))?,
                },
                modality: ModalityPattern {
                    flavor: pick(ModalFlavor::CHOICES, at(FlatField::Flavor))?,
                    is_cond: pick(BOOL_CHOICES, at(FlatField::IsCond))?,
                },
                verb_form: pick(VerbForm::CHOICES, at(FlatField::VerbForm))?,
                is_pro_verb: pick(BOOL_CHOICES, at(FlatField::IsProVerb))?,
            },
            voice: pick(Voice::CHOICES, at(FlatField::Voice))?,
            conj: pick(Conjugation::CHOICES, at(FlatField::Conj))?,
            is_split: pick(BOOL_CHOICES, at(FlatField::IsSplit))?,
            relative_cont: pick(RelativeContainment::CHOICES, at(FlatField::RelativeCont))?,
            contract_not: pick(Throol::CHOICES, at(FlatField::ContractNot))?,
            split_inf: pick(Throol::CHOICES, at(FlatField::SplitInf))?,
            sbj_handling: pick(SubjunctiveHandling::CHOICES, at(FlatField::SbjHandling))?,
        })
    }
}

impl VerbWithContext {
    pub fn from_flat(tuple: &[u8], lemmas: &[String]) -> Option<Self> {
        let slots: Vec<Slot<u8>> = tuple.iter().map(|&i| Slot::One(i)).collect();
        VerbWithContextPattern::from_flat(&slots, lemmas)?.to_concrete()
    }
}
