use std::{path::Path, sync::Arc};

use super::{
    converter::{ModalPastTenseConverter, SurfaceVerbConverter},
    surface_verb::{Mood, SurfaceTense, SurfaceVerb, SurfaceVerbForm, SurfaceVoice, Whether},
};
use crate::{
    conjugation::{
        nonpast_field, past_field, ConjugationSpec, Conjugator, FIELD_LEMMA, FIELD_PAST_PART,
        FIELD_PRES_PART,
    },
    errors::{InitError, VerbSayError},
    verb::Conjugation,
};

/// One word to say: a lemma and the [`ConjugationSpec`] field to say it in.
///
/// `field` stays `None` until the plan decides; leftovers become the lemma.
#[derive(Clone, Debug)]
struct VerbField {
    lemma: String,
    field: Option<usize>,
}

impl VerbField {
    /// A word said as is ("not", "to", modals).
    fn raw(word: impl Into<String>) -> Self {
        Self {
            lemma: word.into(),
            field: Some(FIELD_LEMMA),
        }
    }

    fn open(lemma: impl Into<String>) -> Self {
        Self {
            lemma: lemma.into(),
            field: None,
        }
    }
}

/// Person/number as an index into the six finite forms.
fn person(conj: Conjugation) -> Result<usize, VerbSayError> {
    conj.choice_index().ok_or(VerbSayError::HasUnsetFields)
}

/// Turns a [`SurfaceVerb`] into its words.
///
/// Only saying goes through here. Parsing uses generated lookup tables, since
/// there is no sane way to run this backwards.
pub struct SurfaceVerbSayer {
    conjugator: Arc<Conjugator>,
    conv: SurfaceVerbConverter,
}

impl SurfaceVerbSayer {
    pub fn new(conjugator: Arc<Conjugator>, conv: SurfaceVerbConverter) -> Self {
        Self { conjugator, conv }
    }

    pub fn from_file(
        conjugator: Arc<Conjugator>,
        modal_past_tense_path: &Path,
    ) -> Result<Self, InitError> {
        let modal_past = ModalPastTenseConverter::from_file(modal_past_tense_path)?;
        Ok(Self::new(conjugator, SurfaceVerbConverter::new(modal_past)))
    }

    pub fn conjugator(&self) -> &Conjugator {
        &self.conjugator
    }

    /// "if I *were to (not) go*"
    fn say_sbj_fut(&self, v: &SurfaceVerb, ff: &mut Vec<VerbField>) -> Result<(), VerbSayError> {
        let conj = if v.use_were_sbj {
            Conjugation::P2
        } else {
            v.conj
        };
        let were_or_was = self.conjugator.to_be().past()[person(conj)?].clone();
        ff.insert(0, VerbField::raw("to"));
        ff.insert(0, VerbField::raw(were_or_was));
        if v.whether == Whether::No {
            let not_x = if v.split_inf { 2 } else { 1 };
            ff.insert(not_x, VerbField::raw("not"));
        }
        Ok(())
    }

    fn say_normal(
        &self,
        v: &SurfaceVerb,
        to_verb: &ConjugationSpec,
        use_perf: bool,
        has_modal: bool,
        ff: &mut Vec<VerbField>,
    ) -> Result<(), VerbSayError> {
        // do-support
        if v.is_finite() && matches!(v.whether, Whether::No | Whether::Emph) {
            let already_has_an_aux = has_modal || use_perf || v.aspect.is_prog;
            let can_use_do = to_verb.has_do_support() && v.voice == SurfaceVoice::Active;
            if v.mood == Mood::Ind && !already_has_an_aux && can_use_do {
                ff.insert(0, VerbField::open("do"));
            }
        }

        if v.verb_form == SurfaceVerbForm::ToInf {
            ff.insert(0, VerbField::raw("to"));
        }

        if v.whether == Whether::No {
            let not_x = if v.is_finite() {
                match v.mood {
                    Mood::Ind | Mood::SbjCf => 1,
                    Mood::Imp | Mood::SbjImp => 0,
                }
            } else if v.verb_form == SurfaceVerbForm::ToInf && v.split_inf {
                1
            } else {
                0
            };
            ff.insert(not_x, VerbField::raw("not"));
        }

        // the front word carries mood and tense; anything left over is said
        // in its base form
        if v.is_finite() {
            match (v.mood, v.tense) {
                (Mood::Ind, tense) if ff[0].field.is_none() => {
                    let conj = person(v.conj)?;
                    ff[0].field = Some(if tense == SurfaceTense::NonPast {
                        nonpast_field(conj)
                    } else {
                        past_field(conj)
                    });
                }
                (Mood::SbjCf, SurfaceTense::SbjPast) => {
                    let conj = if v.use_were_sbj {
                        Conjugation::P2
                    } else {
                        v.conj
                    };
                    ff[0].field = Some(past_field(person(conj)?));
                }
                _ => {}
            }
        } else if v.verb_form == SurfaceVerbForm::Gerund {
            let conj_x = if v.whether == Whether::No { 1 } else { 0 };
            ff[conj_x].field = Some(FIELD_PRES_PART);
        }
        Ok(())
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    pub fn say(&self, v: &SurfaceVerb) -> Result<Vec<String>, VerbSayError> {
        self.conv.might_be_valid(v)?;

        // "can" -> "could" etc.
        let (use_modal, use_perf) =
            self.conv
                .handle_modal_past_tense(v.modal.as_deref(), v.tense, v.aspect.is_perf)?;

        let to_verb = self.conjugator.create_verb_spec(&v.lemma)?;

        let mut ff = Vec::with_capacity(8);
        let has_modal = use_modal.is_some();
        if let Some(modal) = use_modal {
            ff.push(VerbField::raw(modal));
        }
        if use_perf {
            ff.push(VerbField::open("have"));
        }
        if v.aspect.is_prog {
            ff.push(VerbField::open("be"));
        }
        if v.voice == SurfaceVoice::Passive {
            ff.push(VerbField::open("be"));
        }
        ff.push(VerbField::open(v.lemma.as_str()));

        if v.mood == Mood::SbjCf && v.tense == SurfaceTense::SbjFut {
            self.say_sbj_fut(v, &mut ff)?;
        } else {
            self.say_normal(v, &to_verb, use_perf, has_modal, &mut ff)?;
        }

        // participles, from the main verb backwards
        let mut z = ff.len();
        if v.voice == SurfaceVoice::Passive {
            z -= 1;
            ff[z].field = Some(FIELD_PAST_PART);
        }
        if v.aspect.is_prog {
            z -= 1;
            ff[z].field = Some(FIELD_PRES_PART);
        }
        if use_perf {
            z -= 1;
            ff[z].field = Some(FIELD_PAST_PART);
        }

        let mut words = ff
            .iter()
            .map(|f| {
                self.conjugator
                    .conjugate(&f.lemma, f.field.unwrap_or(FIELD_LEMMA))
            })
            .collect::<Result<Vec<String>, VerbSayError>>()?;

        // "the cat *seen* by you", not "the cat *was seen* by you"
        let drops_copula = v.verb_form == SurfaceVerbForm::ZeroRelclauseFinite
            && v.voice == SurfaceVoice::Passive
            && matches!(
                words.first().map(String::as_str),
                Some("is" | "are" | "was" | "were")
            );
        if drops_copula {
            words.remove(0);
        }
        Ok(words)
    }
}
