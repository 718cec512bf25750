use crate::verb::{Aspect, Conjugation};

/// Like polarity, but also "does" as in "she *does* know".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Whether {
    No,
    Yes,
    /// Yes, against an expected no.
    Emph,
}

/// English's mood specific tenses, only loosely related to time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SurfaceTense {
    Past,
    /// Present, and future with "will".
    NonPast,
    /// "if I *were* there right now"
    SbjPast,
    /// "she requests you *come*"
    SbjPres,
    /// "if I *were to become* a sailor"
    SbjFut,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mood {
    /// "they *went*"
    Ind,
    /// "*go*"
    Imp,
    /// "she requests you *come*"
    SbjImp,
    /// "wish you *were* here"
    SbjCf,
}

impl Mood {
    /// Tenses the mood can be said in.
    pub fn tenses(self) -> &'static [SurfaceTense] {
        match self {
            Mood::Ind => &[SurfaceTense::Past, SurfaceTense::NonPast],
            Mood::Imp => &[SurfaceTense::NonPast],
            Mood::SbjImp => &[SurfaceTense::SbjPres],
            Mood::SbjCf => &[SurfaceTense::SbjPast, SurfaceTense::SbjFut],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SurfaceVerbForm {
    /// "the cat that *was seen* by me"
    NormalFinite,
    /// "the cat *seen* by me"
    ZeroRelclauseFinite,
    BareInf,
    ToInf,
    Gerund,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SurfaceVoice {
    Active,
    Passive,
}

/// Short lived form of a verb that says modality with moods and modal words,
/// and tense with [`SurfaceTense`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SurfaceVerb {
    pub lemma: String,
    pub whether: Whether,
    pub tense: SurfaceTense,
    pub aspect: Aspect,
    pub modal: Option<String>,
    pub mood: Mood,
    pub verb_form: SurfaceVerbForm,
    pub voice: SurfaceVoice,
    pub conj: Conjugation,
    pub split_inf: bool,
    pub use_were_sbj: bool,
}

impl SurfaceVerb {
    pub fn is_finite(&self) -> bool {
        matches!(
            self.verb_form,
            SurfaceVerbForm::NormalFinite | SurfaceVerbForm::ZeroRelclauseFinite
        )
    }
}
