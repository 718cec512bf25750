use std::{collections::HashMap, fs, path::Path};

use super::surface_verb::{Mood, SurfaceTense, SurfaceVerb};
use crate::{
    errors::{InitError, VerbSayError},
    table::{parse_string_table, StringTable},
    verb::Conjugation,
};

const PAST_COLUMN: &str = "PAST";
const HAVE_COLUMN: &str = "HAVE";

/// How a modal is said in the past: "can" -> "could", "may" -> "may have".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModalPast {
    pub modal: String,
    pub is_perf: bool,
}

#[derive(Clone, Debug, Default)]
pub struct ModalPastTenseConverter {
    modal2past: HashMap<String, ModalPast>,
}

impl ModalPastTenseConverter {
    pub fn from_file(path: &Path) -> Result<Self, InitError> {
        let text = fs::read_to_string(path).map_err(InitError::io(path))?;
        let table = parse_string_table(&text).map_err(|source| InitError::Table {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_table(&table)
    }

    /// Rows are modals; `PAST` holds the past modal and `HAVE` is `-` or `have`.
    pub fn from_table(table: &StringTable) -> Result<Self, InitError> {
        let past_column = PAST_COLUMN.to_string();
        let have_column = HAVE_COLUMN.to_string();
        let mut modal2past = HashMap::new();
        for modal in table.row_keys() {
            let (Some(past), Some(have)) = (
                table.get(modal, &past_column),
                table.get(modal, &have_column),
            ) else {
                return Err(InitError::ModalPastTense(format!(
                    "expected {PAST_COLUMN} and {HAVE_COLUMN} columns"
                )));
            };
            let is_perf = match have.as_str() {
                "-" => false,
                "have" => true,
                other => {
                    return Err(InitError::ModalPastTense(format!(
                        "{HAVE_COLUMN} of `{modal}` must be `-` or `have`, got `{other}`"
                    )))
                }
            };
            modal2past.insert(
                modal.clone(),
                ModalPast {
                    modal: past.clone(),
                    is_perf,
                },
            );
        }
        Ok(Self { modal2past })
    }

    pub fn past_form(&self, modal: &str) -> Option<&ModalPast> {
        self.modal2past.get(modal)
    }
}

/// Checks and adjusts a [`SurfaceVerb`] before it is said.
#[derive(Clone, Debug, Default)]
pub struct SurfaceVerbConverter {
    modal_past: ModalPastTenseConverter,
}

impl SurfaceVerbConverter {
    pub fn new(modal_past: ModalPastTenseConverter) -> Self {
        Self { modal_past }
    }

    pub fn is_tense_ok_for_mood(tense: SurfaceTense, mood: Mood) -> bool {
        mood.tenses().contains(&tense)
    }

    /// Catches the surface combinations English can't say.
    pub fn might_be_valid(&self, v: &SurfaceVerb) -> Result<(), VerbSayError> {
        // modality is either a mood or a modal word, never both
        if v.modal.is_some() && v.mood != Mood::Ind {
            return Err(VerbSayError::CantHaveBothModalsAndNonInd);
        }
        if v.mood == Mood::Imp && !matches!(v.conj, Conjugation::S2 | Conjugation::P2) {
            return Err(VerbSayError::ImperativesAre2ndPerson);
        }
        if !Self::is_tense_ok_for_mood(v.tense, v.mood) {
            return Err(VerbSayError::SurfaceTenseNotOkWithMood);
        }
        if !v.is_finite() && (v.modal.is_some() || v.mood != Mood::Ind) {
            return Err(VerbSayError::NonFinitesCantHaveMoodsOrModals);
        }
        Ok(())
    }

    /// The modal and perfectiveness to actually say. Past tense modals become
    /// their past forms, which may bring in a perfective "have".
    pub fn handle_modal_past_tense(
        &self,
        modal: Option<&str>,
        tense: SurfaceTense,
        is_perf: bool,
    ) -> Result<(Option<String>, bool), VerbSayError> {
        let Some(modal) = modal else {
            return Ok((None, is_perf));
        };
        if tense != SurfaceTense::Past {
            return Ok((Some(modal.to_string()), is_perf));
        }
        let past = self
            .modal_past
            .past_form(modal)
            .ok_or_else(|| VerbSayError::ModalIsUnknown(modal.to_string()))?;
        Ok((Some(past.modal.clone()), past.is_perf || is_perf))
    }
}
