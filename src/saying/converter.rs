use std::{fs, path::Path};

use crate::{
    errors::{InitError, VerbSayError},
    surface::{Mood, SurfaceTense, SurfaceVerbForm, SurfaceVoice},
    table::{parse_table, Table},
    verb::{Modality, ModalFlavor, RelativeContainment, Tense, VerbForm, Voice},
};

const IS_COND_COLUMNS: [&str; 2] = ["NORMAL", "CONDITIONAL"];

/// One way to say a modality.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoodAndModal {
    pub mood: Mood,
    pub modal: Option<String>,
}

impl MoodAndModal {
    /// Lowercase tokens are modal words, uppercase ones are moods.
    fn parse(token: &str) -> Result<Self, String> {
        if token.starts_with(|c: char| c.is_ascii_lowercase()) {
            return Ok(Self {
                mood: Mood::Ind,
                modal: Some(token.to_string()),
            });
        }
        let mood = match token {
            "NORMAL" => Mood::Ind,
            "IMP" => Mood::Imp,
            "SBJ_IMP" => Mood::SbjImp,
            "SBJ_CF" => Mood::SbjCf,
            other => return Err(format!("unknown mood `{other}`")),
        };
        Ok(Self { mood, modal: None })
    }
}

/// Modality (flavor x conditional) to the moods and modal words that say it.
#[derive(Clone, Debug)]
pub struct ModalitiesTable {
    table: Table<ModalFlavor, bool, Vec<MoodAndModal>>,
}

impl ModalitiesTable {
    pub fn from_file(path: &Path) -> Result<Self, InitError> {
        let text = fs::read_to_string(path).map_err(InitError::io(path))?;
        let table = parse_table(&text, ModalFlavor::CHOICES, &IS_COND_COLUMNS).map_err(
            |source| InitError::Table {
                path: path.to_path_buf(),
                source,
            },
        )?;
        Self::from_table(&table)
    }

    /// Cells are `-` for "no way to say it", or comma separated tokens.
    pub fn from_table(table: &Table<ModalFlavor, &str, String>) -> Result<Self, InitError> {
        let mut options = Vec::with_capacity(table.values().len());
        for cell in table.values() {
            if cell == "-" {
                options.push(Vec::new());
                continue;
            }
            let mms = cell
                .split(',')
                .map(MoodAndModal::parse)
                .collect::<Result<Vec<_>, _>>()
                .map_err(InitError::Modalities)?;
            options.push(mms);
        }
        let table = Table::with_values(
            table.row_keys().iter().copied(),
            [false, true],
            options,
        )
        .map_err(|e| InitError::Modalities(e.to_string()))?;
        Ok(Self { table })
    }

    pub fn options(&self, m: &Modality) -> &[MoodAndModal] {
        self.table
            .get(&m.flavor, &m.is_cond)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// A mood and modal option together with the surface tense it takes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoodModalTense {
    pub mood: Mood,
    pub modal: Option<String>,
    pub tense: SurfaceTense,
}

/// Deep to surface category conversions.
#[derive(Clone, Debug)]
pub struct VerbConverter {
    modalities: ModalitiesTable,
}

impl VerbConverter {
    pub fn new(modalities: ModalitiesTable) -> Self {
        Self { modalities }
    }

    pub fn from_file(modalities_path: &Path) -> Result<Self, InitError> {
        Ok(Self::new(ModalitiesTable::from_file(modalities_path)?))
    }

    pub fn surface_voice(voice: Voice) -> Result<SurfaceVoice, VerbSayError> {
        match voice {
            Voice::Active => Ok(SurfaceVoice::Active),
            Voice::Passive => Ok(SurfaceVoice::Passive),
            Voice::Unknown => Err(VerbSayError::HasUnsetFields),
        }
    }

    pub fn surface_verb_form(
        vf: VerbForm,
        rc: RelativeContainment,
    ) -> Result<SurfaceVerbForm, VerbSayError> {
        match (vf, rc) {
            (VerbForm::Unknown, _) | (_, RelativeContainment::Unknown) => {
                Err(VerbSayError::HasUnsetFields)
            }
            (VerbForm::Finite, RelativeContainment::Zero) => {
                Ok(SurfaceVerbForm::ZeroRelclauseFinite)
            }
            (VerbForm::Finite, _) => Ok(SurfaceVerbForm::NormalFinite),
            (_, RelativeContainment::Zero | RelativeContainment::Word) => {
                Err(VerbSayError::RelClausesCanOnlyContainFinite)
            }
            (VerbForm::BareInf, _) => Ok(SurfaceVerbForm::BareInf),
            (VerbForm::ToInf, _) => Ok(SurfaceVerbForm::ToInf),
            (VerbForm::Gerund | VerbForm::SubjlessGerund, _) => Ok(SurfaceVerbForm::Gerund),
        }
    }

    pub fn surface_tense(tense: Tense, mood: Mood) -> Result<SurfaceTense, VerbSayError> {
        if tense.is_unset() {
            return Err(VerbSayError::HasUnsetFields);
        }
        Ok(match mood {
            Mood::Ind if tense == Tense::Past => SurfaceTense::Past,
            Mood::Ind | Mood::Imp => SurfaceTense::NonPast,
            Mood::SbjImp => SurfaceTense::SbjPres,
            Mood::SbjCf if tense == Tense::Future => SurfaceTense::SbjFut,
            Mood::SbjCf => SurfaceTense::SbjPast,
        })
    }

    /// Every (mood, modal, surface tense) a modality can be said with.
    pub fn moods_modals_tenses(
        &self,
        m: &Modality,
        tense: Tense,
    ) -> Result<Vec<MoodModalTense>, VerbSayError> {
        let mms = self.modalities.options(m);
        if mms.is_empty() {
            return Err(VerbSayError::ConditionalFormOfModalityDne);
        }
        mms.iter()
            .map(|mm| {
                let modal = if m.flavor == ModalFlavor::Indicative && tense == Tense::Future {
                    Some("will".to_string())
                } else {
                    mm.modal.clone()
                };
                Ok(MoodModalTense {
                    mood: mm.mood,
                    modal,
                    tense: Self::surface_tense(tense, mm.mood)?,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod converter_tests {
    use super::*;
    use crate::test_utils::data_path;
    use pretty_assertions::assert_eq;

    fn converter() -> VerbConverter {
        VerbConverter::from_file(&data_path("modalities.txt")).unwrap()
    }

    fn modality(flavor: ModalFlavor, is_cond: bool) -> Modality {
        Modality { flavor, is_cond }
    }

    fn mmt(mood: Mood, modal: Option<&str>, tense: SurfaceTense) -> MoodModalTense {
        MoodModalTense {
            mood,
            modal: modal.map(str::to_string),
            tense,
        }
    }

    #[test]
    fn verb_forms() {
        use RelativeContainment::*;
        let f = VerbConverter::surface_verb_form;
        assert_eq!(f(VerbForm::Finite, No), Ok(SurfaceVerbForm::NormalFinite));
        assert_eq!(f(VerbForm::Finite, Word), Ok(SurfaceVerbForm::NormalFinite));
        assert_eq!(f(VerbForm::Finite, Zero), Ok(SurfaceVerbForm::ZeroRelclauseFinite));
        assert_eq!(f(VerbForm::SubjlessGerund, No), Ok(SurfaceVerbForm::Gerund));
        assert_eq!(
            f(VerbForm::ToInf, Word),
            Err(VerbSayError::RelClausesCanOnlyContainFinite)
        );
    }

    #[test]
    fn tenses() {
        let t = VerbConverter::surface_tense;
        assert_eq!(t(Tense::Past, Mood::Ind), Ok(SurfaceTense::Past));
        assert_eq!(t(Tense::Future, Mood::Ind), Ok(SurfaceTense::NonPast));
        assert_eq!(t(Tense::Past, Mood::Imp), Ok(SurfaceTense::NonPast));
        assert_eq!(t(Tense::Past, Mood::SbjImp), Ok(SurfaceTense::SbjPres));
        assert_eq!(t(Tense::Present, Mood::SbjCf), Ok(SurfaceTense::SbjPast));
        assert_eq!(t(Tense::Future, Mood::SbjCf), Ok(SurfaceTense::SbjFut));
    }

    #[test]
    fn modalities() {
        let c = converter();
        assert_eq!(
            c.moods_modals_tenses(&modality(ModalFlavor::Indicative, false), Tense::Future),
            Ok(vec![mmt(Mood::Ind, Some("will"), SurfaceTense::NonPast)])
        );
        assert_eq!(
            c.moods_modals_tenses(&modality(ModalFlavor::Indicative, true), Tense::Past),
            Ok(vec![mmt(Mood::Ind, Some("would"), SurfaceTense::Past)])
        );
        assert_eq!(
            c.moods_modals_tenses(&modality(ModalFlavor::Permissive, false), Tense::Present),
            Ok(vec![
                mmt(Mood::Ind, Some("may"), SurfaceTense::NonPast),
                mmt(Mood::Ind, Some("can"), SurfaceTense::NonPast),
            ])
        );
        assert_eq!(
            c.moods_modals_tenses(&modality(ModalFlavor::SubjunctiveCf, false), Tense::Future),
            Ok(vec![mmt(Mood::SbjCf, None, SurfaceTense::SbjFut)])
        );
        assert_eq!(
            c.moods_modals_tenses(&modality(ModalFlavor::Imperative, true), Tense::Present),
            Err(VerbSayError::ConditionalFormOfModalityDne)
        );
    }

    #[test]
    fn bad_mood_token() {
        let text = "NORMAL CONDITIONAL\n".to_string()
            + &ModalFlavor::CHOICES
                .iter()
                .map(|f| format!("{f} NORMAL FOO\n"))
                .collect::<String>();
        let table = parse_table(&text, ModalFlavor::CHOICES, &IS_COND_COLUMNS).unwrap();
        assert!(matches!(
            ModalitiesTable::from_table(&table),
            Err(InitError::Modalities(_))
        ));
    }
}
