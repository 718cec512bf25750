use std::{fs, path::Path};

use getset::Getters;
use serde::{Deserialize, Serialize};

use crate::errors::InitError;

pub const NUM_PERSONS: usize = 6;

/// Fields of a [`ConjugationSpec`], as indexed by [`ConjugationSpec::field`].
pub const FIELD_LEMMA: usize = 0;
pub const FIELD_PRES_PART: usize = 1;
pub const FIELD_PAST_PART: usize = 2;
const FIELD_NONPAST: usize = 3;
const FIELD_PAST: usize = FIELD_NONPAST + NUM_PERSONS;
pub const NUM_FIELDS: usize = FIELD_PAST + NUM_PERSONS;

/// Field of the nonpast form for a person/number index (S1 = 0 .. P3 = 5).
pub fn nonpast_field(conj: usize) -> usize {
    FIELD_NONPAST + conj
}

/// Field of the past form for a person/number index (S1 = 0 .. P3 = 5).
pub fn past_field(conj: usize) -> usize {
    FIELD_PAST + conj
}

/// Every form of one verb.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
#[getset(get = "pub")]
pub struct ConjugationSpec {
    lemma: String,
    pres_part: String,
    past_part: String,
    nonpast: [String; NUM_PERSONS],
    past: [String; NUM_PERSONS],
}

impl ConjugationSpec {
    pub fn new(
        lemma: impl Into<String>,
        pres_part: impl Into<String>,
        past_part: impl Into<String>,
        nonpast: [String; NUM_PERSONS],
        past: [String; NUM_PERSONS],
    ) -> Self {
        Self {
            lemma: lemma.into(),
            pres_part: pres_part.into(),
            past_part: past_part.into(),
            nonpast,
            past,
        }
    }

    /// "be" is the one verb that negates and inverts without "do".
    pub fn has_do_support(&self) -> bool {
        self.lemma != "be"
    }

    /// `0` is the lemma, `1` the present participle, `2` the past participle,
    /// `3..=8` the nonpast S1..P3 and `9..=14` the past S1..P3.
    pub fn field(&self, index: usize) -> Option<&str> {
        match index {
            FIELD_LEMMA => Some(&self.lemma),
            FIELD_PRES_PART => Some(&self.pres_part),
            FIELD_PAST_PART => Some(&self.past_part),
            i if i < FIELD_PAST => Some(&self.nonpast[i - FIELD_NONPAST]),
            i if i < NUM_FIELDS => Some(&self.past[i - FIELD_PAST]),
            _ => None,
        }
    }

    /// The 14 inflected forms, in field order starting at field 1.
    pub fn inflections(&self) -> impl Iterator<Item = &str> {
        [&self.pres_part, &self.past_part]
            .into_iter()
            .chain(self.nonpast.iter())
            .chain(self.past.iter())
            .map(String::as_str)
    }

    /// Marks the finite forms as auxiliary, `has` -> `<has-aux>`.
    pub fn annotate_as_aux(&mut self) {
        for s in self.nonpast.iter_mut().chain(self.past.iter_mut()) {
            *s = format!("<{s}-aux>");
        }
    }

    /// `lemma \t pres_part \t past_part \t np1|..|np6 \t p1|..|p6`
    pub fn from_line(line: &str) -> Result<Self, String> {
        let pieces: Vec<&str> = line.split('\t').map(str::trim).collect();
        let [lemma, pres_part, past_part, nonpast, past] = pieces[..] else {
            return Err(format!("expected 5 tab separated fields, got {}", pieces.len()));
        };
        if lemma.is_empty() {
            return Err("empty lemma".into());
        }
        Ok(Self::new(
            lemma,
            pres_part,
            past_part,
            persons(nonpast)?,
            persons(past)?,
        ))
    }

    pub fn to_line(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}",
            self.lemma,
            self.pres_part,
            self.past_part,
            self.nonpast.join("|"),
            self.past.join("|")
        )
    }
}

fn persons(s: &str) -> Result<[String; NUM_PERSONS], String> {
    let forms: Vec<String> = s.split('|').map(str::to_string).collect();
    let n = forms.len();
    forms
        .try_into()
        .map_err(|_| format!("expected {NUM_PERSONS} `|` separated forms, got {n}"))
}

/// Reads one [`ConjugationSpec`] per line, skipping blank lines and `#` comments.
pub fn read_conjugation_specs(path: &Path) -> Result<Vec<ConjugationSpec>, InitError> {
    let text = fs::read_to_string(path).map_err(InitError::io(path))?;
    let mut specs = Vec::new();
    for (i, line) in text.lines().enumerate() {
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        let spec = ConjugationSpec::from_line(line).map_err(|reason| InitError::ConjugationLine {
            path: path.to_path_buf(),
            line: i + 1,
            reason,
        })?;
        specs.push(spec);
    }
    log::info!("[conjugation] read {} conjugation specs from {path:?}", specs.len());
    Ok(specs)
}
