use std::path::{Path, PathBuf};

use getset::{Getters, MutGetters, Setters};
use serde::{Deserialize, Serialize};

pub const CONJUGATIONS_FILE: &str = "conjugations.tsv";
pub const MODAL_PAST_TENSE_FILE: &str = "modal_past_tense.txt";
pub const MODALITIES_FILE: &str = "modalities.txt";
pub const VERB_PARSES_FILE: &str = "verb_parses.json";

/// Where a [`VerbManager`](crate::VerbManager) reads its data from.
///
/// `verb_parses` is written on first start if it doesn't exist.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Getters, MutGetters, Setters)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct VerbManagerPaths {
    conjugations: PathBuf,
    modal_past_tense: PathBuf,
    modalities: PathBuf,
    verb_parses: PathBuf,
}

impl VerbManagerPaths {
    /// The conventional file names inside `dir`.
    pub fn from_data_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            conjugations: dir.join(CONJUGATIONS_FILE),
            modal_past_tense: dir.join(MODAL_PAST_TENSE_FILE),
            modalities: dir.join(MODALITIES_FILE),
            verb_parses: dir.join(VERB_PARSES_FILE),
        }
    }
}

impl Default for VerbManagerPaths {
    /// The crate's own `data/` directory.
    fn default() -> Self {
        Self::from_data_dir(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }
}
