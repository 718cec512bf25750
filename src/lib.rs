pub mod combinatorics;
pub mod conjugation;
pub mod errors;
pub mod parsing;
pub mod saying;
pub mod settings;
pub mod surface;
pub mod table;
#[cfg(test)]
mod test_utils;
pub mod verb;

use std::sync::Arc;

use conjugation::{Conjugator, LemmaAndIndex};
use parsing::VerbParser;
use saying::VerbSayer;

pub use errors::{InitError, VerbSayError};
pub use settings::VerbManagerPaths;
pub use verb::{VerbSayResult, VerbWithContext, VerbWithContextPattern};

/// Says and parses English verbs.
///
/// Everything is read only once built, so one instance can be shared across
/// threads.
///
/// # Examples
/// ```no_run
/// use verb_engine::{VerbManager, VerbManagerPaths, VerbSayResult};
///
/// let verbs = VerbManager::new(&VerbManagerPaths::default()).unwrap();
/// let said = VerbSayResult::new(vec![], vec!["walked".into()]);
/// for vwc in verbs.parse(&said) {
///     println!("{}", serde_json::to_string(&vwc).unwrap());
/// }
/// ```
pub struct VerbManager {
    conjugator: Arc<Conjugator>,
    sayer: VerbSayer,
    parser: VerbParser,
}

impl VerbManager {
    /// Loads the conjugation and modality data, then loads the parse tables
    /// or generates them if `paths.verb_parses()` doesn't exist yet, which
    /// takes a while.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    pub fn new(paths: &VerbManagerPaths) -> Result<Self, InitError> {
        let conjugator = Arc::new(Conjugator::from_file(paths.conjugations())?);
        let sayer = VerbSayer::from_files(
            conjugator.clone(),
            paths.modalities(),
            paths.modal_past_tense(),
        )?;
        let parser =
            VerbParser::from_file_or_generate(conjugator.clone(), paths.verb_parses(), &sayer)?;
        Ok(Self {
            conjugator,
            sayer,
            parser,
        })
    }

    pub fn conjugator(&self) -> &Conjugator {
        &self.conjugator
    }

    pub fn sayer(&self) -> &VerbSayer {
        &self.sayer
    }

    pub fn parser(&self) -> &VerbParser {
        &self.parser
    }

    pub fn is_valid(&self, vwc: &VerbWithContext) -> bool {
        self.sayer.is_valid(vwc)
    }

    pub fn get_all_say_options(
        &self,
        vwc: &VerbWithContext,
        max_results: usize,
    ) -> Result<Vec<VerbSayResult>, VerbSayError> {
        self.sayer.get_all_say_options(vwc, max_results)
    }

    pub fn say(&self, vwc: &VerbWithContext) -> Result<VerbSayResult, VerbSayError> {
        self.sayer.say(vwc)
    }

    pub fn parse(&self, vsr: &VerbSayResult) -> Vec<VerbWithContextPattern> {
        self.parser.parse(vsr)
    }

    pub fn conjugate(&self, lemma: &str, field: usize) -> Result<String, VerbSayError> {
        self.conjugator.conjugate(lemma, field)
    }

    pub fn identify_word(&self, word: &str, picky: bool) -> Vec<LemmaAndIndex> {
        self.conjugator.identify_word(word, picky)
    }
}
