use std::{
    collections::{BTreeSet, HashSet},
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
    sync::{Arc, LazyLock},
};

use fancy_regex::Regex;
use serde::{Deserialize, Serialize};

use super::lookup_table::{LookupTable, LookupTableConfig};
use crate::{
    conjugation::{Conjugator, LemmaAndIndex, FIELD_LEMMA, INTS_LEMMA},
    errors::InitError,
    saying::VerbSayer,
    verb::{VerbSayResult, VerbWithContextPattern},
};

/// Lemma-specific words the conjugator may be asked to decode.
static VERB_LIKE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-z]+$").unwrap());

fn is_verb_like(word: &str) -> bool {
    word == INTS_LEMMA || VERB_LIKE.is_match(word).unwrap_or(false)
}

/// `vsr` with its lemma-specific word blanked out.
fn deverbed(vsr: &VerbSayResult) -> Option<VerbSayResult> {
    let mut d = vsr.clone();
    d.verb_word_mut()?.clear();
    Some(d)
}

/// The three lookup tables parsing runs on, as persisted to disk.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedTables {
    /// "be" conjugates like nothing else.
    pub to_be: LookupTable,
    pub pro_verbs: LookupTable,
    /// Lemma agnostic: the lemma-specific word is written as its
    /// conjugation field index.
    pub fir: LookupTable,
}

impl PersistedTables {
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    pub fn generate(sayer: &VerbSayer) -> Result<Self, InitError> {
        log::info!("[verb parser] generating lookup tables");
        let to_be = LookupTable::generate(
            &LookupTableConfig::new(vec!["be".into()], &[false, true])?,
            sayer,
        );
        let pro_verbs = LookupTable::generate(
            &LookupTableConfig::new(vec!["see".into()], &[true])?,
            sayer,
        );
        let fir = LookupTable::generate(
            &LookupTableConfig::new(vec![INTS_LEMMA.into()], &[false])?,
            sayer,
        );
        Ok(Self {
            to_be,
            pro_verbs,
            fir,
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, InitError> {
        let file = File::open(path).map_err(InitError::io(path))?;
        serde_json::from_reader(BufReader::new(file)).map_err(|source| InitError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn write(&self, path: &Path) -> Result<(), InitError> {
        let file = File::create(path).map_err(InitError::io(path))?;
        serde_json::to_writer(BufWriter::new(file), self).map_err(|source| InitError::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Finds every [`VerbWithContext`](crate::verb::VerbWithContext) that could
/// have been said as a given set of words.
pub struct VerbParser {
    conjugator: Arc<Conjugator>,
    tables: PersistedTables,
    deverbed_keys: HashSet<String>,
}

impl VerbParser {
    pub fn new(conjugator: Arc<Conjugator>, tables: PersistedTables) -> Self {
        let deverbed_keys = tables
            .fir
            .key2vwcs()
            .keys()
            .filter_map(|key| VerbSayResult::from_key(key))
            .filter_map(|vsr| deverbed(&vsr))
            .map(|d| d.to_key())
            .collect();
        log::info!(
            "[verb parser] loaded {} 'to be' keys, {} pro-verb keys and {} field index keys",
            tables.to_be.len(),
            tables.pro_verbs.len(),
            tables.fir.len()
        );
        Self {
            conjugator,
            tables,
            deverbed_keys,
        }
    }

    /// Loads the tables from `path`, or generates them with `sayer` and writes
    /// them there if the file doesn't exist yet.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    pub fn from_file_or_generate(
        conjugator: Arc<Conjugator>,
        path: &Path,
        sayer: &VerbSayer,
    ) -> Result<Self, InitError> {
        let tables = if path.exists() {
            log::info!("[verb parser] loading lookup tables from {path:?}");
            PersistedTables::from_file(path)?
        } else {
            log::info!("[verb parser] {path:?} does not exist, regenerating");
            let tables = PersistedTables::generate(sayer)?;
            tables.write(path)?;
            tables
        };
        Ok(Self::new(conjugator, tables))
    }

    pub fn tables(&self) -> &PersistedTables {
        &self.tables
    }

    /// Field indices `word` may stand at. An unknown lemma is never its own
    /// field 0 candidate, but still says its base form after modals, "do"
    /// and "to".
    fn fir_candidates(&self, word: &str) -> BTreeSet<LemmaAndIndex> {
        let mut candidates = BTreeSet::new();
        for li in self.conjugator.identify_word(word, true) {
            if li.lemma == word {
                candidates.insert(LemmaAndIndex::new(word, FIELD_LEMMA));
            }
            candidates.insert(li);
        }
        candidates
    }

    fn append_fir_matches(&self, vsr: &VerbSayResult, out: &mut Vec<VerbWithContextPattern>) {
        let Some(word) = vsr.verb_word() else {
            return;
        };
        // nothing in generation vouched for this word
        if !is_verb_like(word) {
            return;
        }
        let Some(mut deverbed) = deverbed(vsr) else {
            return;
        };
        if !self.deverbed_keys.contains(&deverbed.to_key()) {
            return;
        }

        for li in self.fir_candidates(word) {
            if let Some(w) = deverbed.verb_word_mut() {
                *w = li.index.to_string();
            }
            for vwc in self.tables.fir.matches(&deverbed.to_key()) {
                let mut vwc = vwc.clone();
                vwc.set_lemma(li.lemma.as_str());
                out.push(vwc);
            }
        }
    }

    /// Never fails; words that can't be a verb give no candidates.
    pub fn parse(&self, vsr: &VerbSayResult) -> Vec<VerbWithContextPattern> {
        let key = vsr.to_key();
        log::debug!("[verb parser] parsing key {key:?}");
        let mut out = Vec::new();
        out.extend_from_slice(self.tables.to_be.matches(&key));
        out.extend_from_slice(self.tables.pro_verbs.matches(&key));
        self.append_fir_matches(vsr, &mut out);
        out
    }
}

#[cfg(test)]
mod parser_tests {
    use super::*;
    use crate::{
        test_utils::{walk_s3_present, MANAGER},
        verb::{Conjugation, ModalFlavor, Tense, Throol, VerbForm, VerbWithContext},
    };
    use pretty_assertions::assert_eq;

    fn words(ws: &[&str]) -> Vec<String> {
        ws.iter().map(|w| w.to_string()).collect()
    }

    fn parse(pre: &[&str], main: &[&str]) -> Vec<VerbWithContextPattern> {
        MANAGER
            .parser()
            .parse(&VerbSayResult::new(words(pre), words(main)))
    }

    fn any_matches(found: &[VerbWithContextPattern], vwc: &VerbWithContext) -> bool {
        found.iter().any(|p| p.matches(vwc))
    }

    fn assert_parses_back(vwc: &VerbWithContext) {
        let options = MANAGER.get_all_say_options(vwc, usize::MAX).unwrap();
        assert!(!options.is_empty());
        for said in options {
            assert!(
                any_matches(&MANAGER.parse(&said), vwc),
                "{said:?} did not parse back to {vwc:?}"
            );
        }
    }

    #[test]
    fn verb_like() {
        assert!(is_verb_like("walked"));
        assert!(is_verb_like(INTS_LEMMA));
        assert!(!is_verb_like("<has-aux>"));
        assert!(!is_verb_like("Walked"));
        assert!(!is_verb_like(""));
    }

    #[test]
    fn deverbing() {
        let vsr = VerbSayResult::new(words(&["did"]), words(&["not", "walk"]));
        assert_eq!(deverbed(&vsr).unwrap().to_key(), "did|not:");
        let vsr = VerbSayResult::new(words(&["walk"]), vec![]);
        assert_eq!(deverbed(&vsr).unwrap().to_key(), "|");
        let vsr = VerbSayResult::new(vec![], words(&["walked", "not"]));
        assert_eq!(deverbed(&vsr).unwrap().to_key(), "|:not");
        let vsr = VerbSayResult::new(words(&["walked"]), words(&["not"]));
        assert_eq!(deverbed(&vsr).unwrap().to_key(), "|not");
        assert_eq!(deverbed(&VerbSayResult::default()), None);
        assert_eq!(deverbed(&VerbSayResult::new(vec![], words(&["not"]))), None);
    }

    #[test]
    fn parses_walks() {
        let found = parse(&[], &["walks"]);
        assert!(any_matches(&found, &walk_s3_present()));
        let walk = "walk".to_string();
        assert!(found.iter().all(|p| p.verb.lemma.matches(&walk)), "{found:?}");
    }

    #[test]
    fn parses_split_negative() {
        let mut vwc = walk_s3_present();
        vwc.verb.polarity.tf = false;
        vwc.is_split = true;
        vwc.contract_not = Throol::True;
        vwc.verb.tense = Tense::Past;
        let found = parse(&["did", "not"], &["walk"]);
        assert!(any_matches(&found, &vwc));
    }

    #[test]
    fn parses_negative_counterfactuals() {
        // "if she *walked not*"
        let mut vwc = walk_s3_present();
        vwc.verb.modality.flavor = ModalFlavor::SubjunctiveCf;
        vwc.verb.polarity.tf = false;
        assert!(any_matches(&parse(&[], &["walked", "not"]), &vwc));
        assert_parses_back(&vwc);

        // "*walked not* she ..."
        vwc.is_split = true;
        vwc.contract_not = Throol::True;
        assert!(any_matches(&parse(&["walked", "not"], &[]), &vwc));
        assert_parses_back(&vwc);

        // "*walked* she *not* ..."
        vwc.contract_not = Throol::False;
        assert!(any_matches(&parse(&["walked"], &["not"]), &vwc));
        assert_parses_back(&vwc);

        vwc.verb.lemma = "go".into();
        assert!(any_matches(&parse(&["went"], &["not"]), &vwc));
    }

    #[test]
    fn parses_base_forms_of_unknown_lemmas() {
        assert!(!MANAGER.conjugator().is_known_lemma("grab"));
        let grab = || {
            let mut vwc = walk_s3_present();
            vwc.verb.lemma = "grab".into();
            vwc
        };

        let mut vwc = grab();
        vwc.verb.tense = Tense::Future;
        assert!(any_matches(&parse(&[], &["will", "grab"]), &vwc));
        assert_parses_back(&vwc);

        let mut vwc = grab();
        vwc.verb.modality.flavor = ModalFlavor::Necessity;
        vwc.verb.polarity.tf = false;
        assert!(any_matches(&parse(&[], &["must", "not", "grab"]), &vwc));
        assert_parses_back(&vwc);

        let mut vwc = grab();
        vwc.is_split = true;
        assert!(any_matches(&parse(&["does"], &["grab"]), &vwc));
        assert_parses_back(&vwc);

        let mut vwc = grab();
        vwc.verb.modality.flavor = ModalFlavor::Imperative;
        vwc.conj = Conjugation::S2;
        assert!(any_matches(&parse(&[], &["grab"]), &vwc));
        vwc.is_split = true;
        assert_parses_back(&vwc);

        let mut vwc = grab();
        vwc.verb.modality.flavor = ModalFlavor::SubjunctiveImp;
        assert_parses_back(&vwc);

        for verb_form in [VerbForm::BareInf, VerbForm::ToInf] {
            let mut vwc = grab();
            vwc.verb.verb_form = verb_form;
            assert_parses_back(&vwc);
        }
        let mut vwc = grab();
        vwc.verb.verb_form = VerbForm::ToInf;
        assert!(any_matches(&parse(&[], &["to", "grab"]), &vwc));

        // inflected forms were always found
        let mut vwc = grab();
        vwc.verb.tense = Tense::Past;
        assert_parses_back(&vwc);
    }

    #[test]
    fn parses_irregulars() {
        let mut vwc = walk_s3_present();
        vwc.verb.lemma = "go".into();
        vwc.verb.tense = Tense::Past;
        assert!(any_matches(&parse(&[], &["went"]), &vwc));

        let mut vwc = walk_s3_present();
        vwc.verb.lemma = "be".into();
        assert!(any_matches(&parse(&[], &["is"]), &vwc));
    }

    #[test]
    fn parses_pro_verbs() {
        let mut vwc = walk_s3_present();
        vwc.verb.lemma = "see".into();
        vwc.verb.is_pro_verb = true;
        assert!(any_matches(&parse(&[], &["<does-pv>"]), &vwc));
    }

    #[test]
    fn rejects_nonsense() {
        assert!(parse(&[], &["Walks"]).is_empty());
        assert!(parse(&["not"], &["not", "walk"]).is_empty());
        assert!(parse(&[], &[]).is_empty());
    }
}
