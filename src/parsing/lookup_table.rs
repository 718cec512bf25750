use std::collections::{BTreeMap, BTreeSet};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    combinatorics::{collapse_to_wildcards, next_choose_one_from_each, Slot},
    errors::{InitError, VerbSayError},
    saying::VerbSayer,
    verb::{
        global_num_options, option_index, FlatField, ModalFlavor, RelativeContainment, VerbForm,
        VerbSayResult, VerbWithContext, VerbWithContextPattern, BOOL_CHOICES,
    },
};

/// Tuples said per parallel batch.
const BATCH_SIZE: usize = 100_000;
const PROGRESS_EVERY: usize = 1_000_000;

/// Option indices of `picks` within `choices`.
fn options_of<T: PartialEq>(choices: &[T], picks: &[T]) -> Vec<u8> {
    picks
        .iter()
        .filter_map(|p| option_index(choices, p))
        .collect()
}

/// One pass over a narrowed part of the feature space.
///
/// Overridden fields only range over the listed global options, so local
/// option `i` of such a field means global option `option2global[field][i]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LookupTableRound {
    num_options: Vec<u8>,
    option2global: Vec<Option<Vec<u8>>>,
}

impl LookupTableRound {
    pub fn new(
        global_num_options: &[u8],
        overrides: &[(FlatField, Vec<u8>)],
    ) -> Result<Self, InitError> {
        let mut num_options = global_num_options.to_vec();
        let mut option2global = vec![None; global_num_options.len()];
        for (field, options) in overrides {
            let i = field.index();
            num_options[i] = field.checked_count(options.len())?;
            option2global[i] = Some(options.clone());
        }
        Ok(Self {
            num_options,
            option2global,
        })
    }

    pub fn num_options(&self) -> &[u8] {
        &self.num_options
    }

    fn to_global(&self, selected: &[u8]) -> Vec<u8> {
        selected
            .iter()
            .zip(&self.option2global)
            .map(|(&option, map)| match map {
                Some(map) => map[option as usize],
                None => option,
            })
            .collect()
    }
}

/// What to enumerate for one table: its lemmas and its rounds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LookupTableConfig {
    global_num_options: Vec<u8>,
    lemmas: Vec<String>,
    rounds: Vec<LookupTableRound>,
}

impl LookupTableConfig {
    /// A finite round and a non-finite round, skipping the feature
    /// combinations each kind of verb rejects anyway.
    pub fn new(lemmas: Vec<String>, is_pro_verbs: &[bool]) -> Result<Self, InitError> {
        let global_num_options = global_num_options(lemmas.len())?;
        let is_pro_verbs = options_of(BOOL_CHOICES, is_pro_verbs);

        let finites = LookupTableRound::new(
            &global_num_options,
            &[
                (
                    FlatField::VerbForm,
                    options_of(VerbForm::CHOICES, &[VerbForm::Finite]),
                ),
                (FlatField::IsProVerb, is_pro_verbs.clone()),
            ],
        )?;

        let non_finites = LookupTableRound::new(
            &global_num_options,
            &[
                (
                    FlatField::Flavor,
                    options_of(ModalFlavor::CHOICES, &[ModalFlavor::Indicative]),
                ),
                (FlatField::IsCond, options_of(BOOL_CHOICES, &[false])),
                (
                    FlatField::VerbForm,
                    options_of(
                        VerbForm::CHOICES,
                        &[
                            VerbForm::BareInf,
                            VerbForm::ToInf,
                            VerbForm::Gerund,
                            VerbForm::SubjlessGerund,
                        ],
                    ),
                ),
                (FlatField::IsProVerb, is_pro_verbs),
                (FlatField::IsSplit, options_of(BOOL_CHOICES, &[false])),
                (
                    FlatField::RelativeCont,
                    options_of(RelativeContainment::CHOICES, &[RelativeContainment::No]),
                ),
            ],
        )?;

        Ok(Self {
            global_num_options,
            lemmas,
            rounds: vec![finites, non_finites],
        })
    }

    pub fn global_num_options(&self) -> &[u8] {
        &self.global_num_options
    }

    pub fn lemmas(&self) -> &[String] {
        &self.lemmas
    }

    pub fn rounds(&self) -> &[LookupTableRound] {
        &self.rounds
    }
}

/// Surface key to the (wildcarded) verbs that say it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LookupTable {
    key2vwcs: BTreeMap<String, Vec<VerbWithContextPattern>>,
}

impl LookupTable {
    /// Says every tuple of every round and groups them by what they sound like.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    pub fn generate(cfg: &LookupTableConfig, sayer: &VerbSayer) -> Self {
        let mut key2tuples: BTreeMap<String, BTreeSet<Vec<u8>>> = BTreeMap::new();
        let mut err2count: BTreeMap<VerbSayError, usize> = BTreeMap::new();
        let mut num_ok = 0;
        let mut count = 0;

        let mut say_batch = |batch: &[Vec<u8>]| {
            let said: Vec<Result<Vec<VerbSayResult>, VerbSayError>> = batch
                .par_iter()
                .map(|tuple| {
                    let vwc = VerbWithContext::from_flat(tuple, &cfg.lemmas)
                        .ok_or(VerbSayError::HasUnsetFields)?;
                    sayer.get_all_say_options(&vwc, usize::MAX)
                })
                .collect();
            for (tuple, result) in batch.iter().zip(said) {
                match result {
                    Ok(results) => {
                        num_ok += 1;
                        for r in results {
                            key2tuples.entry(r.to_key()).or_default().insert(tuple.clone());
                        }
                    }
                    Err(e) => *err2count.entry(e).or_default() += 1,
                }
            }
        };

        for round in &cfg.rounds {
            let mut selected = Vec::new();
            let mut batch = Vec::with_capacity(BATCH_SIZE);
            while next_choose_one_from_each(&round.num_options, &mut selected) {
                if count % PROGRESS_EVERY == 0 {
                    log::debug!("[lookup table] trying all verb possibilities, at #{count}");
                }
                count += 1;
                batch.push(round.to_global(&selected));
                if batch.len() == BATCH_SIZE {
                    say_batch(&batch);
                    batch.clear();
                }
            }
            say_batch(&batch);
        }

        log::debug!(
            "[lookup table] collapsing the tuples of {} keys",
            key2tuples.len()
        );
        let key2vwcs: BTreeMap<String, Vec<VerbWithContextPattern>> = key2tuples
            .into_par_iter()
            .map(|(key, tuples)| {
                let tuples = tuples
                    .into_iter()
                    .map(|t| t.into_iter().map(Slot::One).collect())
                    .collect();
                let vwcs = collapse_to_wildcards(&cfg.global_num_options, tuples)
                    .iter()
                    .filter_map(|t| VerbWithContextPattern::from_flat(t, &cfg.lemmas))
                    .collect();
                (key, vwcs)
            })
            .collect();

        log::info!(
            "[lookup table] {count} tuples: {num_ok} said, {} keys, {} generalized verbs",
            key2vwcs.len(),
            key2vwcs.values().map(Vec::len).sum::<usize>()
        );
        for (err, n) in &err2count {
            log::info!("[lookup table] {n}\t{err}");
        }

        Self { key2vwcs }
    }

    pub fn key2vwcs(&self) -> &BTreeMap<String, Vec<VerbWithContextPattern>> {
        &self.key2vwcs
    }

    pub fn matches(&self, key: &str) -> &[VerbWithContextPattern] {
        self.key2vwcs
            .get(key)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.key2vwcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.key2vwcs.is_empty()
    }
}

#[cfg(test)]
mod lookup_table_tests {
    use super::*;
    use crate::{
        test_utils::{walk_s3_present, MANAGER},
        verb::{Conjugation, Throol},
    };
    use pretty_assertions::assert_eq;

    #[test]
    fn rounds() {
        let cfg = LookupTableConfig::new(vec!["be".into()], &[false, true]).unwrap();
        assert_eq!(cfg.global_num_options(), &global_num_options(1).unwrap()[..]);
        let [finites, non_finites] = cfg.rounds() else {
            panic!("expected two rounds");
        };
        assert_eq!(finites.num_options()[FlatField::VerbForm.index()], 1);
        assert_eq!(finites.num_options()[FlatField::IsProVerb.index()], 2);
        assert_eq!(non_finites.num_options()[FlatField::VerbForm.index()], 4);
        assert_eq!(non_finites.num_options()[FlatField::Flavor.index()], 1);

        // local gerund (2) is global gerund (3)
        let mut selected = vec![0; FlatField::ALL.len()];
        selected[FlatField::VerbForm.index()] = 2;
        let global = non_finites.to_global(&selected);
        assert_eq!(global[FlatField::VerbForm.index()], 3);
        assert_eq!(global[FlatField::Flavor.index()], 0);
    }

    #[test]
    fn too_many_lemmas() {
        let lemmas = vec!["walk".to_string(); 256];
        assert!(matches!(
            LookupTableConfig::new(lemmas, &[false]),
            Err(InitError::TooManyOptions { count: 256, .. })
        ));
        let overrides = [(FlatField::Tense, vec![0; 300])];
        assert!(matches!(
            LookupTableRound::new(&global_num_options(1).unwrap(), &overrides),
            Err(InitError::TooManyOptions {
                field: FlatField::Tense,
                count: 300
            })
        ));
    }

    #[test]
    fn fir_holds_numbered_fields() {
        let fir = &MANAGER.parser().tables().fir;
        // S3 nonpast is field 5
        let vwcs = fir.matches("|5");
        let mut vwc = walk_s3_present();
        vwc.verb.lemma = "<ints>".into();
        assert!(vwcs.iter().any(|p| p.matches(&vwc)), "{vwcs:?}");

        // wildcarding kicks in for fields that don't change the words
        assert!(vwcs.iter().any(|p| p.sbj_handling.is_any()));
        assert!(fir.matches("no:such|key").is_empty());
    }

    #[test]
    fn to_be_is_generated_for_be() {
        let to_be = &MANAGER.parser().tables().to_be;
        let mut vwc = walk_s3_present();
        vwc.verb.lemma = "be".into();
        vwc.conj = Conjugation::S1;
        vwc.contract_not = Throol::True;
        assert!(to_be.matches("|am").iter().any(|p| p.matches(&vwc)));
        assert!(!to_be.is_empty());
    }
}
