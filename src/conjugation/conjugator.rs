use std::{
    cmp::Reverse,
    collections::{HashMap, HashSet},
    path::Path,
};

use getset::Getters;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{
    spec::{read_conjugation_specs, ConjugationSpec, FIELD_LEMMA, NUM_FIELDS, NUM_PERSONS},
    suffix_transform::SuffixTransform,
    suffix_tree::GeneralizingSuffixTree,
};
use crate::errors::{InitError, VerbSayError};

/// Placeholder lemma whose every field renders as its own field index, used
/// to build lookup tables that work for any lemma.
pub const INTS_LEMMA: &str = "<ints>";

const AUX_SUFFIX: &str = "-aux>";

/// A lemma plus the [`ConjugationSpec`] field a word was found at.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LemmaAndIndex {
    pub lemma: String,
    pub index: usize,
}

impl LemmaAndIndex {
    pub fn new(lemma: impl Into<String>, index: usize) -> Self {
        Self {
            lemma: lemma.into(),
            index,
        }
    }
}

/// How to get fields `1..=14` of a [`ConjugationSpec`] out of a lemma.
///
/// Verbs that conjugate alike share one.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ConjSpecDerivation {
    transforms: Vec<SuffixTransform>,
}

impl ConjSpecDerivation {
    /// `cache` maps (lemma, form) to the edit between them.
    fn from_spec(
        spec: &ConjugationSpec,
        cache: &mut HashMap<(String, String), SuffixTransform>,
    ) -> Self {
        let lemma = spec.lemma();
        let transforms = spec
            .inflections()
            .map(|form| {
                cache
                    .entry((lemma.clone(), form.to_string()))
                    .or_insert_with(|| SuffixTransform::derive(lemma, form))
                    .clone()
            })
            .collect();
        Self { transforms }
    }

    pub fn transforms(&self) -> &[SuffixTransform] {
        &self.transforms
    }

    /// Renders field `index` (`1..=14`) of `lemma`.
    pub fn conjugate(&self, lemma: &str, index: usize) -> Option<String> {
        if index == FIELD_LEMMA {
            return Some(lemma.to_string());
        }
        self.transforms.get(index - 1)?.transform(lemma)
    }

    pub fn derive(&self, lemma: &str) -> Option<ConjugationSpec> {
        let forms = self
            .transforms
            .iter()
            .map(|t| t.transform(lemma))
            .collect::<Option<Vec<String>>>()?;
        let (parts, finite) = forms.split_at(2);
        let (nonpast, past) = finite.split_at(NUM_PERSONS);
        Some(ConjugationSpec::new(
            lemma,
            parts[0].clone(),
            parts[1].clone(),
            nonpast.to_vec().try_into().ok()?,
            past.to_vec().try_into().ok()?,
        ))
    }

    /// Every (lemma, field) this derivation could have turned into `word`.
    pub fn identify_word(&self, word: &str) -> Vec<LemmaAndIndex> {
        self.transforms
            .iter()
            .enumerate()
            .filter_map(|(i, t)| Some(LemmaAndIndex::new(t.reverse(word)?, i + 1)))
            .collect()
    }
}

/// Conjugates any verb, forwards and backwards, by generalizing from a list
/// of fully spelled out verbs.
#[derive(Getters)]
pub struct Conjugator {
    /// Most shared first.
    #[getset(get = "pub")]
    derivations: Vec<ConjSpecDerivation>,
    lemma2derivation: HashMap<String, usize>,
    suffix_tree: GeneralizingSuffixTree<usize>,

    #[getset(get = "pub")]
    to_be: ConjugationSpec,
    /// Finite forms are marked `<has-aux>` etc.
    #[getset(get = "pub")]
    to_have: ConjugationSpec,
    #[getset(get = "pub")]
    to_do: ConjugationSpec,
}

impl Conjugator {
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    pub fn new(specs: &[ConjugationSpec]) -> Result<Self, InitError> {
        if specs.is_empty() {
            return Err(InitError::NoConjugations);
        }

        // group lemmas by how they conjugate, keeping first seen order
        let mut cache = HashMap::new();
        let mut seen = HashSet::new();
        let mut deriv2lemmas: IndexMap<ConjSpecDerivation, Vec<&str>> = IndexMap::new();
        for spec in specs {
            if !seen.insert(spec.lemma().as_str()) {
                continue;
            }
            let deriv = ConjSpecDerivation::from_spec(spec, &mut cache);
            deriv2lemmas.entry(deriv).or_default().push(spec.lemma());
        }
        log::info!(
            "[conjugator] {} lemmas conjugate {} distinct ways",
            seen.len(),
            deriv2lemmas.len()
        );

        // lower index wins ties in the suffix tree, so the commonest go first
        let mut order: Vec<usize> = (0..deriv2lemmas.len()).collect();
        order.sort_by_key(|&i| Reverse(deriv2lemmas[i].len()));

        let mut derivations = Vec::with_capacity(order.len());
        let mut lemma2derivation = HashMap::new();
        for (x, &i) in order.iter().enumerate() {
            let Some((deriv, lemmas)) = deriv2lemmas.get_index(i) else {
                continue;
            };
            derivations.push(deriv.clone());
            for &lemma in lemmas {
                lemma2derivation.insert(lemma.to_string(), x);
            }
        }

        let suffix_tree = GeneralizingSuffixTree::new(
            lemma2derivation
                .iter()
                .map(|(lemma, &x)| (lemma.as_str(), x)),
        );

        let mut conjugator = Self {
            derivations,
            lemma2derivation,
            suffix_tree,
            to_be: ConjugationSpec::default(),
            to_have: ConjugationSpec::default(),
            to_do: ConjugationSpec::default(),
        };
        conjugator.to_be = conjugator.create_verb_spec("be")?;
        conjugator.to_have = conjugator.create_verb_spec("have")?;
        conjugator.to_have.annotate_as_aux();
        conjugator.to_do = conjugator.create_verb_spec("do")?;
        Ok(conjugator)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, InitError> {
        let specs = read_conjugation_specs(path.as_ref())?;
        Self::new(&specs)
    }

    pub fn is_known_lemma(&self, lemma: &str) -> bool {
        self.lemma2derivation.contains_key(lemma)
    }

    pub fn lemmas(&self) -> impl Iterator<Item = &str> {
        self.lemma2derivation.keys().map(String::as_str)
    }

    fn derivation_index(&self, lemma: &str) -> Option<usize> {
        match self.lemma2derivation.get(lemma) {
            Some(&x) => Some(x),
            None => self.suffix_tree.get(lemma).copied(),
        }
    }

    fn derivation(&self, lemma: &str) -> Result<&ConjSpecDerivation, VerbSayError> {
        self.derivation_index(lemma)
            .and_then(|x| self.derivations.get(x))
            .ok_or_else(|| VerbSayError::UnconjugatableLemma(lemma.to_string()))
    }

    /// Every form of `lemma`, guessed from similar verbs if it isn't on file.
    pub fn create_verb_spec(&self, lemma: &str) -> Result<ConjugationSpec, VerbSayError> {
        if lemma == INTS_LEMMA {
            let field = |i: usize| i.to_string();
            return Ok(ConjugationSpec::new(
                field(0),
                field(1),
                field(2),
                std::array::from_fn(|i| field(3 + i)),
                std::array::from_fn(|i| field(3 + NUM_PERSONS + i)),
            ));
        }
        self.derivation(lemma)?
            .derive(lemma)
            .ok_or_else(|| VerbSayError::UnconjugatableLemma(lemma.to_string()))
    }

    /// Renders one field of `lemma`; see [`ConjugationSpec::field`].
    ///
    /// Field 0 is the lemma itself, which is how words that are never
    /// conjugated ("not", "to", modals) pass through.
    pub fn conjugate(&self, lemma: &str, field: usize) -> Result<String, VerbSayError> {
        if lemma == INTS_LEMMA && field < NUM_FIELDS {
            return Ok(field.to_string());
        }
        if field == FIELD_LEMMA {
            return Ok(lemma.to_string());
        }
        self.derivation(lemma)?
            .conjugate(lemma, field)
            .ok_or_else(|| VerbSayError::UnconjugatableLemma(lemma.to_string()))
    }

    /// Every (lemma, field) that could have produced `word`, "bakes" ->
    /// `[("bake", 5)]`.
    ///
    /// A decoding only counts if the decoded lemma would itself conjugate the
    /// way it was decoded. When `picky`, decodings to lemmas on file crowd out
    /// the rest. `word` itself is offered as a lemma (field 0) if it is on
    /// file, or if not `picky` and nothing else was found.
    pub fn identify_word(&self, word: &str, picky: bool) -> Vec<LemmaAndIndex> {
        if word.ends_with(AUX_SUFFIX) {
            return Vec::new();
        }

        let mut found: Vec<LemmaAndIndex> = Vec::new();
        for (x, deriv) in self.derivations.iter().enumerate() {
            for li in deriv.identify_word(word) {
                if self.derivation_index(&li.lemma) == Some(x) {
                    found.push(li);
                }
            }
        }

        if picky && found.iter().any(|li| self.is_known_lemma(&li.lemma)) {
            found.retain(|li| self.is_known_lemma(&li.lemma));
        }

        if self.is_known_lemma(word) || (!picky && found.is_empty()) {
            found.push(LemmaAndIndex::new(word, FIELD_LEMMA));
        }
        found
    }
}
