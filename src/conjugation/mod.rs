mod conjugator;
mod spec;
mod suffix_transform;
mod suffix_tree;

pub use conjugator::{ConjSpecDerivation, Conjugator, LemmaAndIndex, INTS_LEMMA};
pub use spec::{
    nonpast_field, past_field, read_conjugation_specs, ConjugationSpec, FIELD_LEMMA,
    FIELD_PAST_PART, FIELD_PRES_PART, NUM_FIELDS, NUM_PERSONS,
};
pub use suffix_transform::SuffixTransform;
pub use suffix_tree::GeneralizingSuffixTree;
