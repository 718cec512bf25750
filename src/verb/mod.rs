mod enums;
mod flat;
mod model;
mod pattern;
mod say_result;

pub use enums::{
    Conjugation, ModalFlavor, RelativeContainment, SubjunctiveHandling, Tense, Throol, VerbForm,
    Voice,
};
pub use flat::{global_num_options, option_index, FlatField, BOOL_CHOICES, NUM_FLAT_FIELDS};
pub use model::{Aspect, Modality, Polarity, Verb, VerbWithContext};
pub use pattern::{
    AspectPattern, ModalityPattern, PolarityPattern, VerbPattern, VerbWithContextPattern,
};
pub use say_result::VerbSayResult;
