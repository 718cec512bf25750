use serde::{Deserialize, Serialize};

/// Declares a closed verb feature enum whose last variant is the "unset"
/// sentinel, along with its string names and its ordered option list.
macro_rules! verb_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $s:literal,)+
            @unset $unset:ident => $us:literal $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $s)]
                $variant,
            )+
            #[default]
            #[serde(rename = $us)]
            $unset,
        }

        impl $name {
            /// Every settable value, in option order.
            pub const CHOICES: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $s,)+
                    $name::$unset => $us,
                }
            }

            pub fn is_unset(self) -> bool {
                self == $name::$unset
            }

            /// Position within [`Self::CHOICES`], `None` when unset.
            pub fn choice_index(self) -> Option<usize> {
                Self::CHOICES.iter().position(|&c| c == self)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok($name::$variant),)+
                    $us => Ok($name::$unset),
                    _ => Err(format!(concat!("unknown ", stringify!($name), ": `{}`"), s)),
                }
            }
        }
    };
}

verb_enum! {
    /// Three valued boolean.
    pub enum Throol {
        False => "FALSE",
        True => "TRUE",
        @unset Unknown => "UNKNOWN",
    }
}

impl Throol {
    pub fn is_true(self) -> bool {
        self == Throol::True
    }
}

impl From<bool> for Throol {
    fn from(b: bool) -> Self {
        if b {
            Throol::True
        } else {
            Throol::False
        }
    }
}

verb_enum! {
    pub enum Tense {
        Past => "PAST",
        Present => "PRESENT",
        Future => "FUTURE",
        @unset Unknown => "UNKNOWN",
    }
}

verb_enum! {
    /// What kind of modality the verb carries, realized either as a mood or
    /// as a modal word.
    pub enum ModalFlavor {
        Indicative => "INDICATIVE",
        /// Counterfactual, "if he *were* here".
        SubjunctiveCf => "SUBJUNCTIVE_CF",
        Deductive => "DEDUCTIVE",
        AlmostCertain => "ALMOST_CERTAIN",
        Probable => "PROBABLE",
        Possible => "POSSIBLE",
        Imperative => "IMPERATIVE",
        /// Mandative, "I insist that he *be* here".
        SubjunctiveImp => "SUBJUNCTIVE_IMP",
        Ability => "ABILITY",
        Permissive => "PERMISSIVE",
        Normative => "NORMATIVE",
        Necessity => "NECESSITY",
        @unset Unknown => "UNKNOWN",
    }
}

verb_enum! {
    pub enum VerbForm {
        Finite => "FINITE",
        BareInf => "BARE_INF",
        ToInf => "TO_INF",
        Gerund => "GERUND",
        SubjlessGerund => "SUBJLESS_GERUND",
        @unset Unknown => "UNKNOWN",
    }
}

impl VerbForm {
    pub fn is_finite(self) -> bool {
        self == VerbForm::Finite
    }
}

verb_enum! {
    pub enum Voice {
        Active => "ACTIVE",
        Passive => "PASSIVE",
        @unset Unknown => "UNKNOWN",
    }
}

verb_enum! {
    /// Person and number of the subject.
    pub enum Conjugation {
        S1 => "S1",
        S2 => "S2",
        S3 => "S3",
        P1 => "P1",
        P2 => "P2",
        P3 => "P3",
        @unset Unknown => "UNKNOWN",
    }
}

verb_enum! {
    /// Whether the verb sits inside a relative clause, and if so whether the
    /// relative pronoun was dropped.
    pub enum RelativeContainment {
        /// "the dog *seen* by me", "the dog I saw"
        Zero => "ZERO",
        /// "the dog *that* I saw"
        Word => "WORD",
        No => "NO",
        @unset Unknown => "UNKNOWN",
    }
}

verb_enum! {
    /// "if I were" vs. the colloquial "if I was".
    pub enum SubjunctiveHandling {
        WereSbj => "WERE_SBJ",
        WasSbj => "WAS_SBJ",
        @unset Unknown => "UNKNOWN",
    }
}
