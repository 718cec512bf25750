use std::{
    path::{Path, PathBuf},
    sync::{Arc, LazyLock},
};
use tempfile::{tempdir, TempDir};

use crate::{
    conjugation::Conjugator,
    saying::VerbSayer,
    settings::{VerbManagerPaths, VERB_PARSES_FILE},
    surface::SurfaceVerbSayer,
    verb::{
        Aspect, Conjugation, ModalFlavor, Modality, Polarity, RelativeContainment,
        SubjunctiveHandling, Tense, Throol, Verb, VerbForm, VerbWithContext, Voice,
    },
    VerbManager,
};

pub(crate) fn data_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data").join(name)
}

/// Generated tables go here so tests never touch the shipped ones.
static TABLES_DIR: LazyLock<TempDir> = LazyLock::new(|| tempdir().unwrap());

pub(crate) static TEST_PATHS: LazyLock<VerbManagerPaths> = LazyLock::new(|| {
    let mut paths = VerbManagerPaths::from_data_dir(data_path(""));
    paths.set_verb_parses(TABLES_DIR.path().join(VERB_PARSES_FILE));
    paths
});

pub(crate) static CONJUGATOR: LazyLock<Arc<Conjugator>> = LazyLock::new(|| {
    Arc::new(Conjugator::from_file(TEST_PATHS.conjugations()).unwrap())
});

pub(crate) static SURFACE_SAYER: LazyLock<SurfaceVerbSayer> = LazyLock::new(|| {
    SurfaceVerbSayer::from_file(CONJUGATOR.clone(), TEST_PATHS.modal_past_tense()).unwrap()
});

pub(crate) static VERB_SAYER: LazyLock<VerbSayer> = LazyLock::new(|| {
    VerbSayer::from_files(
        CONJUGATOR.clone(),
        TEST_PATHS.modalities(),
        TEST_PATHS.modal_past_tense(),
    )
    .unwrap()
});

/// Generates the lookup tables on first use, which takes a few seconds.
pub(crate) static MANAGER: LazyLock<VerbManager> =
    LazyLock::new(|| VerbManager::new(&TEST_PATHS).unwrap());

/// "she *walks*"
pub(crate) fn walk_s3_present() -> VerbWithContext {
    VerbWithContext {
        verb: Verb {
            lemma: "walk".into(),
            polarity: Polarity {
                tf: true,
                is_contrary: Throol::False,
            },
            tense: Tense::Present,
            aspect: Aspect {
                is_perf: false,
                is_prog: false,
            },
            modality: Modality {
                flavor: ModalFlavor::Indicative,
                is_cond: false,
            },
            verb_form: VerbForm::Finite,
            is_pro_verb: false,
        },
        voice: Voice::Active,
        conj: Conjugation::S3,
        is_split: false,
        relative_cont: RelativeContainment::No,
        contract_not: Throol::False,
        split_inf: Throol::False,
        sbj_handling: SubjunctiveHandling::WereSbj,
    }
}
