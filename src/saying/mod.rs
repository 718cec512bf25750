mod converter;
mod sayer;

pub use converter::{ModalitiesTable, MoodAndModal, MoodModalTense, VerbConverter};
pub use sayer::VerbSayer;
