mod converter;
mod sayer;
mod surface_verb;

pub use converter::{ModalPast, ModalPastTenseConverter, SurfaceVerbConverter};
pub use sayer::SurfaceVerbSayer;
pub use surface_verb::{Mood, SurfaceTense, SurfaceVerb, SurfaceVerbForm, SurfaceVoice, Whether};
