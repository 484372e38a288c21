pub mod photographer;

pub use photographer::{ImageUpdate, NewPhotographer, Photographer, PhotographerForm};
