//! Small building blocks shared by dialogs and panels.
mod fields;

pub use fields::{input_style, FieldLabel, IntegerField};
