pub mod myers_diff;
pub mod side;
pub mod string_builder;
