pub mod id;
pub mod seed;
pub mod track;
