pub mod archive;
pub mod datetime;
pub mod instrument;
pub mod persistence;
