pub mod boundary;
pub mod cursor;
pub mod region;
