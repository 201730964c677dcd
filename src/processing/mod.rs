pub mod downsampling;
pub mod validity;
