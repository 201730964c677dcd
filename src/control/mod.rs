pub mod interaction;
pub mod navigator;
pub mod session;
