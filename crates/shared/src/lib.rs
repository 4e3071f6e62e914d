pub mod domain;
pub mod error;
pub mod figure;
pub mod protocol;
