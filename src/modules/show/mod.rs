pub mod domain;

pub use domain::{Show, ShowId, ShowStatus};
