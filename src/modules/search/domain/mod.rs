pub mod category;
pub mod derivation;
pub mod filter_state;
