pub mod bindings;
pub mod controller;
pub mod presenter;
