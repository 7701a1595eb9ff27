pub mod entities;
pub mod value_objects;

pub use entities::show::Show;
pub use value_objects::{show_id::ShowId, show_status::ShowStatus};
