pub mod show_id;
pub mod show_status;
