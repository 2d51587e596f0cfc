pub mod history;
pub mod ids;
pub mod record;
