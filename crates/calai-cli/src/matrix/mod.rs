pub mod compute;
pub mod history;
