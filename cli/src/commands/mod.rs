mod delete;
mod export;
mod helpers;
mod history;
mod import;
mod log;

pub(crate) use delete::{cmd_clear, cmd_delete};
pub(crate) use export::cmd_export;
pub(crate) use history::cmd_history;
pub(crate) use import::cmd_import;
pub(crate) use log::{cmd_log, cmd_show};
