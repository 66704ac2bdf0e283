pub mod csv_io;
pub mod models;
pub mod slot;
pub mod store;
