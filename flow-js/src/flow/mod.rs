pub mod context;
pub mod info;
