pub mod models;
pub mod notice;
pub mod secret_serde;
pub mod validation;
