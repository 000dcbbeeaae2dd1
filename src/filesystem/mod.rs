pub mod clipboard;
pub mod secure;
