#![allow(clippy::module_inception)]
pub mod alphabets;
pub mod generator;
