//! Fixed domain tables

pub mod cities;
