#![forbid(unsafe_code)]

pub mod objects;
