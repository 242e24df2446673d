// @file: src/core/mod.rs
// @description: Exports domain data structures, error types and the data-source trait.
// @author: LAS.

pub mod models;
pub mod errors;
pub mod interfaces;
