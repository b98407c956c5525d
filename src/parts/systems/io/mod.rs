// src/parts/systems/io/mod.rs
pub mod load;
pub mod parsers;
pub mod startup;
