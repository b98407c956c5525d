// src/parts/systems/logic/mod.rs
pub mod filters;
pub mod imported;
pub mod search;
pub mod selection;
