//! Tests driving the outpost through its entry points

pub mod helpers;
