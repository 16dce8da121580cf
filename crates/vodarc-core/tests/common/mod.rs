#![allow(dead_code)]

pub mod helix_server;
pub mod fixtures;
