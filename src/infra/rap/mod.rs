pub mod client;

pub use client::{decode_saved, RapClient, CREATE_PATH, UPDATE_PATH};
