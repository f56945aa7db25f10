// Shared helpers for the block decoders

pub mod encoding;
pub mod io;
