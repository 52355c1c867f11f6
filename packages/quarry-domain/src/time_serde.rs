//! RFC 3339 `serde(with = ...)` helpers for wire timestamps.

pub mod option;
