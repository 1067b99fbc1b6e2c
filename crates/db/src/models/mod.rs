//! Row structs and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` struct matching the
//! table row, plus `Deserialize` create DTOs where rows are inserted from
//! outside the engine.

pub mod attendance;
pub mod bill_configuration;
pub mod hostel;
pub mod mess;
pub mod operating_days;
pub mod setting;
pub mod student;
