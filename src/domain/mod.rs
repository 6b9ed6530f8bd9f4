//! Domain Layer
//!
//! Capability interfaces the engine is written against. The engine never
//! touches the file system, the stylesheet compiler or the change
//! notification backend directly; all of it goes through these ports.
//!
//! - `ports/` - Interface definitions for infrastructure

pub mod ports;
