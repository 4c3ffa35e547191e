//! Fingertip Device Session Port.
//!
//! This crate owns the boundary between the interaction engine and a live
//! device-automation session. It exposes the [`DeviceSession`] trait the
//! higher layers are written against, the WebDriver JSON wire types, and an
//! HTTP implementation bound to an already-created remote session.
//!
//! Session bootstrap (capability negotiation, credentials, device selection)
//! is caller glue and stays outside this crate: [`HttpDeviceSession::attach`]
//! takes the id of a session someone else created.

pub mod http;
pub mod session;
pub mod wire;

pub use http::{DriverConfig, HttpDeviceSession};
pub use session::{DeviceSession, DriverStatus};
