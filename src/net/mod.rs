//! Networking modules for the authentication REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` is the transport seam (a trait plus the reqwest implementation),
//! `api` maps the three auth endpoints onto it, and `types` defines the wire
//! schema validated at the boundary.

pub mod api;
pub mod http;
pub mod types;
