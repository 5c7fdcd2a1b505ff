//! Client-side state shared across screens.
//!
//! DESIGN
//! ======
//! The bearer token is the only state that outlives a screen, so it is the
//! only module here.

pub mod session;
