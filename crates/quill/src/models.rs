//! Objects passed between the view, the session manager and the model API.
//!
//! The Gemini wire format names the assistant side `model`; we keep that name
//! internally so conversion at the HTTP edge is a straight mapping.
pub mod message;
pub mod role;
