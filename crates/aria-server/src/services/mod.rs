//! Server-side services shared by the route handlers.

pub mod registry;

pub use registry::AgentRegistry;
