//! Wire types shared between the admin console and the admin REST API.

pub mod shared;
pub mod system;
