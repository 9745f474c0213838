// API boundary: the trait the rest of the crate programs against,
// plus the REST implementation that talks to the backend.

pub mod rest;
pub mod traits;
