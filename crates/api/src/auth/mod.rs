//! Identity-provider token handling.
//!
//! - [`jwt`] -- HS256 bearer-token validation (and issuance, for tests and
//!   local tooling).

pub mod jwt;
