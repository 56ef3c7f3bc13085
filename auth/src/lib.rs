//! # auth
//!
//! Authentication for the Zube API client:
//! - Credential loading (client id + RSA private key)
//! - Signed assertion minting (RS256 JWT with `iat`/`exp`/`iss`)
//! - Access token caching with serialized refresh
//!
//! ## Usage
//!
//! ```rust,ignore
//! use auth::{
//!     credentials::{Credential, Signer},
//!     token::{TokenCache, TokenExchange},
//! };
//! ```

pub mod credentials;
pub mod error;
pub mod token;

// Re-export commonly used types
pub use error::{Error, ErrorKind};
