//! Platform - Infrastructure utilities shared by the domain crates
//!
//! - `crypto`: hashing, HMAC signing, random bytes, base64 helpers
//! - `password`: Argon2id password hashing with zeroized plaintext handling
//! - `storage`: media storage capability (local disk, object store behind
//!   the same trait)

pub mod crypto;
pub mod password;
pub mod storage;
