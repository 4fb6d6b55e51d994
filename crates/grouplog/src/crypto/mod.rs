//! Cryptographic helpers for grouplog.
//!
//! This module provides:
//! - Ed25519 key pairs and fallible raw public-key validation
//! - Hex-encoded Ed25519 signatures
//! - HKDF-SHA256 derivation of group keys from a shared seed
//! - Cryptographically secure random seeds

pub mod derivation;
pub mod keys;
pub mod random;
pub mod signing;
