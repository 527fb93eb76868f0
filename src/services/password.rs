// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Password hashing (PBKDF2-HMAC-SHA256).

use base64::{engine::general_purpose::STANDARD, Engine as _};
use ring::rand::{SecureRandom, SystemRandom};
use ring::{digest, pbkdf2};
use std::num::NonZeroU32;

use crate::models::StoredPassword;

const ITERATIONS: u32 = 100_000;
const SALT_LEN: usize = 16;
const HASH_LEN: usize = digest::SHA256_OUTPUT_LEN;

static ALGORITHM: pbkdf2::Algorithm = pbkdf2::PBKDF2_HMAC_SHA256;

fn iterations() -> NonZeroU32 {
    NonZeroU32::new(ITERATIONS).unwrap_or(NonZeroU32::MIN)
}

/// Hash a password with a fresh random salt.
pub fn hash_password(password: &str) -> anyhow::Result<StoredPassword> {
    let mut salt = [0u8; SALT_LEN];
    SystemRandom::new()
        .fill(&mut salt)
        .map_err(|_| anyhow::anyhow!("Failed to generate password salt"))?;

    let mut hash = [0u8; HASH_LEN];
    pbkdf2::derive(ALGORITHM, iterations(), &salt, password.as_bytes(), &mut hash);

    Ok(StoredPassword {
        salt: STANDARD.encode(salt),
        hash: STANDARD.encode(hash),
    })
}

/// Check a password against a stored hash in constant time.
///
/// A stored hash that fails to decode never verifies.
pub fn verify_password(password: &str, stored: &StoredPassword) -> bool {
    let (Ok(salt), Ok(hash)) = (STANDARD.decode(&stored.salt), STANDARD.decode(&stored.hash))
    else {
        tracing::warn!("Stored password hash is not valid base64");
        return false;
    };

    pbkdf2::verify(ALGORITHM, iterations(), &salt, password.as_bytes(), &hash).is_ok()
}
