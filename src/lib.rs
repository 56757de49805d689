//! # idauth (phone + national ID authentication)
//!
//! `idauth` registers users by full name, phone number and national ID number,
//! and issues short-lived signed session tokens for them.
//!
//! ## Identity Model
//!
//! - **Phone numbers** must be 12 ASCII digits starting with the `254` country prefix.
//! - **ID numbers** must be exactly 8 ASCII digits.
//! - Both are unique across all users. The store's insert is the final authority
//!   on uniqueness; the lookup before it only produces an early error.
//!
//! ## Sessions
//!
//! Tokens are compact HS256 JWTs carrying `userId`, `iat` and `exp`. They are never
//! stored and cannot be revoked before they expire.
//!
//! ## Login
//!
//! Login matches the phone number and ID number exactly as presented. There is no
//! separate password.

pub mod api;
pub mod auth;
pub mod cli;
pub mod store;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }
}
