// Password complexity policy and Argon2id credential hashing

use std::sync::LazyLock;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use regex::Regex;
use tracing::warn;

use crate::auth::error::AuthError;

/// Characters that satisfy the special-character requirement
pub const SPECIAL_CHARACTERS: &str = r#"!@#$%^&*(),.?":{}|<>"#;

/// Minimum password length in bytes
pub const MIN_PASSWORD_LENGTH: usize = 8;

static UPPERCASE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Z]").expect("valid regex"));
static LOWERCASE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[a-z]").expect("valid regex"));
static DIGIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]").expect("valid regex"));
static SPECIAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[!@#$%^&*(),.?":{}|<>]"#).expect("valid regex"));

/// Password complexity policy
pub struct PasswordPolicy;

impl PasswordPolicy {
    /// Accepts passwords of at least 8 bytes containing an uppercase letter,
    /// a lowercase letter, a digit and one of [`SPECIAL_CHARACTERS`].
    pub fn is_complex(password: &str) -> bool {
        password.len() >= MIN_PASSWORD_LENGTH
            && UPPERCASE.is_match(password)
            && LOWERCASE.is_match(password)
            && DIGIT.is_match(password)
            && SPECIAL.is_match(password)
    }
}

/// One-way password hashing with Argon2id
///
/// The salt is generated per call and embedded in the PHC string, so
/// [`CredentialHasher::verify`] needs nothing but the stored hash.
#[derive(Clone)]
pub struct CredentialHasher {
    argon2: Argon2<'static>,
}

impl Default for CredentialHasher {
    fn default() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }
}

impl CredentialHasher {
    /// Create a hasher with an explicit work factor
    ///
    /// * `memory_kib` - memory cost in KiB
    /// * `iterations` - number of passes
    pub fn with_cost(memory_kib: u32, iterations: u32) -> Result<Self, AuthError> {
        let params = Params::new(memory_kib, iterations, Params::DEFAULT_P_COST, None)
            .map_err(|e| AuthError::Hashing(e.to_string()))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hash a plaintext password into a PHC string
    pub fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::Hashing(e.to_string()))
    }

    /// Verify a plaintext password against a stored hash
    pub fn verify(&self, hash: &str, password: &str) -> bool {
        let parsed = match PasswordHash::new(hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("Stored password hash could not be parsed: {}", e);
                return false;
            }
        };

        self.argon2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // Cheap parameters so the hashing tests stay fast
    fn test_hasher() -> CredentialHasher {
        CredentialHasher::with_cost(1024, 1).unwrap()
    }

    #[test]
    fn test_accepts_complex_password() {
        assert!(PasswordPolicy::is_complex("Abc12345!"));
        assert!(PasswordPolicy::is_complex("xY9{aaaa"));
    }

    #[test]
    fn test_rejects_each_missing_class() {
        assert!(!PasswordPolicy::is_complex("abc12345!"), "no uppercase");
        assert!(!PasswordPolicy::is_complex("ABC12345!"), "no lowercase");
        assert!(!PasswordPolicy::is_complex("Abcdefgh!"), "no digit");
        assert!(!PasswordPolicy::is_complex("Abc123456"), "no special");
        assert!(!PasswordPolicy::is_complex("Abc123-_"), "dash and underscore are not special");
    }

    #[test]
    fn test_rejects_short_empty_and_whitespace() {
        assert!(!PasswordPolicy::is_complex("Ab1!xyz"));
        assert!(!PasswordPolicy::is_complex(""));
        assert!(!PasswordPolicy::is_complex("        "));
        assert!(!PasswordPolicy::is_complex("\t\n \t\n \t\n"));
    }

    #[test]
    fn test_hash_is_salted_and_never_plaintext() {
        let hasher = test_hasher();
        let first = hasher.hash("Abc12345!").unwrap();
        let second = hasher.hash("Abc12345!").unwrap();

        assert_ne!(first, second);
        assert!(!first.contains("Abc12345!"));
        assert!(first.starts_with("$argon2id$"));
    }

    #[test]
    fn test_verify_round_trip() {
        let hasher = test_hasher();
        let hash = hasher.hash("Abc12345!").unwrap();

        assert!(hasher.verify(&hash, "Abc12345!"));
        assert!(!hasher.verify(&hash, "Abc12345?"));
        assert!(!hasher.verify(&hash, ""));
    }

    #[test]
    fn test_verify_with_malformed_hash_is_false() {
        let hasher = test_hasher();
        assert!(!hasher.verify("not-a-phc-string", "Abc12345!"));
        assert!(!hasher.verify("", "Abc12345!"));
    }

    #[test]
    fn test_default_hasher_verifies_cheap_hash() {
        // Parameters are read from the PHC string, not from the verifier
        let hash = test_hasher().hash("Abc12345!").unwrap();
        assert!(CredentialHasher::default().verify(&hash, "Abc12345!"));
    }

    fn reference_is_complex(p: &str) -> bool {
        p.len() >= 8
            && p.chars().any(|c| c.is_ascii_uppercase())
            && p.chars().any(|c| c.is_ascii_lowercase())
            && p.chars().any(|c| c.is_ascii_digit())
            && p.chars().any(|c| SPECIAL_CHARACTERS.contains(c))
    }

    proptest! {
        #[test]
        fn prop_policy_matches_character_classes(password in "[ -~]{0,20}") {
            prop_assert_eq!(PasswordPolicy::is_complex(&password), reference_is_complex(&password));
        }

        #[test]
        fn prop_policy_on_arbitrary_unicode(password in "\\PC{0,16}") {
            prop_assert_eq!(PasswordPolicy::is_complex(&password), reference_is_complex(&password));
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(8))]

        #[test]
        fn prop_hash_verify_round_trip(
            password in "[ -~]{1,24}",
            other in "[ -~]{1,24}"
        ) {
            let hasher = test_hasher();
            let hash = hasher.hash(&password)?;
            prop_assert!(hasher.verify(&hash, &password));
            if other != password {
                prop_assert!(!hasher.verify(&hash, &other));
            }
        }
    }
}
