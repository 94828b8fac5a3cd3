/// Lowest work factor bcrypt accepts
pub const MIN_COST: u32 = 4;
/// Highest work factor bcrypt accepts
pub const MAX_COST: u32 = 31;

/// Errors raised while producing a password digest
#[derive(Debug, thiserror::Error)]
pub enum HashingError {
    /// The configured cost is outside the range bcrypt accepts
    #[error("bcrypt cost {0} is outside 4..=31")]
    InvalidCost(u32),

    /// The bcrypt primitive failed
    #[error("bcrypt failure: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    /// The blocking hashing task panicked or was cancelled
    #[error("hashing task failed: {0}")]
    Task(String),
}

/// Salted one-way password hashing with a configurable bcrypt work factor.
///
/// Digests are self-describing (`$2b$<cost>$<salt><hash>`), so a digest
/// produced under one cost still verifies after the cost is raised.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Creates a hasher using the given bcrypt cost.
    pub fn new(cost: u32) -> Result<Self, HashingError> {
        if !(MIN_COST..=MAX_COST).contains(&cost) {
            return Err(HashingError::InvalidCost(cost));
        }
        Ok(Self { cost })
    }

    /// The work factor used for new digests
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hashes a plaintext password with a fresh random salt.
    pub fn hash(&self, plaintext: &str) -> Result<String, HashingError> {
        Ok(bcrypt::hash(plaintext, self.cost)?)
    }

    /// Checks a plaintext password against a stored digest.
    /// A malformed digest never matches.
    pub fn verify(&self, plaintext: &str, digest: &str) -> bool {
        match bcrypt::verify(plaintext, digest) {
            Ok(matches) => matches,
            Err(e) => {
                log::warn!("Rejecting malformed password digest: {}", e);
                false
            }
        }
    }

    /// Runs [`PasswordHasher::hash`] on the blocking thread pool.
    pub async fn hash_blocking(&self, plaintext: String) -> Result<String, HashingError> {
        let hasher = *self;
        tokio::task::spawn_blocking(move || hasher.hash(&plaintext))
            .await
            .map_err(|e| HashingError::Task(e.to_string()))?
    }

    /// Runs [`PasswordHasher::verify`] on the blocking thread pool.
    pub async fn verify_blocking(
        &self,
        plaintext: String,
        digest: String,
    ) -> Result<bool, HashingError> {
        let hasher = *self;
        tokio::task::spawn_blocking(move || hasher.verify(&plaintext, &digest))
            .await
            .map_err(|e| HashingError::Task(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> PasswordHasher {
        PasswordHasher::new(MIN_COST).unwrap()
    }

    #[test]
    fn test_hash_then_verify() {
        let hasher = hasher();
        let digest = hasher.hash("s3cret-pass").unwrap();

        assert!(hasher.verify("s3cret-pass", &digest));
        assert!(!hasher.verify("s3cret-pasS", &digest));
        assert!(!hasher.verify("", &digest));
    }

    #[test]
    fn test_same_password_gets_distinct_salts() {
        let hasher = hasher();
        let first = hasher.hash("taxi").unwrap();
        let second = hasher.hash("taxi").unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify("taxi", &first));
        assert!(hasher.verify("taxi", &second));
    }

    #[test]
    fn test_digest_embeds_cost() {
        let hasher = PasswordHasher::new(5).unwrap();
        let digest = hasher.hash("taxi").unwrap();
        assert!(digest.starts_with("$2b$05$"));
    }

    #[test]
    fn test_malformed_digest_is_rejected_without_error() {
        let hasher = hasher();
        assert!(!hasher.verify("taxi", "not-a-bcrypt-digest"));
        assert!(!hasher.verify("taxi", ""));
        assert!(!hasher.verify("taxi", "$2b$99$abcdefghijklmnopqrstuv"));
    }

    #[test]
    fn test_cost_outside_range_is_rejected() {
        assert!(matches!(
            PasswordHasher::new(MIN_COST - 1),
            Err(HashingError::InvalidCost(_))
        ));
        assert!(matches!(
            PasswordHasher::new(MAX_COST + 1),
            Err(HashingError::InvalidCost(_))
        ));
        assert_eq!(PasswordHasher::new(10).unwrap().cost(), 10);
    }

    #[tokio::test]
    async fn test_blocking_variants_agree() {
        let hasher = hasher();
        let digest = hasher.hash_blocking("blocking".to_string()).await.unwrap();

        assert!(
            hasher
                .verify_blocking("blocking".to_string(), digest.clone())
                .await
                .unwrap()
        );
        assert!(
            !hasher
                .verify_blocking("other".to_string(), digest)
                .await
                .unwrap()
        );
    }
}
