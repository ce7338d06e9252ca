use crate::error::{AppError, Result};

/// bcrypt is CPU-bound, so hashing runs on the blocking pool.
pub async fn hash_password(password: &str, cost: u32) -> Result<String> {
    let password = password.to_string();

    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| AppError::Internal(format!("Password hashing task failed: {}", e)))?
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_is_one_way_and_verifiable() {
        let hash = hash_password("correct horse", 4).await.unwrap();

        assert_ne!(hash, "correct horse");
        assert!(bcrypt::verify("correct horse", &hash).unwrap());
        assert!(!bcrypt::verify("wrong horse", &hash).unwrap());
    }
}
