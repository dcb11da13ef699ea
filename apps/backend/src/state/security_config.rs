use jsonwebtoken::Algorithm;

/// Signing configuration for player access tokens.
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// Shared secret used to sign and verify tokens.
    pub jwt_secret: Vec<u8>,
    /// Signature algorithm; this backend only issues HS256 tokens.
    pub algorithm: Algorithm,
}

impl SecurityConfig {
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
        }
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self::new(b"lobby_dev_secret_do_not_deploy".to_vec())
    }
}
