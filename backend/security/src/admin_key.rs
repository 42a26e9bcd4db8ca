/// Admin credential check for the user-management surface.
///
/// A single shared secret, compared against the `admin_key` cookie.
use subtle::ConstantTimeEq;

#[derive(Clone)]
pub struct AdminKey {
    secret: String,
}

impl AdminKey {
    pub fn new(secret: impl Into<String>) -> Self {
        Self { secret: secret.into() }
    }

    /// True when a non-empty secret is configured.
    pub fn is_enabled(&self) -> bool {
        !self.secret.is_empty()
    }

    /// Constant-time comparison. An unconfigured key never matches, so an
    /// empty cookie cannot unlock the admin surface.
    pub fn verify(&self, candidate: Option<&str>) -> bool {
        let Some(candidate) = candidate else {
            return false;
        };
        if !self.is_enabled() {
            return false;
        }
        self.secret.as_bytes().ct_eq(candidate.as_bytes()).into()
    }
}

impl std::fmt::Debug for AdminKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminKey")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}
