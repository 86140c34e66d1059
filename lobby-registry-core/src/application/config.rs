/// Configuration for the lobby engine
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Characters per join code
    pub join_code_length: usize,

    /// Fresh codes tried before giving up on a create
    pub join_code_attempts: usize,

    /// Emit `AccessDenied` events for refused authorization checks
    pub audit_denials: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            join_code_length: 6,
            join_code_attempts: 16,
            audit_denials: false,
        }
    }
}

impl EngineConfig {
    pub fn with_join_code_length(mut self, len: usize) -> Self {
        self.join_code_length = len;
        self
    }

    pub fn with_join_code_attempts(mut self, attempts: usize) -> Self {
        self.join_code_attempts = attempts;
        self
    }

    pub fn with_audit_denials(mut self, enabled: bool) -> Self {
        self.audit_denials = enabled;
        self
    }
}
