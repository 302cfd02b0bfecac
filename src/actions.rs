use std::collections::HashMap;

/// Directive controlling what happens to a named attribute on write and read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CryptoAction {
    /// Encrypt the attribute and protect it with an authentication tag so
    /// that tampering is detected on read.
    EncryptAndSign,
    /// Store and return the attribute verbatim. Required for attributes used
    /// as lookup keys, since an encrypted value cannot be matched by
    /// equality in the store.
    DoNothing,
}

/// A default [`CryptoAction`] applied to every attribute, plus per-attribute
/// overrides.
///
/// Any attribute that participates in the table's key schema must resolve to
/// [`CryptoAction::DoNothing`], otherwise lookups by that key will never
/// match the stored value. The gateway does not validate this.
#[derive(Debug, Clone)]
pub struct AttributeActions {
    default: CryptoAction,
    overrides: HashMap<String, CryptoAction>,
}

impl AttributeActions {
    pub fn new(default: CryptoAction) -> Self {
        Self {
            default,
            overrides: HashMap::new(),
        }
    }

    /// Override the action for a single named attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, action: CryptoAction) -> Self {
        self.overrides.insert(name.into(), action);
        self
    }

    /// Resolve the effective action for `name`.
    pub fn action_for(&self, name: &str) -> CryptoAction {
        self.overrides.get(name).copied().unwrap_or(self.default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_action_applies_without_overrides() {
        let actions = AttributeActions::new(CryptoAction::EncryptAndSign);

        assert_eq!(actions.action_for("anything"), CryptoAction::EncryptAndSign);
    }

    #[test]
    fn override_wins_over_default() {
        let actions = AttributeActions::new(CryptoAction::EncryptAndSign)
            .with_attribute("id", CryptoAction::DoNothing);

        assert_eq!(actions.action_for("id"), CryptoAction::DoNothing);
        assert_eq!(actions.action_for("secret"), CryptoAction::EncryptAndSign);
    }

    #[test]
    fn later_override_replaces_earlier() {
        let actions = AttributeActions::new(CryptoAction::DoNothing)
            .with_attribute("card", CryptoAction::DoNothing)
            .with_attribute("card", CryptoAction::EncryptAndSign);

        assert_eq!(actions.action_for("card"), CryptoAction::EncryptAndSign);
    }
}
