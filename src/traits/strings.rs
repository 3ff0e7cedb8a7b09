//! Localized string resolution.
//!
//! String resources are resolved through an async trait because real
//! implementations may load translation bundles lazily. View-state error
//! handling awaits the resolution before producing its replacement state.

use async_trait::async_trait;

/// Identifier of a user-facing string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StringResource {
    /// Fallback when an account fetch fails without a message.
    AccountErrorLoadAccount,
    /// Fallback when a tariff fetch fails without a message.
    AccountErrorLoadTariff,
}

/// Resolves a [`StringResource`] to display text.
///
/// `args` are positional: `{0}`, `{1}`, ... in the template are replaced in
/// order. Unused arguments are ignored.
#[async_trait]
pub trait StringResourceProvider: Send + Sync {
    async fn get_string(&self, resource: StringResource, args: &[&str]) -> String;
}

/// Built-in English strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishStringProvider;

impl EnglishStringProvider {
    fn template(resource: StringResource) -> &'static str {
        match resource {
            StringResource::AccountErrorLoadAccount => {
                "Unable to retrieve your account details"
            }
            StringResource::AccountErrorLoadTariff => "Unable to retrieve your tariff",
        }
    }
}

#[async_trait]
impl StringResourceProvider for EnglishStringProvider {
    async fn get_string(&self, resource: StringResource, args: &[&str]) -> String {
        let mut text = Self::template(resource).to_string();
        for (index, arg) in args.iter().enumerate() {
            text = text.replace(&format!("{{{}}}", index), arg);
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_plain_resource_resolves_verbatim() {
        let provider = EnglishStringProvider;
        let text = provider
            .get_string(StringResource::AccountErrorLoadAccount, &[])
            .await;
        assert_eq!(text, "Unable to retrieve your account details");
    }

    #[tokio::test]
    async fn test_extra_args_are_ignored() {
        let provider = EnglishStringProvider;
        let text = provider
            .get_string(StringResource::AccountErrorLoadTariff, &["unused"])
            .await;
        assert_eq!(text, "Unable to retrieve your tariff");
    }
}
