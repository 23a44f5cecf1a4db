use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource};
use unic_langid::LanguageIdentifier;

use crate::errors::CrossieError;

const EN_MAIN: &str = include_str!("../locales/en/main.ftl");

/// Localization manager for crossie bot replies
pub struct LocalizationManager {
    bundle: FluentBundle<FluentResource>,
}

impl LocalizationManager {
    /// Create a manager with the bundled English resource
    pub fn new() -> Result<Self, CrossieError> {
        Self::from_source("en", EN_MAIN)
    }

    /// Create a manager from Fluent source text
    pub fn from_source(locale: &str, source: &str) -> Result<Self, CrossieError> {
        let locale: LanguageIdentifier = locale
            .parse()
            .map_err(|e| CrossieError::Config(format!("invalid locale `{locale}`: {e}")))?;

        let resource = FluentResource::try_new(source.to_string()).map_err(|(_, errors)| {
            CrossieError::Config(format!("invalid Fluent resource: {errors:?}"))
        })?;

        let mut bundle = FluentBundle::new_concurrent(vec![locale]);
        // Replies go out as plain text; no bidi isolation marks around links.
        bundle.set_use_isolating(false);
        bundle
            .add_resource(resource)
            .map_err(|errors| CrossieError::Config(format!("duplicate Fluent messages: {errors:?}")))?;

        Ok(Self { bundle })
    }

    /// Get a localized message
    pub fn get_message(&self, key: &str, args: Option<&FluentArgs>) -> String {
        let msg = match self.bundle.get_message(key) {
            Some(msg) => msg,
            None => return format!("Missing translation: {key}"),
        };

        let pattern = match msg.value() {
            Some(pattern) => pattern,
            None => return format!("Missing value for key: {key}"),
        };

        let mut errors = vec![];
        self.bundle.format_pattern(pattern, args, &mut errors).into_owned()
    }

    /// Get a localized message with simple string arguments
    pub fn get_message_with_args(&self, key: &str, args: &[(&str, &str)]) -> String {
        let mut fluent_args = FluentArgs::new();
        for (name, value) in args {
            fluent_args.set(*name, *value);
        }
        self.get_message(key, Some(&fluent_args))
    }
}
