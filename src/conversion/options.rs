use std::rc::Rc;

use serde::Deserialize;

use crate::host::realm::Realm;

/// Context label used in error messages when none is configured.
pub const DEFAULT_CONTEXT: &str = "Value";

/// The options record passed to every converter.
///
/// Each option only affects the converters it applies to: `enforce_range` and
/// `clamp` the integer types, `treat_null_as_empty_string` the string types,
/// `allow_shared` the buffer types. When both `enforce_range` and `clamp` are
/// set, `enforce_range` wins.
///
/// Deserializes from the camelCase JSON form; unknown keys are ignored.
///
/// # Example
/// ```
/// use webidl_conversions::ConversionOptions;
///
/// let opts = ConversionOptions::from_json(r#"{"clamp": true, "future": 1}"#).unwrap();
/// assert!(opts.clamp);
/// assert_eq!(opts.context(), "Value");
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConversionOptions {
    /// Reject out-of-range and non-finite integers.
    pub enforce_range:              bool,
    /// Saturate out-of-range integers instead of wrapping.
    pub clamp:                      bool,
    /// Convert `null` to the empty string.
    pub treat_null_as_empty_string: bool,
    /// Admit `SharedArrayBuffer` and views over one.
    pub allow_shared:               bool,
    /// Prefix for error messages.
    pub context:                    Option<String>,
    /// Factories of an alternate global environment.
    #[serde(skip)]
    pub realm:                      Option<Rc<dyn Realm>>,
}

impl ConversionOptions {
    /// Parses options from JSON.
    ///
    /// # Errors
    /// Fails if the text is not a JSON object with correctly typed fields.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Enables the strict range policy.
    #[must_use]
    pub fn with_enforce_range(mut self) -> Self {
        self.enforce_range = true;
        self
    }

    /// Enables the saturating policy.
    #[must_use]
    pub fn with_clamp(mut self) -> Self {
        self.clamp = true;
        self
    }

    /// Makes string converters map `null` to `""`.
    #[must_use]
    pub fn with_treat_null_as_empty_string(mut self) -> Self {
        self.treat_null_as_empty_string = true;
        self
    }

    /// Admits shared buffers.
    #[must_use]
    pub fn with_allow_shared(mut self) -> Self {
        self.allow_shared = true;
        self
    }

    /// Sets the error message prefix.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Routes number, string and error construction through `realm`.
    #[must_use]
    pub fn with_realm(mut self, realm: Rc<dyn Realm>) -> Self {
        self.realm = Some(realm);
        self
    }

    /// The error message prefix, `"Value"` unless configured.
    #[must_use]
    pub fn context(&self) -> &str {
        self.context.as_deref().unwrap_or(DEFAULT_CONTEXT)
    }

    /// The alternate realm, if any.
    #[must_use]
    pub fn realm(&self) -> Option<&dyn Realm> {
        self.realm.as_deref()
    }
}
