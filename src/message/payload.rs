//! Template message request and its wire representation.

use std::fmt;

use serde::Serialize;

use super::ValidationError;

/// Language used when the caller does not pick one.
pub const DEFAULT_LANGUAGE_CODE: &str = "en_US";

const MESSAGING_PRODUCT: &str = "whatsapp";
const MESSAGE_TYPE: &str = "template";

/// A positional value substituted into a template placeholder.
///
/// Anything with a textual form converts into a variable, so callers can
/// mix strings and numbers in one list:
///
/// ```
/// use wa_template::message::TemplateVariable;
///
/// let vars: Vec<TemplateVariable> = vec!["Alice".into(), 3.into(), 2.5.into()];
/// assert_eq!(vars[1].as_str(), "3");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TemplateVariable(String);

impl TemplateVariable {
    /// Returns the text that will be sent for this placeholder.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the variable and returns its text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for TemplateVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for TemplateVariable {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for TemplateVariable {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<&String> for TemplateVariable {
    fn from(value: &String) -> Self {
        Self(value.clone())
    }
}

impl From<&Self> for TemplateVariable {
    fn from(value: &Self) -> Self {
        value.clone()
    }
}

macro_rules! variable_from_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for TemplateVariable {
                fn from(value: $ty) -> Self {
                    Self(value.to_string())
                }
            }
        )*
    };
}

variable_from_display!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, bool, char,
);

impl From<f64> for TemplateVariable {
    /// Non-finite values use the names `Infinity`, `-Infinity` and `NaN`,
    /// and negative zero is sent as `0`.
    fn from(value: f64) -> Self {
        let text = if value.is_nan() {
            "NaN".to_string()
        } else if value.is_infinite() {
            if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
        } else if value == 0.0 {
            "0".to_string()
        } else {
            value.to_string()
        };
        Self(text)
    }
}

impl From<f32> for TemplateVariable {
    fn from(value: f32) -> Self {
        Self::from(f64::from(value))
    }
}

/// Validated parameters of a single template message.
///
/// Construction fails fast: if either the recipient or the template name is
/// empty, no request is produced. Phone number format is not checked.
///
/// # Example
///
/// ```
/// use wa_template::message::TemplateMessageRequest;
///
/// let request = TemplateMessageRequest::new("15551234567", "order_update")?
///     .with_language("en")
///     .with_variables(["Alice", "#1042"]);
///
/// let wire = request.to_wire();
/// assert_eq!(wire.to(), "15551234567");
/// # Ok::<(), wa_template::message::ValidationError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateMessageRequest {
    recipient: String,
    template_name: String,
    language_code: String,
    variables: Vec<TemplateVariable>,
}

impl TemplateMessageRequest {
    /// Creates a request with the default language and no variables.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingRecipient`] if `recipient` is empty,
    /// otherwise [`ValidationError::MissingTemplateName`] if `template_name`
    /// is empty.
    pub fn new(
        recipient: impl Into<String>,
        template_name: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let recipient = recipient.into();
        let template_name = template_name.into();

        if recipient.is_empty() {
            return Err(ValidationError::MissingRecipient);
        }
        if template_name.is_empty() {
            return Err(ValidationError::MissingTemplateName);
        }

        Ok(Self {
            recipient,
            template_name,
            language_code: DEFAULT_LANGUAGE_CODE.to_string(),
            variables: Vec::new(),
        })
    }

    /// Sets the template language.
    ///
    /// An empty code leaves the current language unchanged.
    #[must_use]
    pub fn with_language(mut self, code: impl Into<String>) -> Self {
        let code = code.into();
        if !code.is_empty() {
            self.language_code = code;
        }
        self
    }

    /// Sets the positional template variables, replacing any previous ones.
    #[must_use]
    pub fn with_variables<I, T>(mut self, variables: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TemplateVariable>,
    {
        self.variables = variables.into_iter().map(Into::into).collect();
        self
    }

    /// Returns the recipient phone number.
    #[must_use]
    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    /// Returns the template name.
    #[must_use]
    pub fn template_name(&self) -> &str {
        &self.template_name
    }

    /// Returns the template language code.
    #[must_use]
    pub fn language_code(&self) -> &str {
        &self.language_code
    }

    /// Returns the template variables in placeholder order.
    #[must_use]
    pub fn variables(&self) -> &[TemplateVariable] {
        &self.variables
    }

    /// Projects the request into the JSON shape the API expects.
    ///
    /// Without variables the `components` section is left out entirely.
    #[must_use]
    pub fn to_wire(&self) -> WireRequest {
        let components = if self.variables.is_empty() {
            Vec::new()
        } else {
            vec![Component::body(&self.variables)]
        };

        WireRequest {
            messaging_product: MESSAGING_PRODUCT,
            to: self.recipient.clone(),
            kind: MESSAGE_TYPE,
            template: TemplateSection {
                name: self.template_name.clone(),
                language: Language {
                    code: self.language_code.clone(),
                },
                components,
            },
        }
    }
}

/// Builds the wire payload for a template message in one call.
///
/// `language_code` falls back to [`DEFAULT_LANGUAGE_CODE`] when `None` or
/// empty.
///
/// # Errors
///
/// Returns [`ValidationError`] if `recipient` or `template_name` is empty.
pub fn build_payload<I, T>(
    recipient: &str,
    template_name: &str,
    language_code: Option<&str>,
    variables: I,
) -> Result<WireRequest, ValidationError>
where
    I: IntoIterator<Item = T>,
    T: Into<TemplateVariable>,
{
    let mut request = TemplateMessageRequest::new(recipient, template_name)?;
    if let Some(code) = language_code {
        request = request.with_language(code);
    }
    Ok(request.with_variables(variables).to_wire())
}

/// JSON body of a "send template message" call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WireRequest {
    messaging_product: &'static str,
    to: String,
    #[serde(rename = "type")]
    kind: &'static str,
    template: TemplateSection,
}

impl WireRequest {
    /// Always `"whatsapp"`.
    #[must_use]
    pub const fn messaging_product(&self) -> &'static str {
        self.messaging_product
    }

    /// Recipient phone number.
    #[must_use]
    pub fn to(&self) -> &str {
        &self.to
    }

    /// Always `"template"`.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        self.kind
    }

    /// The template section.
    #[must_use]
    pub const fn template(&self) -> &TemplateSection {
        &self.template
    }

    /// Serializes the payload to JSON bytes.
    #[must_use]
    pub fn to_json_bytes(&self) -> Vec<u8> {
        // Only strings and unit enums inside; serialization cannot fail.
        serde_json::to_vec(self).expect("wire request is always serializable")
    }
}

/// The `template` object of a [`WireRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateSection {
    name: String,
    language: Language,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    components: Vec<Component>,
}

impl TemplateSection {
    /// Template name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Template language.
    #[must_use]
    pub const fn language(&self) -> &Language {
        &self.language
    }

    /// Template components. Empty when no variables were given.
    #[must_use]
    pub fn components(&self) -> &[Component] {
        &self.components
    }
}

/// `template.language`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Language {
    code: String,
}

impl Language {
    /// Locale tag, e.g. `en_US`.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }
}

/// Kind of a template component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    /// The template body.
    Body,
}

/// One entry of `template.components`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Component {
    #[serde(rename = "type")]
    kind: ComponentKind,
    parameters: Vec<Parameter>,
}

impl Component {
    fn body(variables: &[TemplateVariable]) -> Self {
        Self {
            kind: ComponentKind::Body,
            parameters: variables.iter().map(Parameter::text).collect(),
        }
    }

    /// Component kind.
    #[must_use]
    pub const fn kind(&self) -> ComponentKind {
        self.kind
    }

    /// Placeholder values, in order.
    #[must_use]
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }
}

/// Kind of a component parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterKind {
    /// Plain text substitution.
    Text,
}

/// A single placeholder substitution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    #[serde(rename = "type")]
    kind: ParameterKind,
    text: String,
}

impl Parameter {
    fn text(variable: &TemplateVariable) -> Self {
        Self {
            kind: ParameterKind::Text,
            text: variable.as_str().to_owned(),
        }
    }

    /// Parameter kind.
    #[must_use]
    pub const fn kind(&self) -> ParameterKind {
        self.kind
    }

    /// Substituted text.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.text
    }
}
