//! Unescaped HTML injection (`dangerouslySetInnerHTML`)

use alloc::rc::Rc;
use alloc::string::{String, ToString};
use core::fmt;

use crate::record::{Prop, PropValue};
use crate::{ConversionError, Map, Value};

/// Output key the UI runtime reads raw markup from.
pub const RAW_HTML_KEY: &str = "dangerouslySetInnerHTML";

/// Key of the markup inside the raw-HTML object.
pub const RAW_HTML_INNER_KEY: &str = "__html";

/// Declared field name that, tagged with [`RAW_HTML_KEY`], marks raw markup.
pub const RAW_HTML_FIELD: &str = "dangerously_set_inner_html";

/// Markup the runtime inserts without escaping.
#[derive(Clone)]
pub enum RawHtml {
    Markup(String),
    /// Produced when the owning record is converted.
    Deferred(Rc<dyn Fn() -> String>),
}

impl RawHtml {
    pub fn markup(html: impl Into<String>) -> Self {
        RawHtml::Markup(html.into())
    }

    pub fn deferred(f: impl Fn() -> String + 'static) -> Self {
        RawHtml::Deferred(Rc::new(f))
    }

    pub fn render(&self) -> String {
        match self {
            RawHtml::Markup(html) => html.clone(),
            RawHtml::Deferred(f) => f(),
        }
    }
}

/// `{"__html": markup}`, the value stored under [`RAW_HTML_KEY`].
pub(crate) fn wrap(markup: Value) -> Value {
    let mut inner = Map::new();
    inner.insert(String::from(RAW_HTML_INNER_KEY), markup);
    Value::Map(inner)
}

impl Default for RawHtml {
    fn default() -> Self {
        RawHtml::Markup(String::new())
    }
}

impl PartialEq for RawHtml {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (RawHtml::Markup(a), RawHtml::Markup(b)) => a == b,
            (RawHtml::Deferred(a), RawHtml::Deferred(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for RawHtml {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawHtml::Markup(html) => f.debug_tuple("Markup").field(html).finish(),
            RawHtml::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

impl Prop for RawHtml {
    fn to_prop(&self) -> PropValue<'_> {
        PropValue::RawHtml(self)
    }

    fn is_zero(&self) -> bool {
        matches!(self, RawHtml::Markup(html) if html.is_empty())
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::String(html) => Ok(RawHtml::Markup(html)),
            Value::Map(mut map) => match map.remove(RAW_HTML_INNER_KEY) {
                Some(Value::String(html)) => Ok(RawHtml::Markup(html)),
                Some(Value::Null) | None => Ok(RawHtml::default()),
                Some(other) => Err(ConversionError::FieldError(
                    RAW_HTML_INNER_KEY.to_string(),
                    alloc::boxed::Box::new(ConversionError::TypeMismatch {
                        expected: "string",
                        got: other.kind(),
                    }),
                )),
            },
            other => Err(ConversionError::TypeMismatch {
                expected: "raw html",
                got: other.kind(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deferred_markup_renders_on_demand() {
        let html = RawHtml::deferred(|| String::from("<b>hi</b>"));
        assert_eq!(html.render(), "<b>hi</b>");
        assert!(!html.is_zero());
        assert!(RawHtml::default().is_zero());
    }

    #[test]
    fn decodes_wrapped_and_bare_markup() {
        let wrapped = wrap(Value::from("<i>x</i>"));
        assert_eq!(RawHtml::from_value(wrapped), Ok(RawHtml::markup("<i>x</i>")));
        assert_eq!(RawHtml::from_value(Value::from("<p/>")), Ok(RawHtml::markup("<p/>")));
        assert!(RawHtml::from_value(Value::Bool(true)).is_err());
    }
}
