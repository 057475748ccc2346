//! Field tag directives: `<name>[,omitempty]` or `-`

/// Directive value that drops a field unconditionally.
pub const SKIP: &str = "-";

/// Option requesting omission when the field holds its zero value.
pub const OMIT_EMPTY: &str = "omitempty";

/// A parsed tag directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag<'a> {
    name: &'a str,
    omit_empty: bool,
    skip: bool,
}

impl<'a> Tag<'a> {
    /// Parse a raw directive. Unknown options after the name are ignored.
    pub fn parse(raw: &'a str) -> Self {
        if raw == SKIP {
            return Tag {
                name: "",
                omit_empty: false,
                skip: true,
            };
        }

        let (name, options) = raw.split_once(',').unwrap_or((raw, ""));
        Tag {
            name,
            omit_empty: options.split(',').any(|opt| opt.trim() == OMIT_EMPTY),
            skip: false,
        }
    }

    pub fn is_skip(&self) -> bool {
        self.skip
    }

    pub fn omit_empty(&self) -> bool {
        self.omit_empty
    }

    /// The name part with options stripped; may be blank.
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Output key for a field: the tag name, or the field's own name when blank.
    pub fn key<'b>(&self, field_name: &'b str) -> &'b str
    where
        'a: 'b,
    {
        if self.name.trim().is_empty() {
            field_name
        } else {
            self.name
        }
    }
}
