use std::fmt;

/// A course code as mentioned, without the `!` trigger, e.g. `csc108H1`.
///
/// Only built from a matcher hit, so the first six characters are always
/// ASCII letters and digits.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CourseCode(String);

impl CourseCode {
    pub fn new(raw: &str) -> Self {
        CourseCode(raw.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn upper(&self) -> String {
        self.0.to_ascii_uppercase()
    }

    pub fn lower(&self) -> String {
        self.0.to_ascii_lowercase()
    }

    /// Lower-cased three letter department prefix, used in catalog URLs.
    pub fn department(&self) -> String {
        self.0.get(..3).unwrap_or(&self.0).to_ascii_lowercase()
    }
}

impl fmt::Display for CourseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CourseDescription {
    pub title: String,
    /// Paragraph text with course codes rewritten into markdown links.
    pub body: String,
}
