//! Country model

use serde::{Deserialize, Serialize};
use std::fmt;

/// A country known to a holiday data source
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Country {
    /// Country code (ISO 3166-1 alpha-2 for the built-in calendar)
    pub code: String,

    /// Display name
    pub name: String,
}

impl Country {
    /// Create a new country
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}
