use std::fmt;

use serde::Deserialize;

/// One command to launch: an executable followed by its arguments.
///
/// Always holds at least one element; construct through [`CommandSpec::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec(Vec<String>);

impl CommandSpec {
    /// Returns `None` for an empty argv.
    pub fn new(argv: Vec<String>) -> Option<Self> {
        if argv.is_empty() {
            None
        } else {
            Some(Self(argv))
        }
    }

    pub fn program(&self) -> &str {
        &self.0[0]
    }

    pub fn args(&self) -> &[String] {
        &self.0[1..]
    }

    pub fn argv(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(" "))
    }
}

/// A single record as it appears in the command stream.
///
/// `null` and `[]` are both accepted and later dropped.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct RawCommandRecord(pub Option<Vec<String>>);

/// Ordered list of commands. Insertion order is launch order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandList(Vec<CommandSpec>);

impl CommandList {
    /// Build a list from raw argv vectors, dropping empty entries.
    pub fn from_raw<I>(raw: I) -> Self
    where
        I: IntoIterator<Item = Vec<String>>,
    {
        Self(raw.into_iter().filter_map(CommandSpec::new).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandSpec> {
        self.0.iter()
    }
}

impl FromIterator<CommandSpec> for CommandList {
    fn from_iter<T: IntoIterator<Item = CommandSpec>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for CommandList {
    type Item = CommandSpec;
    type IntoIter = std::vec::IntoIter<CommandSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
