use stagger::types::CommandList;

/// Build a `CommandList` from raw argv slices; empty entries are dropped
/// exactly as the loader would drop them.
pub fn commands(raw: &[&[&str]]) -> CommandList {
    CommandList::from_raw(
        raw.iter()
            .map(|argv| argv.iter().map(|s| s.to_string()).collect()),
    )
}
