// src/config/loader.rs

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use serde_json::Deserializer;
use tracing::debug;

use crate::errors::{Result, StaggerError};
use crate::types::{CommandList, RawCommandRecord};

/// Path value meaning "read commands from standard input".
pub const STDIN_PATH: &str = "-";

/// Load a command list from a path, or from stdin when the path is `-`.
///
/// Nothing is launched until the whole stream has been decoded, so any error
/// here is fatal to the program before a single command starts.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<CommandList> {
    let path = path.as_ref();

    if path.as_os_str() == STDIN_PATH {
        debug!("reading commands from stdin");
        return load_from_reader(io::stdin().lock());
    }

    debug!(path = %path.display(), "reading commands from file");
    let file = File::open(path)?;
    load_from_reader(BufReader::new(file))
}

/// Decode a stream of concatenated JSON arrays of strings.
///
/// ```text
/// ["echo", "a"]
/// ["sleep", "1"] []
/// ```
///
/// - `[]` and `null` records are dropped.
/// - Anything else that is not an array of strings aborts the whole load.
pub fn load_from_reader<R: Read>(reader: R) -> Result<CommandList> {
    let stream = Deserializer::from_reader(reader).into_iter::<RawCommandRecord>();

    let mut raw = Vec::new();
    for (idx, record) in stream.enumerate() {
        let record = record.map_err(|e| {
            StaggerError::CommandSource(format!("record {}: {}", idx + 1, e))
        })?;
        if let Some(argv) = record.0 {
            raw.push(argv);
        }
    }

    let commands = CommandList::from_raw(raw);
    debug!(count = commands.len(), "command list loaded");
    Ok(commands)
}
