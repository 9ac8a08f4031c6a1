use serde::{Deserialize, Serialize};
use std::{fs::File, io::BufReader, path::Path};

use crate::{Error, InternalResult};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardConfig {
    #[serde(default)]
    pub parser: ParserConfig,

    #[serde(default)]
    pub checker: CheckerConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Reject tokens left over after the top-level process. Off by default:
    /// parsing stops at the first token no rule continues with and the rest
    /// of the line is ignored.
    #[serde(default)]
    pub require_end_of_input: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckerConfig {
    #[serde(default)]
    pub evaluation: EvaluationMode,

    /// Stop waiting for the second branch of `+` or `|` once the first one
    /// has come back not guarded.
    #[serde(default)]
    pub short_circuit: bool,
}

/// How the checker walks the process tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationMode {
    /// One spawned task per visited node, results delivered over one-shot
    /// channels. Needs a running tokio runtime.
    #[default]
    Concurrent,
    /// Both branches polled together as futures of the calling task.
    Inline,
    /// A worklist walk on the calling thread.
    Sequential,
}

impl GuardConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> InternalResult<Self> {
        from_file(path)
    }
}

pub fn from_file<T: for<'de> Deserialize<'de>, P: AsRef<Path>>(path: P) -> InternalResult<T> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let config = serde_json::from_reader(reader)
        .map_err(|e| Error::Config(format!("Failed to parse config file: {}", e)))?;
    Ok(config)
}

pub fn from_str<T: for<'de> Deserialize<'de>>(s: &str) -> InternalResult<T> {
    let config = serde_json::from_str(s)
        .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
    Ok(config)
}
