//! Rendering of command outcomes for humans or machines.

use std::io::Write;

use serde::Serialize;
use serde_json::Value;

use crate::{Outcome, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tag {
    Success,
    Failure,
    NotFound,
}

impl Tag {
    pub fn for_outcome(outcome: &Outcome) -> Self {
        match outcome {
            Outcome::Success { .. } => Tag::Success,
            Outcome::NotRegistered => Tag::Failure,
            Outcome::NotFound(_) => Tag::NotFound,
        }
    }
}

#[derive(Serialize)]
struct JsonOut {
    ok: bool,
    tag: Tag,
    message: String,
    data: Value,
}

/// Write exactly one rendered message for `outcome`.
pub fn render(outcome: &Outcome, format: OutputFormat, out: &mut dyn Write) -> Result<()> {
    match format {
        OutputFormat::Human => {
            writeln!(out, "{}", outcome.message())?;
        }
        OutputFormat::Json => {
            let data = match outcome {
                Outcome::Success { binding, .. } => serde_json::to_value(binding)?,
                Outcome::NotFound(missing) => serde_json::to_value(missing)?,
                Outcome::NotRegistered => Value::Null,
            };
            let doc = JsonOut {
                ok: outcome.is_success(),
                tag: Tag::for_outcome(outcome),
                message: outcome.message(),
                data,
            };
            writeln!(out, "{}", serde_json::to_string_pretty(&doc)?)?;
        }
    }
    out.flush()?;
    Ok(())
}
