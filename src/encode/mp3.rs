use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::foundation::error::{ForgeError, ForgeResult};

/// External transcoders known to the MP3 step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscoderKind {
    /// `ffmpeg -y -i <wav> -b:a <N>k <mp3>`
    Ffmpeg,
    /// `lame -b <N> <wav> <mp3>`
    Lame,
}

impl TranscoderKind {
    /// Executable name looked up on `PATH` by default.
    pub fn default_program(self) -> &'static str {
        match self {
            TranscoderKind::Ffmpeg => "ffmpeg",
            TranscoderKind::Lame => "lame",
        }
    }

    /// Command-line arguments for a constant-bitrate transcode.
    pub fn args(self, wav: &Path, mp3: &Path, bitrate_kbps: u32) -> Vec<OsString> {
        match self {
            TranscoderKind::Ffmpeg => vec![
                "-y".into(),
                "-loglevel".into(),
                "error".into(),
                "-i".into(),
                wav.into(),
                "-b:a".into(),
                format!("{bitrate_kbps}k").into(),
                mp3.into(),
            ],
            TranscoderKind::Lame => vec![
                "--quiet".into(),
                "-b".into(),
                bitrate_kbps.to_string().into(),
                wav.into(),
                mp3.into(),
            ],
        }
    }
}

/// One candidate tool: what kind of command line to build and which executable to run.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TranscoderTool {
    /// Argument convention.
    pub kind: TranscoderKind,
    /// Executable name or path.
    pub program: String,
}

impl TranscoderTool {
    /// Tool of `kind` using its default executable name.
    pub fn new(kind: TranscoderKind) -> Self {
        Self {
            kind,
            program: kind.default_program().to_string(),
        }
    }

    /// Same argument convention, different executable.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }
}

/// Options for the MP3 step.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Mp3Opts {
    /// Run the MP3 step at all.
    pub enabled: bool,
    /// Constant bitrate in kbit/s.
    pub bitrate_kbps: u32,
    /// Candidates, tried in order until one succeeds.
    pub tools: Vec<TranscoderTool>,
}

impl Default for Mp3Opts {
    fn default() -> Self {
        Self {
            enabled: true,
            bitrate_kbps: 192,
            tools: vec![
                TranscoderTool::new(TranscoderKind::Ffmpeg),
                TranscoderTool::new(TranscoderKind::Lame),
            ],
        }
    }
}

impl Mp3Opts {
    /// Check the bitrate and tool list.
    pub fn validate(&self) -> ForgeResult<()> {
        if self.bitrate_kbps == 0 {
            return Err(ForgeError::validation("mp3 bitrate_kbps must be non-zero"));
        }
        if self.tools.iter().any(|t| t.program.trim().is_empty()) {
            return Err(ForgeError::validation(
                "mp3 transcoder program names must be non-empty",
            ));
        }
        Ok(())
    }
}

/// Result of a single transcoder invocation.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TranscodeOutcome {
    /// The tool ran and exited successfully.
    Succeeded,
    /// The executable was not found.
    ToolAbsent,
    /// The tool could not be started or exited with a failure status.
    ToolFailed {
        /// Exit status and trimmed stderr, or the spawn error.
        reason: String,
    },
}

/// Result of the whole MP3 step.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Mp3Outcome {
    /// `tool` produced the MP3.
    Written {
        /// Tool that succeeded.
        tool: TranscoderKind,
    },
    /// No candidate succeeded.
    ///
    /// The output path is left as the tools left it: a failing tool may have written a truncated
    /// file, and an MP3 from an earlier run is not removed.
    Skipped {
        /// Every attempt in order.
        attempts: Vec<(TranscoderKind, TranscodeOutcome)>,
    },
    /// The step was turned off in the options.
    Disabled,
}

/// Run one transcoder against `wav`, writing `mp3`.
///
/// Absence is detected from the spawn error, not from tool output.
pub fn run_transcoder(
    tool: &TranscoderTool,
    wav: &Path,
    mp3: &Path,
    bitrate_kbps: u32,
) -> TranscodeOutcome {
    let output = Command::new(&tool.program)
        .args(tool.kind.args(wav, mp3, bitrate_kbps))
        .stdin(Stdio::null())
        .output();

    match output {
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => TranscodeOutcome::ToolAbsent,
        Err(e) => TranscodeOutcome::ToolFailed {
            reason: format!("failed to spawn '{}': {e}", tool.program),
        },
        Ok(out) if out.status.success() => TranscodeOutcome::Succeeded,
        Ok(out) => TranscodeOutcome::ToolFailed {
            reason: format!(
                "'{}' exited with status {}: {}",
                tool.program,
                out.status,
                String::from_utf8_lossy(&out.stderr).trim()
            ),
        },
    }
}

/// Try each configured tool in order; stop at the first success.
///
/// Never fails: when every candidate is absent or fails the outcome is [`Mp3Outcome::Skipped`]
/// and a warning is logged. Nothing at `mp3` is cleaned up on that path.
#[tracing::instrument(skip_all, fields(wav = %wav.display(), mp3 = %mp3.display()))]
pub fn transcode_to_mp3(wav: &Path, mp3: &Path, opts: &Mp3Opts) -> Mp3Outcome {
    if !opts.enabled {
        return Mp3Outcome::Disabled;
    }

    let mut attempts = Vec::with_capacity(opts.tools.len());
    for tool in &opts.tools {
        let outcome = run_transcoder(tool, wav, mp3, opts.bitrate_kbps);
        tracing::debug!(program = %tool.program, ?outcome, "transcoder attempt");
        if outcome == TranscodeOutcome::Succeeded {
            return Mp3Outcome::Written { tool: tool.kind };
        }
        attempts.push((tool.kind, outcome));
    }

    let tried: Vec<&str> = opts.tools.iter().map(|t| t.program.as_str()).collect();
    tracing::warn!(
        tools = ?tried,
        ?attempts,
        "could not generate mp3 (no transcoder found or all failed); install ffmpeg or lame"
    );
    Mp3Outcome::Skipped { attempts }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/mp3.rs"]
mod tests;
