//! Audio fixtures: enveloped sine synthesis and the RIFF/WAVE container.

/// Sine tone parameters and sample synthesis.
pub mod tone;
/// RIFF/WAVE container.
pub mod wav;
