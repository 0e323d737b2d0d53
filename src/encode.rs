//! Encoding through external command-line tools.

/// MP3 transcoding via the system `ffmpeg` or `lame` binaries.
pub mod mp3;
