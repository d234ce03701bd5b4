use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use gamma40::PausePolicy;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Start with playback paused
    #[arg(long, default_value_t = false)]
    pub paused: bool,

    /// Start with the continuous 1kHz test tone instead of the 40Hz pulses
    #[arg(long, default_value_t = false)]
    pub test_tone: bool,

    /// What the pulse clock does while paused
    #[arg(long, value_enum, default_value_t = PauseArg::FreeRunning)]
    pub pause_policy: PauseArg,

    /// Device buffer size in frames (0 = device default)
    #[arg(long, default_value_t = 1024)]
    pub buffer_frames: u32,

    /// Run without the terminal UI, logging status to stderr
    #[arg(long, default_value_t = false)]
    pub headless: bool,

    /// Stop after this many seconds (headless only)
    #[arg(long, value_name = "SECS", requires = "headless")]
    pub duration: Option<u64>,

    /// Write logs to this file (the terminal UI discards them otherwise)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseArg {
    /// Keep counting while muted; resume mid-schedule
    FreeRunning,
    /// Freeze the clock; resume where playback stopped
    Hold,
}

impl From<PauseArg> for PausePolicy {
    fn from(arg: PauseArg) -> Self {
        match arg {
            PauseArg::FreeRunning => PausePolicy::FreeRunning,
            PauseArg::Hold => PausePolicy::Hold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_protocol() {
        let args = Args::try_parse_from(["gamma40"]).unwrap();
        assert!(!args.paused);
        assert!(!args.test_tone);
        assert_eq!(args.pause_policy, PauseArg::FreeRunning);
        assert_eq!(args.buffer_frames, 1024);
        assert!(!args.headless);
    }

    #[test]
    fn duration_requires_headless() {
        assert!(Args::try_parse_from(["gamma40", "--duration", "5"]).is_err());
        let args = Args::try_parse_from(["gamma40", "--headless", "--duration", "5"]).unwrap();
        assert_eq!(args.duration, Some(5));
    }

    #[test]
    fn hold_policy_parses() {
        let args = Args::try_parse_from(["gamma40", "--pause-policy", "hold"]).unwrap();
        assert_eq!(PausePolicy::from(args.pause_policy), PausePolicy::Hold);
    }
}
