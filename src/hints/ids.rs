//! Hint identifier definitions and raw-value mapping

/// Base hint set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum HintId {
    /// Display pipeline wants uninterrupted frame delivery
    Vsync = 1,
    /// User touched or interacted with the screen
    Interaction = 2,
    VideoEncode = 3,
    VideoDecode = 4,
    /// Battery saver engaged
    LowPower = 5,
    /// Long-running workload wants stable clocks over peak clocks
    SustainedPerformance = 6,
    VrMode = 7,
    /// App launch in progress
    Launch = 8,
}

impl HintId {
    /// Map a raw wire value to a base hint, `None` if unrecognized
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            1 => Some(Self::Vsync),
            2 => Some(Self::Interaction),
            3 => Some(Self::VideoEncode),
            4 => Some(Self::VideoDecode),
            5 => Some(Self::LowPower),
            6 => Some(Self::SustainedPerformance),
            7 => Some(Self::VrMode),
            8 => Some(Self::Launch),
            _ => None,
        }
    }

    /// Backend action name for this hint
    pub fn name(&self) -> &'static str {
        match self {
            Self::Vsync => "VSYNC",
            Self::Interaction => "INTERACTION",
            Self::VideoEncode => "VIDEO_ENCODE",
            Self::VideoDecode => "VIDEO_DECODE",
            Self::LowPower => "LOW_POWER",
            Self::SustainedPerformance => "SUSTAINED_PERFORMANCE",
            Self::VrMode => "VR_MODE",
            Self::Launch => "LAUNCH",
        }
    }
}

impl std::fmt::Display for HintId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Extension hint set
///
/// A superset of [`HintId`] by numeric overlap: values 1 through 8 are the
/// base hints, 9 and up are extension-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExtHintId {
    Vsync = 1,
    Interaction = 2,
    VideoEncode = 3,
    VideoDecode = 4,
    LowPower = 5,
    SustainedPerformance = 6,
    VrMode = 7,
    Launch = 8,
    /// Continuous audio playback wants steady throughput
    AudioStreaming = 9,
    /// Pro-audio path wants minimal buffer latency
    AudioLowLatency = 10,
    CameraLaunch = 11,
    CameraStreaming = 12,
    CameraShot = 13,
}

impl ExtHintId {
    /// Map a raw wire value to an extended hint, `None` if unrecognized
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            1 => Some(Self::Vsync),
            2 => Some(Self::Interaction),
            3 => Some(Self::VideoEncode),
            4 => Some(Self::VideoDecode),
            5 => Some(Self::LowPower),
            6 => Some(Self::SustainedPerformance),
            7 => Some(Self::VrMode),
            8 => Some(Self::Launch),
            9 => Some(Self::AudioStreaming),
            10 => Some(Self::AudioLowLatency),
            11 => Some(Self::CameraLaunch),
            12 => Some(Self::CameraStreaming),
            13 => Some(Self::CameraShot),
            _ => None,
        }
    }

    /// Backend action name for this hint
    pub fn name(&self) -> &'static str {
        match self {
            Self::AudioStreaming => "AUDIO_STREAMING",
            Self::AudioLowLatency => "AUDIO_LOW_LATENCY",
            Self::CameraLaunch => "CAMERA_LAUNCH",
            Self::CameraStreaming => "CAMERA_STREAMING",
            Self::CameraShot => "CAMERA_SHOT",
            other => match other.base_hint() {
                Some(base) => base.name(),
                // Unreachable: values 1-8 always resolve to a base hint
                None => "UNKNOWN",
            },
        }
    }

    /// Resolve the numeric overlap into the base set
    ///
    /// Extension-only values (audio, camera) have no base counterpart and
    /// return `None`.
    pub fn base_hint(&self) -> Option<HintId> {
        HintId::from_raw(*self as i32)
    }
}

impl std::fmt::Display for ExtHintId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
