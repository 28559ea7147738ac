use std::sync::Arc;

mod speech;

/// Reads a word aloud. Fire-and-forget; callers never wait for playback.
pub trait UiSpeaker: Send + Sync {
    fn speak(&self, text: &str);
}

pub type SpeakerRef = Arc<dyn UiSpeaker>;

pub use speech::DesktopSpeaker;
