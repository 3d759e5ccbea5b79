// Audio source component
//
// The runner never mixes audio itself. It assigns a clip and asks for it to
// be played; those requests are queued as commands for the audio backend.

use log::warn;

use super::assets::SoundHandle;

/// Commands drained by the audio backend once per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCommand {
    /// Start playback of a clip from the beginning
    Play(SoundHandle),
}

/// Anything that can play a single assigned clip
pub trait AudioPlayer {
    /// Replace the active clip (does not start playback)
    fn set_clip(&mut self, clip: SoundHandle);

    /// Play the active clip, interrupting whatever was playing
    fn play(&mut self);
}

/// Audio source attached to a character
#[derive(Debug, Default)]
pub struct AudioSource {
    /// Currently assigned clip
    clip: Option<SoundHandle>,
    /// Pending commands for the backend
    commands: Vec<AudioCommand>,
    /// Clip of the last play request
    playing: Option<SoundHandle>,
}

impl AudioSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a source with a clip already assigned
    pub fn with_clip(clip: SoundHandle) -> Self {
        Self {
            clip: Some(clip),
            ..Self::default()
        }
    }

    /// Get the assigned clip
    pub fn clip(&self) -> Option<SoundHandle> {
        self.clip
    }

    /// Clip most recently started, if any
    pub fn playing(&self) -> Option<SoundHandle> {
        self.playing
    }

    /// Check whether a play request has been made for the assigned clip
    pub fn is_playing(&self) -> bool {
        self.playing.is_some() && self.playing == self.clip
    }

    /// Commands queued since the last drain
    pub fn pending(&self) -> &[AudioCommand] {
        &self.commands
    }

    /// Take all queued commands
    pub fn drain(&mut self) -> Vec<AudioCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl AudioPlayer for AudioSource {
    fn set_clip(&mut self, clip: SoundHandle) {
        self.clip = Some(clip);
    }

    fn play(&mut self) {
        let Some(clip) = self.clip else {
            warn!("Audio source asked to play with no clip assigned");
            return;
        };

        self.playing = Some(clip);
        self.commands.push(AudioCommand::Play(clip));
    }
}
