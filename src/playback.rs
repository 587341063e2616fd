use log::debug;

use crate::clients::{
    Song,
    errors::{Error, Result},
};

/// What the audio layer should do after a toggle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Start streaming the preview, stopping `stopped` first if set
    Started { stopped: Option<String> },
    Paused,
    Resumed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Current {
    url: String,
    playing: bool,
}

/// The one preview clip the presentation layer may be playing.
///
/// Owned by whoever renders songs; starting a preview stops the previous one,
/// toggling the same preview pauses or resumes it.
#[derive(Debug, Default)]
pub struct PlaybackSession {
    current: Option<Current>,
}

impl PlaybackSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, song: &Song) -> Result<Transition> {
        let url = song.preview_url.as_deref().ok_or(Error::NoPreviewError)?;

        match &mut self.current {
            Some(current) if current.url == url => {
                current.playing = !current.playing;
                let transition = if current.playing {
                    Transition::Resumed
                } else {
                    Transition::Paused
                };
                debug!("{transition:?} preview of {:?}", song.title);
                Ok(transition)
            }
            _ => {
                let stopped = self.current.take().map(|c| c.url);
                self.current = Some(Current {
                    url: url.to_string(),
                    playing: true,
                });
                debug!("Started preview of {:?}", song.title);
                Ok(Transition::Started { stopped })
            }
        }
    }

    // Clip reached its end: the next toggle restarts it
    pub fn finished(&mut self) {
        self.current = None;
    }

    pub fn stop(&mut self) -> Option<String> {
        self.current.take().map(|c| c.url)
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_ref().map(|c| c.url.as_str())
    }

    pub fn is_playing(&self) -> bool {
        self.current.as_ref().is_some_and(|c| c.playing)
    }
}
