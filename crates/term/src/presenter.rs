//! TermPresenter: the terminal side of the presentation port.
//!
//! The orchestrator calls into it synchronously; it only records state.
//! [`StageView`](crate::StageView) reads that state every frame, and the
//! frame loop drains the pending bell.

use std::time::Duration;

use tracing::debug;

use crate::core::Presenter;
use crate::types::Cue;

/// How long a success/failure banner stays up.
pub const FLASH_DURATION: Duration = Duration::from_millis(1200);

type Voice = Box<dyn FnMut(&str)>;

pub struct TermPresenter {
    prompt: Option<String>,
    prompt_age: Duration,
    flash: Option<(Cue, Duration)>,
    bell_pending: bool,
    voice: Option<Voice>,
    last_spoken: Option<String>,
    cues_played: u64,
}

impl TermPresenter {
    pub fn new() -> Self {
        Self {
            prompt: None,
            prompt_age: Duration::ZERO,
            flash: None,
            bell_pending: false,
            voice: None,
            last_spoken: None,
            cues_played: 0,
        }
    }

    /// Route narration to `voice` (for example a TTS narrator).
    pub fn with_voice(mut self, voice: impl FnMut(&str) + 'static) -> Self {
        self.voice = Some(Box::new(voice));
        self
    }

    /// Advance animation clocks by one frame.
    pub fn update(&mut self, dt: Duration) {
        self.prompt_age += dt;
        self.flash = self
            .flash
            .map(|(cue, left)| (cue, left.saturating_sub(dt)))
            .filter(|(_, left)| !left.is_zero());
    }

    pub fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref()
    }

    /// Time since the current prompt was shown.
    pub fn prompt_age(&self) -> Duration {
        self.prompt_age
    }

    /// The cue currently flashing, if any.
    pub fn flash(&self) -> Option<Cue> {
        self.flash.map(|(cue, _)| cue)
    }

    pub fn take_bell(&mut self) -> bool {
        std::mem::take(&mut self.bell_pending)
    }

    pub fn last_spoken(&self) -> Option<&str> {
        self.last_spoken.as_deref()
    }

    pub fn cues_played(&self) -> u64 {
        self.cues_played
    }
}

impl Default for TermPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl Presenter for TermPresenter {
    fn reset_view(&mut self) {
        self.flash = None;
        self.prompt = None;
        self.prompt_age = Duration::ZERO;
    }

    fn play_cue(&mut self, cue: Cue) {
        debug!(cue = cue.as_str(), "cue");
        self.flash = Some((cue, FLASH_DURATION));
        self.bell_pending = true;
        self.cues_played += 1;
    }

    fn show_prompt(&mut self, prompt: &str) {
        self.prompt = Some(prompt.to_string());
        self.prompt_age = Duration::ZERO;
    }

    fn speak(&mut self, text: &str) {
        self.last_spoken = Some(text.to_string());
        if let Some(voice) = &mut self.voice {
            voice(text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn flash_expires_after_duration() {
        let mut p = TermPresenter::new();
        p.play_cue(Cue::Failure);
        assert_eq!(p.flash(), Some(Cue::Failure));
        assert!(p.take_bell());
        assert!(!p.take_bell());

        p.update(FLASH_DURATION - Duration::from_millis(1));
        assert_eq!(p.flash(), Some(Cue::Failure));
        p.update(Duration::from_millis(1));
        assert_eq!(p.flash(), None);
    }

    #[test]
    fn reset_view_clears_flash_and_prompt() {
        let mut p = TermPresenter::new();
        p.show_prompt("Squeeze!");
        p.play_cue(Cue::Success);
        p.reset_view();
        assert_eq!(p.flash(), None);
        assert_eq!(p.prompt(), None);
    }

    #[test]
    fn speak_forwards_to_voice() {
        let heard = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&heard);
        let mut p = TermPresenter::new().with_voice(move |t| sink.borrow_mut().push(t.to_string()));
        p.speak("Get the fish!");
        assert_eq!(heard.borrow().as_slice(), ["Get the fish!".to_string()]);
        assert_eq!(p.last_spoken(), Some("Get the fish!"));
    }
}
