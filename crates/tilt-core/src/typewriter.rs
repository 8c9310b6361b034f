//! Typewriter text loop: types a sentence, pauses, deletes it and moves on to
//! the next one.
//!
//! The machine is timer-agnostic. A host asks for [`Typewriter::next_delay`],
//! waits that long on its own timer, then calls [`Typewriter::tick`].

use crate::constants::{
    TYPEWRITER_DEFAULT_COLOR, TYPEWRITER_DELETING_SPEED_MS, TYPEWRITER_PAUSE_MS,
    TYPEWRITER_TYPING_SPEED_MS,
};
use crate::error::{Result, TiltError};
use rand::Rng;

/// Per-character typing delay drawn uniformly from `min..=max` milliseconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpeedRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TypewriterConfig {
    pub typing_speed_ms: f64,
    pub initial_delay_ms: f64,
    pub pause_ms: f64,
    pub deleting_speed_ms: f64,
    pub looping: bool,
    pub variable_speed: Option<SpeedRange>,
    pub reverse: bool,
    pub hide_cursor_while_typing: bool,
    pub text_colors: Vec<String>,
    /// Hold the first character until the host reports the text on screen.
    pub start_on_visible: bool,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            typing_speed_ms: TYPEWRITER_TYPING_SPEED_MS,
            initial_delay_ms: 0.0,
            pause_ms: TYPEWRITER_PAUSE_MS,
            deleting_speed_ms: TYPEWRITER_DELETING_SPEED_MS,
            looping: true,
            variable_speed: None,
            reverse: false,
            hide_cursor_while_typing: false,
            text_colors: Vec::new(),
            start_on_visible: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypewriterEvent {
    Typed,
    StartDeleting,
    Deleted,
    /// The sentence at `index` has been fully deleted.
    SentenceComplete { index: usize },
    NextSentence { index: usize },
    /// Non-looping run ended after the last sentence.
    Finished,
}

#[derive(Clone, Debug)]
pub struct Typewriter {
    config: TypewriterConfig,
    sentences: Vec<Vec<char>>,
    index: usize,
    chars: usize,
    deleting: bool,
    // current sentence has reported SentenceComplete
    completed: bool,
    finished: bool,
}

impl Typewriter {
    pub fn new<I, T>(sentences: I, config: TypewriterConfig) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let sentences: Vec<Vec<char>> = sentences
            .into_iter()
            .map(|s| {
                let mut chars: Vec<char> = s.as_ref().chars().collect();
                if config.reverse {
                    chars.reverse();
                }
                chars
            })
            .collect();
        if sentences.is_empty() {
            return Err(TiltError::NoSentences);
        }
        if let Some(SpeedRange { min, max }) = config.variable_speed {
            if !(min.is_finite() && max.is_finite()) || min < 0.0 || min > max {
                return Err(TiltError::InvalidSpeedRange { min, max });
            }
        }
        Ok(Self {
            config,
            sentences,
            index: 0,
            chars: 0,
            deleting: false,
            completed: false,
            finished: false,
        })
    }

    fn current(&self) -> &[char] {
        &self.sentences[self.index]
    }

    fn typing_delay<R: Rng>(&self, rng: &mut R) -> f64 {
        match self.config.variable_speed {
            Some(SpeedRange { min, max }) => rng.gen_range(min..=max),
            None => self.config.typing_speed_ms,
        }
    }

    /// Milliseconds until the next [`tick`](Self::tick), or `None` when the
    /// machine has nothing left to do.
    pub fn next_delay<R: Rng>(&self, rng: &mut R) -> Option<f64> {
        if self.finished {
            return None;
        }
        let total = self.current().len();
        match (self.deleting, self.chars) {
            (false, 0) if total > 0 && self.config.initial_delay_ms > 0.0 => {
                Some(self.config.initial_delay_ms)
            }
            (false, n) if n < total => Some(self.typing_delay(rng)),
            (false, _) => {
                (self.sentences.len() > 1 || self.config.looping).then_some(self.config.pause_ms)
            }
            (true, n) if n > 0 || !self.completed => Some(self.config.deleting_speed_ms),
            (true, _) => Some(self.config.pause_ms),
        }
    }

    /// Perform the step that [`next_delay`](Self::next_delay) was timing.
    pub fn tick(&mut self) -> Option<TypewriterEvent> {
        if self.finished {
            return None;
        }
        let total = self.current().len();
        if !self.deleting {
            if self.chars < total {
                self.chars += 1;
                return Some(TypewriterEvent::Typed);
            }
            if self.sentences.len() > 1 || self.config.looping {
                self.deleting = true;
                return Some(TypewriterEvent::StartDeleting);
            }
            return None;
        }
        if self.chars > 0 {
            self.chars -= 1;
            if self.chars > 0 {
                return Some(TypewriterEvent::Deleted);
            }
        }
        // an empty sentence reaches here without deleting anything
        if !self.completed {
            self.completed = true;
            return Some(TypewriterEvent::SentenceComplete { index: self.index });
        }
        if !self.config.looping && self.index == self.sentences.len() - 1 {
            self.deleting = false;
            self.finished = true;
            log::debug!("[typewriter] finished after sentence {}", self.index);
            return Some(TypewriterEvent::Finished);
        }
        self.index = (self.index + 1) % self.sentences.len();
        self.deleting = false;
        self.completed = false;
        self.chars = 0;
        Some(TypewriterEvent::NextSentence { index: self.index })
    }

    /// Text currently on screen.
    pub fn text(&self) -> String {
        self.current()[..self.chars].iter().collect()
    }

    pub fn sentence_index(&self) -> usize {
        self.index
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    pub fn config(&self) -> &TypewriterConfig {
        &self.config
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn cursor_hidden(&self) -> bool {
        self.config.hide_cursor_while_typing
            && (self.chars < self.current().len() || self.deleting)
    }

    pub fn color(&self) -> &str {
        let colors = &self.config.text_colors;
        if colors.is_empty() {
            TYPEWRITER_DEFAULT_COLOR
        } else {
            colors[self.index % colors.len()].as_str()
        }
    }
}
