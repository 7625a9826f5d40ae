// src/client/ui.rs
//
// Page-level UI state, modeled as plain state machines. All timing comes from
// caller-supplied `Instant`s so the reveal sequence and the secret-code toggle
// are testable without real delays; the view layer is expected to call
// `poll`/the accessors on its own render cadence.
use std::time::{Duration, Instant};

pub const HERO_PHRASES: [&str; 5] = [
    "own success",
    "grow louder",
    "take control",
    "sell out shows",
    "move as one",
];

pub const CHAT_SUGGESTIONS: [&str; 4] = [
    "What can Loop do for my release?",
    "How does MC build a growth plan?",
    "What data does Loop analyze?",
    "Can Loop help with touring?",
];

const SPHERE_REVEAL: Duration = Duration::from_secs(1);
const HERO_TEXT_REVEAL: Duration = Duration::from_secs(7);
const HERO_PHRASE_INTERVAL: Duration = Duration::from_secs(2);
const SUGGESTION_INTERVAL: Duration = Duration::from_millis(3500);

/// Timed hero reveals and rotating copy, all derived from elapsed time since
/// page load.
pub struct RevealSequence {
    start: Instant,
}

impl RevealSequence {
    pub fn new(start: Instant) -> Self {
        Self { start }
    }

    /// Pulsing lines show as soon as the page mounts.
    pub fn pulsing_visible(&self) -> bool {
        true
    }

    pub fn sphere_visible(&self, now: Instant) -> bool {
        now.duration_since(self.start) >= SPHERE_REVEAL
    }

    pub fn hero_text_visible(&self, now: Instant) -> bool {
        now.duration_since(self.start) >= HERO_TEXT_REVEAL
    }

    pub fn hero_phrase_index(&self, now: Instant) -> usize {
        let elapsed = now.duration_since(self.start);
        (elapsed.as_millis() / HERO_PHRASE_INTERVAL.as_millis()) as usize % HERO_PHRASES.len()
    }

    pub fn hero_phrase(&self, now: Instant) -> &'static str {
        HERO_PHRASES[self.hero_phrase_index(now)]
    }

    pub fn suggestion_index(&self, now: Instant) -> usize {
        let elapsed = now.duration_since(self.start);
        (elapsed.as_millis() / SUGGESTION_INTERVAL.as_millis()) as usize % CHAT_SUGGESTIONS.len()
    }

    pub fn suggestion(&self, now: Instant) -> &'static str {
        CHAT_SUGGESTIONS[self.suggestion_index(now)]
    }
}

/// Title-case a phrase for the hero display.
pub fn title_case(input: &str) -> String {
    input
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

/// Site theme flag. The stored preference wins; without one the site starts
/// dark regardless of the system hint.
pub struct ThemeState {
    theme: Theme,
}

impl ThemeState {
    pub fn init(stored: Option<Theme>) -> Self {
        Self {
            theme: stored.unwrap_or(Theme::Dark),
        }
    }

    /// Flip the theme and return the value the caller should persist.
    pub fn toggle(&mut self) -> Theme {
        self.theme = match self.theme {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        };
        self.theme
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn is_dark(&self) -> bool {
        self.theme == Theme::Dark
    }
}

const SECRET_TOGGLE_CLICKS: u32 = 2;
const SECRET_MODE_TIMEOUT: Duration = Duration::from_secs(30);

/// Join-button Easter egg: a second click flips the waitlist form into
/// secret-code mode. Entering arms a 30-second auto-reset; submitting a code
/// or the timeout leaves the mode.
#[derive(Default)]
pub struct SecretCodeToggle {
    clicks: u32,
    active: bool,
    deadline: Option<Instant>,
}

impl SecretCodeToggle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a Join-button click. Returns true when the mode flipped.
    pub fn click(&mut self, now: Instant) -> bool {
        self.clicks += 1;
        if self.clicks < SECRET_TOGGLE_CLICKS {
            return false;
        }
        self.clicks = 0;
        self.active = !self.active;
        self.deadline = self.active.then(|| now + SECRET_MODE_TIMEOUT);
        true
    }

    /// Apply the inactivity auto-reset.
    pub fn poll(&mut self, now: Instant) {
        if self.deadline.is_some_and(|deadline| now >= deadline) {
            self.active = false;
            self.deadline = None;
        }
    }

    /// A code was submitted; the form returns to waitlist mode. Handling the
    /// code itself is up to the caller.
    pub fn submit_code(&mut self) {
        self.active = false;
        self.deadline = None;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}
