//! User configuration: timeline tuning and keybindings.
//!
//! Stored as TOML at `$XDG_CONFIG_HOME/scroll-scenes/config.toml`
//! (default `~/.config/scroll-scenes/config.toml`):
//!
//! ```toml
//! [timeline]
//! lerp_factor = 0.2
//! throttle_ms = 0
//!
//! [keys]
//! scroll_down = "j, Down"
//! quit = "q, Ctrl+c"
//! ```
//!
//! A missing file means defaults.  A broken one is logged and ignored.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Deserialize;

use crate::core::tuning::TimelineConfig;

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ScrollDown,
    ScrollUp,
    PageDown,
    PageUp,
    Top,
    Bottom,
    Quit,
}

impl Action {
    /// Ordered list of all actions.
    pub const ALL: &'static [Action] = &[
        Action::ScrollDown,
        Action::ScrollUp,
        Action::PageDown,
        Action::PageUp,
        Action::Top,
        Action::Bottom,
        Action::Quit,
    ];

    /// Key used in the config file.
    fn config_key(self) -> &'static str {
        match self {
            Action::ScrollDown => "scroll_down",
            Action::ScrollUp => "scroll_up",
            Action::PageDown => "page_down",
            Action::PageUp => "page_up",
            Action::Top => "top",
            Action::Bottom => "bottom",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding: key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Does this binding match a key event?  Only CTRL/ALT/SHIFT modifiers
    /// are compared (platform-specific modifiers like SUPER are ignored).
    /// SHIFT is already folded into character keys (`G` vs `g`).
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mask = match self.code {
            KeyCode::Char(_) => KeyModifiers::CONTROL | KeyModifiers::ALT,
            _ => KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT,
        };
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    /// User-friendly display string (e.g. `"Ctrl+c"`, `"↓"`, `"q"`).
    pub fn display(&self) -> String {
        let mut s = String::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            s.push_str("Ctrl+");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            s.push_str("Alt+");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            s.push_str("Shift+");
        }
        s.push_str(&match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "↑".into(),
            KeyCode::Down => "↓".into(),
            KeyCode::Home => "Home".into(),
            KeyCode::End => "End".into(),
            KeyCode::PageUp => "PgUp".into(),
            KeyCode::PageDown => "PgDn".into(),
            KeyCode::Esc => "Esc".into(),
            other => format!("{other:?}"),
        });
        s
    }

    /// Parse a key string like `"Ctrl+c"`, `"Shift+Down"`, `"q"`, `"PgDn"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let key_part = parts.last()?;

        for &part in &parts[..parts.len() - 1] {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            _ if key_part.chars().count() == 1 => KeyCode::Char(key_part.chars().next()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

// ───────────────────────────────────────── config ────────────

/// Application configuration: keybindings and timeline tuning.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    pub timeline: TimelineConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            timeline: TimelineConfig::default(),
        }
    }
}

/// On-disk shape of the config file.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    timeline: TimelineConfig,
    #[serde(default)]
    keys: BTreeMap<String, String>,
}

impl AppConfig {
    /// Built-in keybindings.
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        let n = KeyModifiers::NONE;
        let ctrl = KeyModifiers::CONTROL;
        let bind = |code| KeyBind::new(code, n);
        let mut m = HashMap::new();

        m.insert(Action::ScrollDown, vec![bind(KeyCode::Down), bind(KeyCode::Char('j'))]);
        m.insert(Action::ScrollUp, vec![bind(KeyCode::Up), bind(KeyCode::Char('k'))]);
        m.insert(Action::PageDown, vec![bind(KeyCode::PageDown), bind(KeyCode::Char(' '))]);
        m.insert(Action::PageUp, vec![bind(KeyCode::PageUp), bind(KeyCode::Char('b'))]);
        m.insert(Action::Top, vec![bind(KeyCode::Home), bind(KeyCode::Char('g'))]);
        m.insert(Action::Bottom, vec![bind(KeyCode::End), bind(KeyCode::Char('G'))]);
        m.insert(
            Action::Quit,
            vec![
                bind(KeyCode::Char('q')),
                bind(KeyCode::Esc),
                KeyBind::new(KeyCode::Char('c'), ctrl),
            ],
        );

        m
    }

    /// Find the action that matches a key event.  When multiple bindings
    /// match, the one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<Action> = None;
        let mut best_mod_count = 0;

        for (&action, binds) in &self.bindings {
            for bind in binds {
                if bind.matches(event) {
                    let mc = bind.modifiers.bits().count_ones();
                    if best.is_none() || mc > best_mod_count {
                        best = Some(action);
                        best_mod_count = mc;
                    }
                }
            }
        }
        best
    }

    /// Short display of the first binding only (for the status bar).
    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Build the status-bar hint string from current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}/{}: scroll | {}: page | {}: quit",
            self.short_binding(Action::ScrollDown),
            self.short_binding(Action::ScrollUp),
            self.short_binding(Action::PageDown),
            self.short_binding(Action::Quit),
        )
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from the default location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    /// Load config from `path`.  Never fails: problems are logged.
    pub fn load_from(path: &Path) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot read config, using defaults");
                return Self::default();
            }
        };
        match Self::parse(&contents) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "invalid config, using defaults");
                Self::default()
            }
        }
    }

    /// Parse a config document.  Unknown actions and unparsable keys are
    /// skipped; out-of-range tuning is an error.
    pub fn parse(s: &str) -> anyhow::Result<Self> {
        let file: ConfigFile = toml::from_str(s)?;
        file.timeline.validate()?;

        let mut bindings = Self::default_bindings();
        for (key, value) in &file.keys {
            let Some(action) = Action::from_config_key(key) else {
                tracing::warn!(action = %key, "unknown action in [keys]");
                continue;
            };
            let parsed: Vec<KeyBind> = value
                .split(',')
                .map(str::trim)
                .filter_map(KeyBind::parse)
                .collect();
            if !parsed.is_empty() {
                bindings.insert(action, parsed);
            }
        }

        Ok(Self {
            bindings,
            timeline: file.timeline,
        })
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/scroll-scenes/config.toml`).
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("scroll-scenes").join("config.toml")
}
