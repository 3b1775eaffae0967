//! Player-facing messages and the message log.
//!
//! Gameplay never prints: command handlers return [`Message`]s, and the
//! scheduler forwards them to a [`MessageSink`]. [`GameLog`] is the stock
//! sink, keeping a bounded history for a log panel.

/// Tone of a message, mapped to display colour by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Channel {
    #[default]
    Normal,
    /// The player character's inner voice.
    Thought,
    Angry,
}

/// One player-facing line of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub channel: Channel,
}

impl Message {
    pub fn new(text: impl Into<String>, channel: Channel) -> Self {
        Self {
            text: text.into(),
            channel,
        }
    }

    /// A message built from a `%s` template.
    pub fn format(template: &str, subject: &str, channel: Channel) -> Self {
        Self::new(format_template(template, subject), channel)
    }
}

/// Replace every `%s` in `template` with `subject`, then capitalize the
/// first character.
pub fn format_template(template: &str, subject: &str) -> String {
    uppercase_first(&template.replace("%s", subject))
}

/// Receiver of player-facing messages, called synchronously in order.
pub trait MessageSink {
    fn emit(&mut self, message: &str, channel: Channel);

    /// Called once at the end of every tick, after its last message.
    fn end_tick(&mut self) {}
}

impl MessageSink for Vec<Message> {
    fn emit(&mut self, message: &str, channel: Channel) {
        self.push(Message::new(message, channel));
    }
}

/// Discards every message.
impl MessageSink for () {
    fn emit(&mut self, _message: &str, _channel: Channel) {}
}

/// A single log entry.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub text: String,
    pub channel: Channel,
    /// First entry of a new tick.
    pub tick: bool,
    /// Number of folded repeats.
    pub dups: u32,
}

const MAX_ENTRIES: usize = 10_000;
const TRIM_ENTRIES: usize = 1_000;

/// The game's message history.
#[derive(Debug, Clone, Default)]
pub struct GameLog {
    pub entries: Vec<LogEntry>,
    next_tick: bool,
}

impl GameLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the start of a new tick (next entry gets a tick marker).
    pub fn new_turn(&mut self) {
        self.next_tick = true;
    }

    /// Append a message, folding it into the previous entry when it is an
    /// identical repeat within the same tick.
    pub fn log(&mut self, text: &str, channel: Channel) {
        if let Some(last) = self.entries.last_mut() {
            if last.text == text && last.channel == channel && !self.next_tick {
                last.dups += 1;
                return;
            }
        }

        self.entries.push(LogEntry {
            text: text.to_string(),
            channel,
            tick: self.next_tick,
            dups: 0,
        });
        self.next_tick = false;

        if self.entries.len() > MAX_ENTRIES {
            self.entries.drain(0..TRIM_ENTRIES);
        }
    }

    /// The most recent entries formatted as display lines, oldest first.
    pub fn recent_lines(&self, max_lines: usize) -> Vec<String> {
        let mut lines: Vec<String> = self
            .entries
            .iter()
            .rev()
            .take(max_lines)
            .map(|e| {
                let mut s = String::new();
                if e.tick {
                    s.push_str("• ");
                }
                s.push_str(&e.text);
                if e.dups > 0 {
                    s.push_str(&format!(" ({}×)", e.dups + 1));
                }
                s
            })
            .collect();
        lines.reverse();
        lines
    }
}

impl MessageSink for GameLog {
    fn emit(&mut self, message: &str, channel: Channel) {
        self.log(message, channel);
    }

    fn end_tick(&mut self) {
        self.new_turn();
    }
}

fn uppercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().to_string() + chars.as_str(),
    }
}
