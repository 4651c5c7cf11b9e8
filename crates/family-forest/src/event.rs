//! Output events.
//!
//! Every line the program writes is an [`Event`]. Operations that emit
//! events take an [`EventLog`] explicitly instead of writing to shared state.

use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// One line per ancestor passed on the way down an insertion.
    Welcomed { host: String, guest: String },
    /// Exactly one line per removal.
    Departed {
        name: String,
        replacement: Option<String>,
    },
    Target { name: String, key: f64 },
    Rank { members: Vec<(String, f64)> },
    Division { count: usize },
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Welcomed { host, guest } => write!(f, "{host} welcomed {guest}"),
            Event::Departed { name, replacement } => write!(
                f,
                "{name} left the family, replaced by {}",
                replacement.as_deref().unwrap_or("nobody")
            ),
            Event::Target { name, key } => {
                write!(f, "Target Analysis Result: {name} {}", fmt_key(*key))
            }
            Event::Rank { members } => {
                f.write_str("Rank Analysis Result:")?;
                for (name, key) in members {
                    write!(f, " {name} {}", fmt_key(*key))?;
                }
                Ok(())
            }
            Event::Division { count } => write!(f, "Division Analysis Result: {count}"),
        }
    }
}

/// Renders a key with three decimals, rounding half up.
///
/// Rounding works on the shortest decimal form of the value (what `{}`
/// prints), not on its exact binary expansion, so `2.0625` gives `2.063` and
/// `1.0005` gives `1.001` where `{:.3}` would round down.
pub fn fmt_key(key: f64) -> String {
    if !key.is_finite() {
        return key.to_string();
    }

    let shortest = key.abs().to_string();
    let (int_part, frac_part) = shortest.split_once('.').unwrap_or((&shortest, ""));
    let frac = frac_part.as_bytes();

    // Integer digits followed by exactly three fraction digits.
    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain((0..3).map(|i| frac.get(i).copied().unwrap_or(b'0')))
        .map(|b| b - b'0')
        .collect();

    if frac.get(3).is_some_and(|&b| b >= b'5') {
        let mut i = digits.len();
        loop {
            if i == 0 {
                digits.insert(0, 1);
                break;
            }
            i -= 1;
            if digits[i] == 9 {
                digits[i] = 0;
            } else {
                digits[i] += 1;
                break;
            }
        }
    }

    let point = digits.len() - 3;
    let mut out = String::with_capacity(digits.len() + 2);
    if key.is_sign_negative() {
        out.push('-');
    }
    for (i, d) in digits.iter().enumerate() {
        if i == point {
            out.push('.');
        }
        out.push(char::from(b'0' + d));
    }
    out
}

/// Append-only, ordered event sink.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: Event) {
        log::debug!("event: {event}");
        self.events.push(event);
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Rendered lines, without terminators.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.events.iter().map(|e| e.to_string())
    }

    /// All lines, each terminated by `\n`.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in self.lines() {
            out.push_str(&line);
            out.push('\n');
        }
        out
    }
}
