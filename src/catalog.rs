use crate::models::Mode;
use chrono::Weekday;

/// Kinds of surprise a fact post can aim for.
pub const WONDER_TYPES: &[&str] = &[
    "something that seems impossible but is mathematically proven true",
    "a simple question with a surprisingly complex or unsolved answer",
    "a pattern that appears unexpectedly across unrelated domains",
    "a problem that stumped mathematicians or physicists for decades (or centuries)",
    "something proven to exist but never directly observed",
    "two seemingly unrelated things that turn out to be mathematically equivalent",
    "a result that contradicts everyday intuition about how the world works",
    "a physical phenomenon that has no complete explanation yet",
    "an everyday object or experience that hides deep mathematical structure",
    "a limit or bound that nature seems to respect for mysterious reasons",
];

pub const TOPICS: &[&str] = &[
    "quantum mechanics",
    "number theory",
    "thermodynamics",
    "topology",
    "special or general relativity",
    "probability paradoxes",
    "chaos theory",
    "electromagnetism",
    "group theory and symmetry",
    "fluid dynamics",
    "prime numbers",
    "cosmology and the early universe",
    "game theory",
    "optics and light",
    "combinatorics",
    "statistical mechanics",
    "black holes",
    "wave phenomena",
    "graph theory",
    "orbital mechanics",
];

pub const FALLBACK_TOPIC: &str = "physics and math";

pub const CONNECTIONS_TOPIC: &str = "weekly synthesis";

/// Weekly posting plan, Monday first.
pub const SCHEDULE: [(Weekday, Mode); 7] = [
    (Weekday::Mon, Mode::Fact),
    (Weekday::Tue, Mode::Fact),
    (Weekday::Wed, Mode::WhatIf),
    (Weekday::Thu, Mode::Fact),
    (Weekday::Fri, Mode::Puzzle),
    (Weekday::Sat, Mode::Fact),
    (Weekday::Sun, Mode::Connections),
];

pub fn mode_for(weekday: Weekday) -> Mode {
    SCHEDULE
        .iter()
        .find(|(day, _)| *day == weekday)
        .map(|(_, mode)| *mode)
        .unwrap_or(Mode::Fact)
}

pub fn day_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
