//! Background theme chosen from the current condition text.

/// 24-bit colour used for the gradient stops.
pub type Rgb = (u8, u8, u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Theme {
    Rain,
    Cloudy,
    Mist,
    Clear,
    Snow,
    Thunder,
    Default,
}

/// Keywords in priority order. The first listed keyword contained in the text wins.
const KEYWORDS: [(&str, Theme); 8] = [
    ("rain", Theme::Rain),
    ("drizzle", Theme::Rain),
    ("cloud", Theme::Cloudy),
    ("mist", Theme::Mist),
    ("fog", Theme::Mist),
    ("clear", Theme::Clear),
    ("snow", Theme::Snow),
    ("thunder", Theme::Thunder),
];

/// Classify a condition text into a theme (case-insensitive substring match).
pub fn weather_gradient(condition: &str) -> Theme {
    let text = condition.to_lowercase();

    KEYWORDS
        .iter()
        .find(|(word, _)| text.contains(word))
        .map(|(_, theme)| *theme)
        .unwrap_or(Theme::Default)
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Rain => "rain",
            Theme::Cloudy => "cloudy",
            Theme::Mist => "mist",
            Theme::Clear => "clear",
            Theme::Snow => "snow",
            Theme::Thunder => "thunder",
            Theme::Default => "default",
        }
    }

    /// Gradient stops, top-left to bottom-right.
    pub fn stops(&self) -> [Rgb; 3] {
        match self {
            Theme::Rain => [(55, 65, 81), (30, 58, 138), (0, 0, 0)],
            Theme::Cloudy => [(147, 197, 253), (147, 197, 253), (37, 99, 235)],
            Theme::Mist => [(192, 132, 252), (156, 163, 175), (55, 65, 81)],
            Theme::Clear => [(250, 204, 21), (251, 191, 36), (107, 114, 128)],
            Theme::Snow => [(165, 243, 252), (255, 255, 255), (147, 197, 253)],
            Theme::Thunder => [(0, 0, 0), (17, 24, 39), (202, 138, 4)],
            Theme::Default => [(99, 102, 241), (147, 51, 234), (75, 85, 99)],
        }
    }

    /// Colour used for borders and highlights.
    pub fn accent(&self) -> Rgb {
        self.stops()[1]
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
