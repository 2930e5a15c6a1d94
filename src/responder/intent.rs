use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Greeting,
    Farewell,
    Thanks,
    HowAreYou,
    WhoAreYou,
    Love,
    Angry,
    Meaning,
    Crypto,
    Stocks,
    Market,
    Help,
    Funny,
    Weather,
    Food,
}

impl Intent {
    pub const ALL: [Intent; 15] = [
        Intent::Greeting,
        Intent::Farewell,
        Intent::Thanks,
        Intent::HowAreYou,
        Intent::WhoAreYou,
        Intent::Love,
        Intent::Angry,
        Intent::Meaning,
        Intent::Crypto,
        Intent::Stocks,
        Intent::Market,
        Intent::Help,
        Intent::Funny,
        Intent::Weather,
        Intent::Food,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Greeting => "greeting",
            Intent::Farewell => "farewell",
            Intent::Thanks => "thanks",
            Intent::HowAreYou => "how_are_you",
            Intent::WhoAreYou => "who_are_you",
            Intent::Love => "love",
            Intent::Angry => "angry",
            Intent::Meaning => "meaning",
            Intent::Crypto => "crypto",
            Intent::Stocks => "stocks",
            Intent::Market => "market",
            Intent::Help => "help",
            Intent::Funny => "funny",
            Intent::Weather => "weather",
            Intent::Food => "food",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Intent {
    type Err = String;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Intent::ALL
            .iter()
            .copied()
            .find(|intent| intent.as_str() == tag)
            .ok_or_else(|| format!("Unknown intent: {}", tag))
    }
}
