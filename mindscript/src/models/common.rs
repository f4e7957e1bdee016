use serde::{Deserialize, Serialize};

/// Mood label attached to a journal entry.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default, utoipa::ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Positive,
    Negative,
    #[default]
    Neutral,
    Mixed,
}

impl Mood {
    pub const ALL: [Mood; 4] = [Mood::Positive, Mood::Mixed, Mood::Neutral, Mood::Negative];

    /// Dashboard score: positive=4, mixed=3, neutral=2, negative=1.
    pub fn score(self) -> u8 {
        match self {
            Self::Positive => 4,
            Self::Mixed => 3,
            Self::Neutral => 2,
            Self::Negative => 1,
        }
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Positive => write!(f, "positive"),
            Self::Negative => write!(f, "negative"),
            Self::Neutral => write!(f, "neutral"),
            Self::Mixed => write!(f, "mixed"),
        }
    }
}

impl std::str::FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "positive" => Ok(Self::Positive),
            "negative" => Ok(Self::Negative),
            "neutral" => Ok(Self::Neutral),
            "mixed" => Ok(Self::Mixed),
            _ => Err(format!("Unknown mood: {s}")),
        }
    }
}

/// Community reaction kinds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReactionType {
    Heart,
    Support,
    Strength,
}

impl ReactionType {
    pub const ALL: [ReactionType; 3] = [Self::Heart, Self::Support, Self::Strength];
}

impl std::fmt::Display for ReactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Heart => write!(f, "heart"),
            Self::Support => write!(f, "support"),
            Self::Strength => write!(f, "strength"),
        }
    }
}

impl std::str::FromStr for ReactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "heart" => Ok(Self::Heart),
            "support" => Ok(Self::Support),
            "strength" => Ok(Self::Strength),
            _ => Err(format!("Unknown reaction type: {s}")),
        }
    }
}

/// Ordering of the community feed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FeedOrder {
    #[default]
    Recent,
    Popular,
}

impl std::str::FromStr for FeedOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "recent" => Ok(Self::Recent),
            "popular" => Ok(Self::Popular),
            _ => Err(format!("Unknown feed order: {s} (expected recent or popular)")),
        }
    }
}
