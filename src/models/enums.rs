use crate::config;
use crate::db::DatabaseError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = DatabaseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(DatabaseError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(DiagnosisModel {
    Gait => "gait",
    Hand => "hand",
});

str_enum!(ProbabilityBand {
    VeryLow => "very_low",
    Low => "low",
    Middle => "middle",
    High => "high",
    VeryHigh => "very_high",
});

str_enum!(IndicatorColor {
    Blue => "blue",
    Green => "green",
    Yellow => "yellow",
    Orange => "orange",
    Red => "red",
});

impl DiagnosisModel {
    /// Selector order shown to the user: gait first, hand second.
    pub const ALL: [DiagnosisModel; 2] = [DiagnosisModel::Gait, DiagnosisModel::Hand];

    /// Map a selector index back to a model. Out-of-range indices yield `None`.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Gait => "Gait",
            Self::Hand => "Hand",
        }
    }

    /// Inference endpoint backing this model (env override applied).
    pub fn endpoint(&self) -> String {
        match self {
            Self::Gait => config::gait_endpoint(),
            Self::Hand => config::hand_endpoint(),
        }
    }
}

impl ProbabilityBand {
    /// Band for a whole-number percentage. Anything above 80 is very high,
    /// negative inputs count as very low.
    pub fn from_percent(percent: i64) -> Self {
        match percent {
            i64::MIN..=20 => Self::VeryLow,
            21..=40 => Self::Low,
            41..=60 => Self::Middle,
            61..=80 => Self::High,
            _ => Self::VeryHigh,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::VeryLow => "Very Low",
            Self::Low => "Low",
            Self::Middle => "Middle",
            Self::High => "High",
            Self::VeryHigh => "Very High",
        }
    }

    /// Colour of the progress ring for this band.
    pub fn color(&self) -> IndicatorColor {
        match self {
            Self::VeryLow => IndicatorColor::Blue,
            Self::Low => IndicatorColor::Green,
            Self::Middle => IndicatorColor::Yellow,
            Self::High => IndicatorColor::Orange,
            Self::VeryHigh => IndicatorColor::Red,
        }
    }
}
