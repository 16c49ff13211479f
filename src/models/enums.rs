use crate::error::VizError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
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
            type Err = VizError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(VizError::InvalidEnum {
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

str_enum!(Theme {
    Light => "light",
    Dark => "dark",
});

str_enum!(Metric {
    Weight => "weight",
    Height => "height",
    HeadCircumference => "head_circumference",
    Bmi => "bmi",
});

str_enum!(SeriesMode {
    Value => "value",
    Percentile => "percentile",
});

str_enum!(DateFormat {
    Iso => "iso",
    Us => "us",
    European => "european",
});

str_enum!(Axis {
    Left => "left",
    Right => "right",
});

impl Default for Theme {
    fn default() -> Self {
        Theme::Light
    }
}

impl Default for DateFormat {
    fn default() -> Self {
        DateFormat::Iso
    }
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::Weight,
        Metric::Height,
        Metric::HeadCircumference,
        Metric::Bmi,
    ];

    /// Weight and height share the left axis; head circumference and BMI
    /// live on the right one.
    pub fn axis(self) -> Axis {
        match self {
            Metric::Weight | Metric::Height => Axis::Left,
            Metric::HeadCircumference | Metric::Bmi => Axis::Right,
        }
    }

    /// Display unit for value mode.
    pub fn unit(self) -> &'static str {
        match self {
            Metric::Weight => "kg",
            Metric::Height | Metric::HeadCircumference => "cm",
            Metric::Bmi => "kg/m²",
        }
    }
}
