//! Typed physical quantities, each stored in its canonical unit

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::factors;

/// A quantity of one fixed dimension whose value is held in the canonical
/// unit of that dimension.
pub trait CanonicalQuantity:
    Copy + PartialEq + PartialOrd + Default + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    const CANONICAL_SYMBOL: &'static str;

    fn from_canonical(value: f64) -> Self;

    fn canonical_value(&self) -> f64;

    fn zero() -> Self {
        Self::from_canonical(0.0)
    }
}

macro_rules! quantity {
    (
        $(#[$meta:meta])*
        $name:ident, $canonical:literal,
        { $($from:ident, $into:ident => $factor:expr;)+ }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialOrd, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name {
            value: f64,
        }

        impl $name {
            $(
                pub fn $from(value: f64) -> Self {
                    $name { value: value * $factor }
                }

                pub fn $into(&self) -> f64 {
                    self.value / $factor
                }
            )+
        }

        impl CanonicalQuantity for $name {
            const CANONICAL_SYMBOL: &'static str = $canonical;

            fn from_canonical(value: f64) -> Self {
                $name { value }
            }

            fn canonical_value(&self) -> f64 {
                self.value
            }
        }

        // Bitwise equality keeps Eq and Hash consistent
        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.value.to_bits() == other.value.to_bits()
            }
        }

        impl Eq for $name {}

        impl Hash for $name {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.value.to_bits().hash(state);
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{} {}", self.value, $canonical)
            }
        }
    };
}

quantity! {
    /// Mass, held in kilograms
    Mass, "kg",
    {
        from_kilograms, in_kilograms => factors::KILOGRAM;
        from_grams, in_grams => factors::GRAM;
        from_milligrams, in_milligrams => factors::MILLIGRAM;
        from_micrograms, in_micrograms => factors::MICROGRAM;
        from_pounds, in_pounds => factors::POUND;
        from_ounces, in_ounces => factors::OUNCE;
    }
}

quantity! {
    /// Energy, held in joules
    Energy, "J",
    {
        from_joules, in_joules => factors::JOULE;
        from_kilojoules, in_kilojoules => factors::KILOJOULE;
        from_calories, in_calories => factors::CALORIE;
        from_kilocalories, in_kilocalories => factors::KILOCALORIE;
    }
}

quantity! {
    /// Length, held in meters
    Length, "m",
    {
        from_meters, in_meters => factors::METER;
        from_kilometers, in_kilometers => factors::KILOMETER;
        from_centimeters, in_centimeters => factors::CENTIMETER;
        from_millimeters, in_millimeters => factors::MILLIMETER;
        from_miles, in_miles => factors::MILE;
        from_feet, in_feet => factors::FOOT;
        from_inches, in_inches => factors::INCH;
        from_yards, in_yards => factors::YARD;
    }
}

quantity! {
    /// Power, held in watts
    Power, "W",
    {
        from_watts, in_watts => factors::WATT;
        from_kilowatts, in_kilowatts => factors::KILOWATT;
        from_kilocalories_per_day, in_kilocalories_per_day => factors::KILOCALORIE_PER_DAY;
    }
}

quantity! {
    /// Volume, held in liters
    Volume, "L",
    {
        from_liters, in_liters => factors::LITER;
        from_milliliters, in_milliliters => factors::MILLILITER;
        from_fluid_ounces, in_fluid_ounces => factors::FLUID_OUNCE;
        from_cups, in_cups => factors::CUP;
        from_gallons, in_gallons => factors::GALLON;
    }
}

quantity! {
    /// Velocity, held in meters per second
    Velocity, "m/s",
    {
        from_meters_per_second, in_meters_per_second => factors::METER_PER_SECOND;
        from_kilometers_per_hour, in_kilometers_per_hour => factors::KILOMETER_PER_HOUR;
        from_miles_per_hour, in_miles_per_hour => factors::MILE_PER_HOUR;
    }
}
