//! Conversion factors to the canonical unit of each dimension

// mass, canonical kilogram
pub const KILOGRAM: f64 = 1.0;
pub const GRAM: f64 = 0.001;
pub const MILLIGRAM: f64 = 0.000_001;
pub const MICROGRAM: f64 = 0.000_000_001;
pub const POUND: f64 = 0.453_592_37;
pub const OUNCE: f64 = 0.028_349_523_125;

// energy, canonical joule
pub const JOULE: f64 = 1.0;
pub const KILOJOULE: f64 = 1000.0;
pub const CALORIE: f64 = 4.184;
pub const KILOCALORIE: f64 = 4184.0;

// length, canonical meter
pub const METER: f64 = 1.0;
pub const KILOMETER: f64 = 1000.0;
pub const CENTIMETER: f64 = 0.01;
pub const MILLIMETER: f64 = 0.001;
pub const MILE: f64 = 1609.344;
pub const FOOT: f64 = 0.3048;
pub const INCH: f64 = 0.0254;
pub const YARD: f64 = 0.9144;

// power, canonical watt
pub const WATT: f64 = 1.0;
pub const KILOWATT: f64 = 1000.0;
pub const KILOCALORIE_PER_DAY: f64 = 4184.0 / 86_400.0;

// volume, canonical liter
pub const LITER: f64 = 1.0;
pub const MILLILITER: f64 = 0.001;
pub const FLUID_OUNCE: f64 = 0.029_573_529_562_5;
pub const CUP: f64 = 0.236_588_236_5;
pub const GALLON: f64 = 3.785_411_784;

// velocity, canonical meter per second
pub const METER_PER_SECOND: f64 = 1.0;
pub const KILOMETER_PER_HOUR: f64 = 1000.0 / 3600.0;
pub const MILE_PER_HOUR: f64 = 0.447_04;
