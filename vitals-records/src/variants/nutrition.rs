//! Nutrition record: one meal or snack and what it contained

use serde::{Deserialize, Serialize};
use vitals_core::{RecordError, RecordResult};
use vitals_units::{Energy, Mass};

use crate::convert::ExternalField;
use crate::field::FieldKind;
use crate::time::IntervalTime;
use crate::variant::{no_extra_checks, record_variant};

/// Which meal a nutrition record belongs to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(i32)]
pub enum MealType {
    #[default]
    Unknown = 0,
    Breakfast = 1,
    Lunch = 2,
    Dinner = 3,
    Snack = 4,
}

impl MealType {
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl TryFrom<i32> for MealType {
    type Error = RecordError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => MealType::Unknown,
            1 => MealType::Breakfast,
            2 => MealType::Lunch,
            3 => MealType::Dinner,
            4 => MealType::Snack,
            other => {
                return Err(RecordError::validation(
                    "meal_type",
                    format!("unknown meal type {}", other),
                ))
            }
        })
    }
}

impl ExternalField for MealType {
    type Primitive = i32;

    const KIND: FieldKind = FieldKind::Int;

    fn to_primitive(&self) -> i32 {
        self.as_i32()
    }

    fn from_primitive(primitive: i32) -> RecordResult<Self> {
        MealType::try_from(primitive)
    }
}

record_variant! {
    /// Nutrients of one meal. Every nutrient is optional; masses are held
    /// in kilograms and energies in joules.
    pub struct NutritionRecord / NutritionRecordInternal / NutritionRecordBuilder {
        record_type: Nutrition,
        table: "nutrition_record_table",
        schema_version: 1,
        shape: Interval,
        time: IntervalTime,
        validate: no_extra_checks,
        required {}
        optional {
            unsaturated_fat: Option<Mass>,
            potassium: Option<Mass>,
            thiamin: Option<Mass>,
            meal_type: MealType,
            trans_fat: Option<Mass>,
            manganese: Option<Mass>,
            energy_from_fat: Option<Energy>,
            caffeine: Option<Mass>,
            dietary_fiber: Option<Mass>,
            selenium: Option<Mass>,
            vitamin_b6: Option<Mass>,
            protein: Option<Mass>,
            chloride: Option<Mass>,
            cholesterol: Option<Mass>,
            copper: Option<Mass>,
            iodine: Option<Mass>,
            vitamin_b12: Option<Mass>,
            zinc: Option<Mass>,
            riboflavin: Option<Mass>,
            energy: Option<Energy>,
            molybdenum: Option<Mass>,
            phosphorus: Option<Mass>,
            chromium: Option<Mass>,
            total_fat: Option<Mass>,
            calcium: Option<Mass>,
            vitamin_c: Option<Mass>,
            vitamin_e: Option<Mass>,
            biotin: Option<Mass>,
            vitamin_d: Option<Mass>,
            niacin: Option<Mass>,
            magnesium: Option<Mass>,
            total_carbohydrate: Option<Mass>,
            vitamin_k: Option<Mass>,
            polyunsaturated_fat: Option<Mass>,
            saturated_fat: Option<Mass>,
            sodium: Option<Mass>,
            folate: Option<Mass>,
            monounsaturated_fat: Option<Mass>,
            pantothenic_acid: Option<Mass>,
            meal_name: Option<String>,
            iron: Option<Mass>,
            vitamin_a: Option<Mass>,
            folic_acid: Option<Mass>,
            sugar: Option<Mass>,
        }
    }
}
