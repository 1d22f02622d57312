use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use std::collections::HashSet;
use uuid::Uuid;
use vitals::{
    DataOrigin, Device, DeviceType, Energy, ExternalRecord, FieldValue, HeartRateRecord, InternalRecord,
    InternalSample, Mass, MealType, Metadata, NutritionRecord, RecordType, Sample, SpeedRecord, StepsRecord,
    StorageValue, Velocity, Vitals,
};

fn at(minute: u32, second: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 14, 7, minute, second).unwrap()
}

fn eastern() -> FixedOffset {
    FixedOffset::west_opt(5 * 3600).unwrap()
}

fn metadata() -> Metadata {
    Metadata::builder()
        .id(Uuid::parse_str("6f1c2d3e-4b5a-4c6d-8e7f-901a2b3c4d5e").unwrap())
        .data_origin(DataOrigin::new("com.example.fitness"))
        .device(Device::new(DeviceType::Watch).with_manufacturer("Acme").with_model("Pulse 2"))
        .client_record_id("walk-42")
        .client_record_version(3)
        .last_modified_time(at(11, 0))
        .build()
}

fn steps(count: i64) -> StepsRecord {
    let vitals = Vitals::new();
    let time = vitals.interval(at(0, 0), at(10, 0)).unwrap().with_zone_offset(eastern());
    StepsRecord::builder(metadata(), time, count).build().unwrap()
}

fn heart_rate() -> HeartRateRecord {
    let time = Vitals::new().interval(at(0, 0), at(5, 0)).unwrap();
    let samples = vec![Sample::new(at(1, 0), 72), Sample::new(at(2, 30), 88)];
    HeartRateRecord::builder(metadata(), time, samples).build().unwrap()
}

fn nutrition() -> NutritionRecord {
    let time = Vitals::new().interval(at(0, 0), at(20, 0)).unwrap();
    NutritionRecord::builder(metadata(), time)
        .meal_type(MealType::Lunch)
        .meal_name(Some("Salad".to_string()))
        .protein(Mass::from_grams(2000.0))
        .energy(Energy::from_joules(4184.0))
        .build()
        .unwrap()
}

fn samples() -> Vec<InternalRecord> {
    vec![
        ExternalRecord::from(steps(120)).to_internal(),
        ExternalRecord::from(heart_rate()).to_internal(),
        ExternalRecord::from(nutrition()).to_internal(),
        InternalRecord::empty(RecordType::BasalMetabolicRate),
        InternalRecord::empty(RecordType::Speed),
    ]
}

/// Every column of `record_type` set to a distinct non-default value
fn populated(vitals: &Vitals, record_type: RecordType) -> InternalRecord {
    let columns = vitals.columns(record_type.id()).unwrap();
    let values = InternalRecord::empty(record_type)
        .values()
        .into_iter()
        .zip(&columns)
        .enumerate()
        .map(|(i, (value, column))| match value {
            FieldValue::Real(_) => FieldValue::Real(0.25 + i as f64),
            FieldValue::Long(_) => FieldValue::Long(1_700_000_000_000 + i as i64),
            FieldValue::Int(_) => FieldValue::Int(match column.name {
                "device_type" => 2,
                "meal_type" => 3,
                _ => -18_000,
            }),
            FieldValue::Text(_) => FieldValue::Text(match column.name {
                "uuid" => Some("6f1c2d3e-4b5a-4c6d-8e7f-901a2b3c4d5e".to_string()),
                "model" => Some(String::new()),
                name => Some(format!("{} #{}", name, i)),
            }),
            FieldValue::Samples(_) => FieldValue::Samples(vec![
                InternalSample::new(1_700_000_000_000, 1.5 + i as f64),
                InternalSample::new(1_700_000_030_000, 90.0),
            ]),
        })
        .collect();
    InternalRecord::from_values(record_type, values).unwrap()
}

#[test]
fn every_variant_survives_both_codecs() {
    let vitals = Vitals::new();
    for record_type in RecordType::ALL {
        let record = populated(&vitals, record_type);
        assert_ne!(record, InternalRecord::empty(record_type), "{}", record_type);

        let bytes = vitals.to_wire(&record).unwrap();
        assert_eq!(vitals.from_wire(&bytes).unwrap(), record, "wire {}", record_type);

        let row = vitals.to_storage_row(&record).unwrap();
        assert_eq!(
            vitals.from_storage_row(record_type.id(), &row).unwrap(),
            record,
            "storage {}",
            record_type
        );
    }
}

#[test]
fn registry_is_a_bijection() {
    let vitals = Vitals::new();
    let registry = vitals.registry();
    assert_eq!(registry.len(), RecordType::ALL.len());

    let mut externals = HashSet::new();
    let mut internals = HashSet::new();
    for record_type in registry.record_types() {
        let external = registry.external_type_for(record_type.id()).unwrap();
        let internal = registry.internal_type_for(record_type.id()).unwrap();
        assert_eq!(registry.identifier_for_type_id(external.type_id).unwrap(), record_type);
        assert!(externals.insert(external.type_id));
        assert!(internals.insert(internal.type_id));
    }
    assert_eq!(registry.identifier_for::<SpeedRecord>().unwrap(), RecordType::Speed);
}

#[test]
fn wire_round_trip() {
    let vitals = Vitals::new();
    for record in samples() {
        let bytes = vitals.to_wire(&record).unwrap();
        assert_eq!(vitals.from_wire(&bytes).unwrap(), record, "{}", record.record_type());
    }
}

#[test]
fn wire_rejects_truncated_payload() {
    let vitals = Vitals::new();
    let bytes = vitals.to_wire(&samples()[0]).unwrap();
    let err = vitals.from_wire(&bytes[..bytes.len() - 3]).unwrap_err();
    assert_eq!(err.code(), vitals::codes::WIRE_DESYNC);
}

#[test]
fn storage_round_trip() {
    let vitals = Vitals::new();
    for record in samples() {
        let id = record.record_type().id();
        let row = vitals.to_storage_row(&record).unwrap();
        assert_eq!(vitals.from_storage_row(id, &row).unwrap(), record, "{}", record.record_type());
    }
}

#[test]
fn storage_rejects_unknown_identifier() {
    let vitals = Vitals::new();
    let row = vitals.to_storage_row(&samples()[0]).unwrap();
    let err = vitals.from_storage_row(2, &row).unwrap_err();
    assert_eq!(err.code(), vitals::codes::UNKNOWN_RECORD_TYPE);
}

#[test]
fn conversion_is_idempotent_on_zero() {
    let vitals = Vitals::new();
    for record_type in RecordType::ALL {
        let zero = InternalRecord::empty(record_type);
        let external = vitals.to_external(&zero).unwrap();
        let back = vitals.from_external(&external).unwrap();
        assert_eq!(back, zero, "{}", record_type);
        assert_eq!(vitals.to_external(&back).unwrap(), external);
    }
}

#[test]
fn units_are_normalized() {
    let internal = Vitals::new().from_external(&nutrition().into()).unwrap();
    match internal {
        InternalRecord::Nutrition(nutrition) => {
            assert_eq!(nutrition.protein, 2.0);
            assert_eq!(nutrition.energy, 4184.0);
            assert_eq!(nutrition.meal_type, 2);
            assert_eq!(nutrition.meal_name.as_deref(), Some("Salad"));
            // absent fields collapse to zero
            assert_eq!(nutrition.sugar, 0.0);
        }
        other => panic!("unexpected record {:?}", other),
    }
}

#[test]
fn absent_quantities_come_back_as_zero() {
    let vitals = Vitals::new();
    let internal = vitals.from_external(&nutrition().into()).unwrap();
    match vitals.to_external(&internal).unwrap() {
        ExternalRecord::Nutrition(record) => {
            assert_eq!(record.sugar(), &Some(Mass::from_kilograms(0.0)));
            assert_eq!(record.protein(), &Some(Mass::from_kilograms(2.0)));
        }
        other => panic!("unexpected record {:?}", other),
    }
}

#[test]
fn columns_match_rows() {
    let vitals = Vitals::new();
    for record_type in RecordType::ALL {
        let columns = vitals.columns(record_type.id()).unwrap();
        let row = vitals.to_storage_row(&InternalRecord::empty(record_type)).unwrap();
        assert_eq!(columns.len(), row.len(), "{}", record_type);

        let names: HashSet<&str> = columns.iter().map(|c| c.name).collect();
        assert_eq!(names.len(), columns.len());
        assert_eq!(columns[0].name, "uuid");
    }
}

#[test]
fn steps_survive_a_storage_round_trip() {
    let vitals = Vitals::new();
    let original = steps(120);

    let internal = vitals.from_external(&original.clone().into()).unwrap();
    let row = vitals.to_storage_row(&internal).unwrap();
    assert_eq!(row["count"], StorageValue::Integer(120));
    assert_eq!(row["start_time"], StorageValue::Integer(at(0, 0).timestamp_millis()));
    assert_eq!(row["end_zone_offset"], StorageValue::Integer(-18_000));

    let restored = vitals.from_storage_row(RecordType::Steps.id(), &row).unwrap();
    match vitals.to_external(&restored).unwrap() {
        ExternalRecord::Steps(record) => {
            assert_eq!(record.time().start_time(), &at(0, 0));
            assert_eq!(record.time().end_time(), &at(10, 0));
            assert_eq!(record.time().start_zone_offset(), &eastern());
            assert_eq!(record.time().end_zone_offset(), &eastern());
            assert_eq!(record.count(), &120);
            assert_eq!(record, original);
        }
        other => panic!("unexpected record {:?}", other),
    }
}

#[test]
fn series_survive_a_wire_round_trip() {
    let vitals = Vitals::new();
    let original = heart_rate();
    let bytes = vitals.to_wire(&ExternalRecord::from(original.clone()).to_internal()).unwrap();
    let restored = vitals.to_external(&vitals.from_wire(&bytes).unwrap()).unwrap();
    assert_eq!(restored, ExternalRecord::HeartRate(original));
}

#[test]
fn builder_rejects_reversed_interval() {
    let time = Vitals::new().interval(at(10, 0), at(0, 0)).unwrap();
    let err = StepsRecord::builder(metadata(), time, 10).build().unwrap_err();
    assert_eq!(err.code(), vitals::codes::VALIDATION);
}

#[test]
fn builder_accepts_zero_length_interval() {
    let time = Vitals::new().interval(at(3, 0), at(3, 0)).unwrap();
    assert!(StepsRecord::builder(metadata(), time, 10).build().is_ok());
}

#[test]
fn speed_samples_in_canonical_units() {
    let time = Vitals::new().interval(at(0, 0), at(1, 0)).unwrap();
    let record = SpeedRecord::builder(
        metadata(),
        time,
        vec![Sample::new(at(0, 30), Velocity::from_kilometers_per_hour(36.0))],
    )
    .build()
    .unwrap();
    match ExternalRecord::from(record).to_internal() {
        InternalRecord::Speed(speed) => assert!((speed.samples[0].value - 10.0).abs() < 1e-9),
        other => panic!("unexpected record {:?}", other),
    }
}
