//! Serde roundtrip and JsonSchema validation tests for the wire types.

use std::collections::BTreeMap;

use chrono::{TimeZone, Utc};
use schemars::schema_for;
use vigil_core::entities::{Equipment, InspectionRecord};
use vigil_core::enums::{Answer, Cadence};
use vigil_core::stats::{StatisticsResponse, StatsBucket, StatsData, TypeStats};
use vigil_core::timestamp::RawTimestamp;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            // Serde roundtrip
            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            // Schema validation
            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn sample_record() -> InspectionRecord {
    InspectionRecord {
        business_unit: "bu-east".into(),
        equipment_type: "forklift".into(),
        equipment_id: "지게차-07".into(),
        timestamp: RawTimestamp::from_instant(Utc.with_ymd_and_hms(2024, 3, 15, 10, 30, 0).unwrap()),
        inspector: "kim".into(),
        images: vec!["https://cdn.example.com/insp/1.jpg".into()],
        remark: Some("left fork slightly bent".into()),
        answers: BTreeMap::from([
            ("forks".to_string(), Answer::Pass),
            ("hydraulics".to_string(), Answer::Fail),
            ("horn".to_string(), Answer::Other("loud".to_string())),
        ]),
    }
}

fn sample_bucket() -> StatsBucket {
    let mut bucket = StatsBucket::with_total(10);
    bucket.inspected = 4;
    bucket.defected = 1;
    bucket.refresh_percentages();
    bucket
}

roundtrip_and_validate!(
    equipment_roundtrip,
    Equipment,
    Equipment {
        business_unit: "bu-east".into(),
        equipment_type: "forklift".into(),
        equipment_id: "FLT-001".into(),
        site: Some("plant-a".into()),
    }
);

roundtrip_and_validate!(inspection_record_roundtrip, InspectionRecord, sample_record());

roundtrip_and_validate!(stats_bucket_roundtrip, StatsBucket, sample_bucket());

roundtrip_and_validate!(
    type_stats_roundtrip,
    TypeStats,
    TypeStats {
        overall: sample_bucket(),
        by_site: Some(BTreeMap::from([("plant-a".to_string(), sample_bucket())])),
    }
);

roundtrip_and_validate!(
    statistics_response_roundtrip,
    StatisticsResponse,
    StatisticsResponse::ok(
        "bu-east",
        Some("plant-a"),
        Cadence::Quarterly,
        StatsData {
            by_type: BTreeMap::from([(
                "forklift".to_string(),
                TypeStats {
                    overall: sample_bucket(),
                    by_site: Some(BTreeMap::from([("plant-a".to_string(), sample_bucket())])),
                },
            )]),
            by_site: BTreeMap::from([("plant-a".to_string(), sample_bucket())]),
            total: sample_bucket(),
        },
        Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap(),
    )
);

#[test]
fn bucket_with_retained_records_serializes_them() {
    let mut bucket = sample_bucket();
    bucket.inspection_records = Some(vec![sample_record()]);
    let json = serde_json::to_value(&bucket).unwrap();
    assert_eq!(json["inspectionRecords"][0]["equipmentId"], "지게차-07");
}
