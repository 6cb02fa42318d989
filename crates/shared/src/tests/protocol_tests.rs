use std::collections::BTreeMap;

use serde_json::json;

use crate::{
    domain::{education_label, FormSchema, ALL_GROUPS},
    protocol::{ModelInfoResponse, PredictionPayload, PredictionResult},
};

#[test]
fn decodes_success_response() {
    let result: PredictionResult = serde_json::from_value(json!({
        "success": true,
        "prediction": 64.2,
        "interpretation": "High"
    }))
    .expect("decode");
    assert_eq!(
        result,
        PredictionResult::Success {
            prediction: 64.2,
            interpretation: "High".into()
        }
    );
}

#[test]
fn decodes_failure_response() {
    let result: PredictionResult = serde_json::from_value(json!({
        "success": false,
        "error": "Invalid area code"
    }))
    .expect("decode");
    assert_eq!(
        result,
        PredictionResult::Failure {
            error: "Invalid area code".into()
        }
    );
}

#[test]
fn rejects_unrecognised_shapes() {
    for body in [
        json!({ "success": true, "interpretation": "High" }),
        json!({ "success": true, "prediction": 12.0 }),
        json!({ "success": false }),
        json!({ "prediction": 64.2, "interpretation": "High" }),
        json!({ "success": "yes", "error": "x" }),
        json!([1, 2, 3]),
    ] {
        assert!(
            serde_json::from_value::<PredictionResult>(body.clone()).is_err(),
            "accepted {body}"
        );
    }
}

#[test]
fn failure_result_serializes_with_success_flag() {
    let value = serde_json::to_value(PredictionResult::Failure {
        error: "Model not loaded".into(),
    })
    .expect("encode");
    assert_eq!(value, json!({ "success": false, "error": "Model not loaded" }));
}

#[test]
fn payload_flattens_passthrough_fields_and_nulls_missing_numbers() {
    let mut fields = BTreeMap::new();
    fields.insert("area".to_string(), ALL_GROUPS.to_string());
    fields.insert("quarter".to_string(), String::new());
    let payload = PredictionPayload {
        year: None,
        education: Some(7.0),
        fields,
    };

    let value = serde_json::to_value(&payload).expect("encode");
    assert_eq!(
        value,
        json!({ "year": null, "education": 7.0, "area": ALL_GROUPS, "quarter": "" })
    );
}

#[test]
fn model_info_envelope_splits_success_and_error() {
    let ok: ModelInfoResponse = serde_json::from_value(json!({
        "success": true,
        "model_type": "XGBRegressor",
        "features": ["year", "edu_encoded"],
        "performance": { "r2_score": 0.8262, "mae": 2.9, "rmse": 6.2 }
    }))
    .expect("decode");
    let info = ok.into_result().expect("shape").expect("success");
    assert_eq!(info.model_type, "XGBRegressor");
    assert_eq!(info.features.len(), 2);

    let err: ModelInfoResponse =
        serde_json::from_value(json!({ "success": false, "error": "Model not loaded" }))
            .expect("decode");
    assert_eq!(
        err.into_result().expect("shape"),
        Err("Model not loaded".to_string())
    );
}

#[test]
fn reference_schema_defaults() {
    let defaults = FormSchema::lfpr().defaults();
    assert_eq!(defaults.get("year"), Some(""));
    assert_eq!(defaults.get("area"), Some(ALL_GROUPS));
    assert_eq!(defaults.get("quarter"), Some("1"));
    assert_eq!(defaults.len(), 5);
}

#[test]
fn education_labels_cover_known_codes() {
    assert_eq!(education_label("7"), Some("อุดมศึกษา สายวิชาการ"));
    assert_eq!(education_label("12"), Some("รวม"));
    assert_eq!(education_label("13"), None);
    assert_eq!(education_label("x"), None);
}
