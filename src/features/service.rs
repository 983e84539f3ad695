//! Attribute bag → feature vector encoding.

use std::collections::HashMap;

use crate::common::error::EncodingError;

use super::domain::{
    AttributeBag, Category, Contract, FeatureVector, Gender, InternetAddon, InternetService,
    MultipleLines, PaymentMethod, RawValue, YesNo,
};

/// Encode a bag into the 19-position vector the classifier was trained on.
///
/// Absent attributes and categorical values outside their domain take the
/// attribute default. Only numeric coercion can fail.
pub fn encode(bag: &AttributeBag) -> Result<FeatureVector, EncodingError> {
    Ok(FeatureVector::new([
        category(bag, "gender", Gender::Male),
        integer(bag, "SeniorCitizen", 0)? as f64,
        category(bag, "Partner", YesNo::No),
        category(bag, "Dependents", YesNo::No),
        number(bag, "tenure", 0.0)?,
        category(bag, "PhoneService", YesNo::Yes),
        category(bag, "MultipleLines", MultipleLines::No),
        category(bag, "InternetService", InternetService::Dsl),
        category(bag, "OnlineSecurity", InternetAddon::No),
        category(bag, "OnlineBackup", InternetAddon::No),
        category(bag, "DeviceProtection", InternetAddon::No),
        category(bag, "TechSupport", InternetAddon::No),
        category(bag, "StreamingTV", InternetAddon::No),
        category(bag, "StreamingMovies", InternetAddon::No),
        category(bag, "Contract", Contract::MonthToMonth),
        category(bag, "PaperlessBilling", YesNo::No),
        category(bag, "PaymentMethod", PaymentMethod::ElectronicCheck),
        number(bag, "MonthlyCharges", 0.0)?,
        number(bag, "TotalCharges", 0.0)?,
    ]))
}

/// Build a bag from submitted form fields.
///
/// `SeniorCitizen` and `tenure` arrive as integers and the two charge fields
/// as floats; missing numeric fields read as zero. Categorical fields pass
/// through untouched and are resolved by [`encode`].
pub fn bag_from_form(fields: &HashMap<String, String>) -> Result<AttributeBag, EncodingError> {
    let mut bag = AttributeBag::new();

    for (name, value) in fields {
        bag.insert(name.as_str(), value.as_str());
    }

    for name in ["SeniorCitizen", "tenure"] {
        let value = match fields.get(name) {
            Some(raw) => parse_int(name, raw)?,
            None => 0,
        };
        bag.insert(name, value);
    }

    for name in ["MonthlyCharges", "TotalCharges"] {
        let value = match fields.get(name) {
            Some(raw) => parse_float(name, raw)?,
            None => 0.0,
        };
        bag.insert(name, value);
    }

    Ok(bag)
}

fn category<C: Category>(bag: &AttributeBag, name: &str, default: C) -> f64 {
    bag.get(name)
        .and_then(RawValue::as_text)
        .and_then(C::from_label)
        .unwrap_or(default)
        .code() as f64
}

fn integer(bag: &AttributeBag, name: &'static str, default: i64) -> Result<i64, EncodingError> {
    let Some(raw) = bag.get(name) else {
        return Ok(default);
    };
    match raw {
        RawValue::Int(i) => Ok(*i),
        RawValue::Bool(b) => Ok(i64::from(*b)),
        RawValue::Float(f) if f.is_finite() && f.fract() == 0.0 => Ok(*f as i64),
        RawValue::Text(s) => parse_int(name, s),
        other => Err(EncodingError::NotInteger {
            attribute: name,
            value: other.describe(),
        }),
    }
}

fn number(bag: &AttributeBag, name: &'static str, default: f64) -> Result<f64, EncodingError> {
    let Some(raw) = bag.get(name) else {
        return Ok(default);
    };
    match raw {
        RawValue::Int(i) => Ok(*i as f64),
        RawValue::Float(f) => Ok(*f),
        RawValue::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        RawValue::Text(s) => parse_float(name, s),
        other => Err(EncodingError::NotNumeric {
            attribute: name,
            value: other.describe(),
        }),
    }
}

fn parse_int(name: &'static str, raw: &str) -> Result<i64, EncodingError> {
    raw.trim().parse().map_err(|_| EncodingError::NotInteger {
        attribute: name,
        value: format!("{raw:?}"),
    })
}

fn parse_float(name: &'static str, raw: &str) -> Result<f64, EncodingError> {
    raw.trim().parse().map_err(|_| EncodingError::NotNumeric {
        attribute: name,
        value: format!("{raw:?}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::domain::{FEATURE_COUNT, FEATURE_NAMES};

    const DEFAULTS: [f64; FEATURE_COUNT] = [
        1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 2.0, 0.0,
        0.0,
    ];

    fn position(name: &str) -> usize {
        FEATURE_NAMES.iter().position(|f| *f == name).unwrap()
    }

    fn encode_one(name: &str, value: impl Into<RawValue>) -> FeatureVector {
        encode(&AttributeBag::new().with(name, value)).unwrap()
    }

    /// Every (attribute, label, code) pair of the trained encoding.
    fn domain_table() -> Vec<(&'static str, &'static str, f64)> {
        let mut table = vec![
            ("gender", "Female", 0.0),
            ("gender", "Male", 1.0),
            ("MultipleLines", "No", 0.0),
            ("MultipleLines", "No phone service", 1.0),
            ("MultipleLines", "Yes", 2.0),
            ("InternetService", "DSL", 0.0),
            ("InternetService", "Fiber optic", 1.0),
            ("InternetService", "No", 2.0),
            ("Contract", "Month-to-month", 0.0),
            ("Contract", "One year", 1.0),
            ("Contract", "Two year", 2.0),
            ("PaymentMethod", "Bank transfer (automatic)", 0.0),
            ("PaymentMethod", "Credit card (automatic)", 1.0),
            ("PaymentMethod", "Electronic check", 2.0),
            ("PaymentMethod", "Mailed check", 3.0),
        ];
        for name in ["Partner", "Dependents", "PhoneService", "PaperlessBilling"] {
            table.push((name, "No", 0.0));
            table.push((name, "Yes", 1.0));
        }
        for name in [
            "OnlineSecurity",
            "OnlineBackup",
            "DeviceProtection",
            "TechSupport",
            "StreamingTV",
            "StreamingMovies",
        ] {
            table.push((name, "No", 0.0));
            table.push((name, "No internet service", 1.0));
            table.push((name, "Yes", 2.0));
        }
        table
    }

    #[test]
    fn empty_bag_encodes_to_defaults() {
        let vector = encode(&AttributeBag::new()).unwrap();
        assert_eq!(vector.as_slice(), &DEFAULTS);
    }

    #[test]
    fn each_label_lands_at_its_position_with_its_code() {
        for (name, label, code) in domain_table() {
            let vector = encode_one(name, label);
            let pos = position(name);
            let mut expected = DEFAULTS;
            expected[pos] = code;
            assert_eq!(vector.as_slice(), &expected, "{name} = {label}");
        }
    }

    #[test]
    fn omitted_equals_explicit_default() {
        let defaults = [
            ("gender", "Male"),
            ("Partner", "No"),
            ("Dependents", "No"),
            ("PhoneService", "Yes"),
            ("MultipleLines", "No"),
            ("InternetService", "DSL"),
            ("OnlineSecurity", "No"),
            ("OnlineBackup", "No"),
            ("DeviceProtection", "No"),
            ("TechSupport", "No"),
            ("StreamingTV", "No"),
            ("StreamingMovies", "No"),
            ("Contract", "Month-to-month"),
            ("PaperlessBilling", "No"),
            ("PaymentMethod", "Electronic check"),
        ];
        let empty = encode(&AttributeBag::new()).unwrap();
        for (name, label) in defaults {
            assert_eq!(encode_one(name, label), empty, "{name}");
        }
        assert_eq!(encode_one("SeniorCitizen", 0_i64), empty);
        assert_eq!(encode_one("tenure", 0.0), empty);
        assert_eq!(encode_one("MonthlyCharges", 0_i64), empty);
        assert_eq!(encode_one("TotalCharges", "0"), empty);
    }

    #[test]
    fn out_of_domain_equals_omitted() {
        let empty = encode(&AttributeBag::new()).unwrap();
        for (name, _, _) in domain_table() {
            assert_eq!(encode_one(name, "Maybe"), empty, "{name}");
            assert_eq!(encode_one(name, "yes"), empty, "{name}");
            assert_eq!(encode_one(name, 1_i64), empty, "{name}");
            assert_eq!(encode_one(name, true), empty, "{name}");
        }
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let vector = encode(&AttributeBag::new().with("customerID", "7590-VHVEG")).unwrap();
        assert_eq!(vector.as_slice(), &DEFAULTS);
    }

    #[test]
    fn numeric_attributes_are_coerced() {
        let bag = AttributeBag::new()
            .with("SeniorCitizen", "1")
            .with("tenure", 12_i64)
            .with("MonthlyCharges", " 70.5 ")
            .with("TotalCharges", 846.0);
        let vector = encode(&bag).unwrap();
        assert_eq!(vector.get("SeniorCitizen"), Some(1.0));
        assert_eq!(vector.get("tenure"), Some(12.0));
        assert_eq!(vector.get("MonthlyCharges"), Some(70.5));
        assert_eq!(vector.get("TotalCharges"), Some(846.0));
    }

    #[test]
    fn senior_flag_accepts_integral_values_only() {
        assert_eq!(encode_one("SeniorCitizen", 1.0).get("SeniorCitizen"), Some(1.0));
        assert_eq!(encode_one("SeniorCitizen", true).get("SeniorCitizen"), Some(1.0));

        let err = encode(&AttributeBag::new().with("SeniorCitizen", 1.5)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "could not convert SeniorCitizen value 1.5 to an integer"
        );

        let err = encode(&AttributeBag::new().with("SeniorCitizen", "yes")).unwrap_err();
        assert_eq!(
            err,
            EncodingError::NotInteger {
                attribute: "SeniorCitizen",
                value: "\"yes\"".to_string()
            }
        );
    }

    #[test]
    fn non_numeric_tenure_fails() {
        let err = encode(&AttributeBag::new().with("tenure", "abc")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "could not convert tenure value \"abc\" to a number"
        );
    }

    #[test]
    fn null_numbers_fail_but_null_categories_default() {
        let err = encode(&AttributeBag::new().with("tenure", RawValue::Null)).unwrap_err();
        assert_eq!(
            err,
            EncodingError::NotNumeric {
                attribute: "tenure",
                value: "null".to_string()
            }
        );

        let err = encode(&AttributeBag::new().with("SeniorCitizen", RawValue::Null)).unwrap_err();
        assert_eq!(err.to_string(), "could not convert SeniorCitizen value null to an integer");

        let vector = encode(&AttributeBag::new().with("gender", RawValue::Null)).unwrap();
        assert_eq!(vector.as_slice(), &DEFAULTS);
    }

    #[test]
    fn empty_string_charges_fail() {
        let err = encode(&AttributeBag::new().with("MonthlyCharges", "")).unwrap_err();
        assert_eq!(err.attribute(), "MonthlyCharges");
    }

    #[test]
    fn structured_numeric_values_fail() {
        let bag = AttributeBag::new().with("TotalCharges", RawValue::Other("[1]".into()));
        let err = encode(&bag).unwrap_err();
        assert_eq!(
            err,
            EncodingError::NotNumeric {
                attribute: "TotalCharges",
                value: "[1]".to_string()
            }
        );
    }

    #[test]
    fn form_fields_are_typed_before_encoding() {
        let fields: HashMap<String, String> = [
            ("gender", "Female"),
            ("SeniorCitizen", "1"),
            ("tenure", "24"),
            ("MonthlyCharges", "89.1"),
            ("TotalCharges", "2138.4"),
            ("Contract", "One year"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let bag = bag_from_form(&fields).unwrap();
        assert_eq!(bag.get("tenure"), Some(&RawValue::Int(24)));
        assert_eq!(bag.get("MonthlyCharges"), Some(&RawValue::Float(89.1)));

        let vector = encode(&bag).unwrap();
        assert_eq!(vector.get("gender"), Some(0.0));
        assert_eq!(vector.get("SeniorCitizen"), Some(1.0));
        assert_eq!(vector.get("tenure"), Some(24.0));
        assert_eq!(vector.get("Contract"), Some(1.0));
    }

    #[test]
    fn missing_form_numbers_read_as_zero() {
        let bag = bag_from_form(&HashMap::new()).unwrap();
        assert_eq!(bag.get("SeniorCitizen"), Some(&RawValue::Int(0)));
        assert_eq!(bag.get("TotalCharges"), Some(&RawValue::Float(0.0)));
        assert_eq!(encode(&bag).unwrap().as_slice(), &DEFAULTS);
    }

    #[test]
    fn form_tenure_must_be_an_integer() {
        let fields = HashMap::from([("tenure".to_string(), "12.5".to_string())]);
        let err = bag_from_form(&fields).unwrap_err();
        assert_eq!(
            err,
            EncodingError::NotInteger {
                attribute: "tenure",
                value: "\"12.5\"".to_string()
            }
        );
    }
}
