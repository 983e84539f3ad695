//! Attribute bags, categorical domains and the fixed feature layout.
//!
//! The integer codes below are the encoding the classifier was trained on.
//! They are a frozen contract with the model artefact: the codes happen to
//! follow alphabetical order today, but must never be derived from it.

use std::collections::HashMap;

use serde_json::{Map, Value};

/// Number of positions in every encoded vector.
pub const FEATURE_COUNT: usize = 19;

/// Feature names in vector position order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "gender",
    "SeniorCitizen",
    "Partner",
    "Dependents",
    "tenure",
    "PhoneService",
    "MultipleLines",
    "InternetService",
    "OnlineSecurity",
    "OnlineBackup",
    "DeviceProtection",
    "TechSupport",
    "StreamingTV",
    "StreamingMovies",
    "Contract",
    "PaperlessBilling",
    "PaymentMethod",
    "MonthlyCharges",
    "TotalCharges",
];

/// Raw, loosely typed value supplied for one attribute.
#[derive(Clone, Debug, PartialEq)]
pub enum RawValue {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// An explicit JSON `null`.
    Null,
    /// Arrays and objects, kept in their JSON rendering.
    Other(String),
}

impl RawValue {
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => RawValue::Null,
            Value::Bool(b) => RawValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => RawValue::Int(i),
                None => RawValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => RawValue::Text(s),
            other => RawValue::Other(other.to_string()),
        }
    }

    /// The value as a category label, if it is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RawValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Rendering used in error messages.
    pub fn describe(&self) -> String {
        match self {
            RawValue::Text(s) => format!("{s:?}"),
            RawValue::Int(i) => i.to_string(),
            RawValue::Float(f) => f.to_string(),
            RawValue::Bool(b) => b.to_string(),
            RawValue::Null => "null".to_string(),
            RawValue::Other(raw) => raw.clone(),
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Int(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Float(value)
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        RawValue::Bool(value)
    }
}

/// Unordered attribute name → raw value mapping for one request.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AttributeBag {
    values: HashMap<String, RawValue>,
}

impl AttributeBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<RawValue>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&RawValue> {
        self.values.get(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Build a bag from a JSON object. `null` members are kept as [`RawValue::Null`].
    pub fn from_json_object(object: Map<String, Value>) -> Self {
        let values = object
            .into_iter()
            .map(|(name, value)| (name, RawValue::from_json(value)))
            .collect();
        Self { values }
    }
}

/// Ordered numeric input for the classifier.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Value at the position of the named feature.
    pub fn get(&self, name: &str) -> Option<f64> {
        FEATURE_NAMES
            .iter()
            .position(|feature| *feature == name)
            .map(|idx| self.0[idx])
    }
}

/// A closed categorical domain with trained integer codes.
pub trait Category: Copy + Sized + 'static {
    /// Every variant, in code order.
    const ALL: &'static [Self];

    fn label(self) -> &'static str;
    fn code(self) -> u8;

    /// Exact, case-sensitive match against the domain labels.
    fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.label() == label)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Gender {
    Female,
    Male,
}

impl Category for Gender {
    const ALL: &'static [Self] = &[Gender::Female, Gender::Male];

    fn label(self) -> &'static str {
        match self {
            Gender::Female => "Female",
            Gender::Male => "Male",
        }
    }

    fn code(self) -> u8 {
        match self {
            Gender::Female => 0,
            Gender::Male => 1,
        }
    }
}

/// Partner, Dependents, PhoneService and PaperlessBilling.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum YesNo {
    No,
    Yes,
}

impl Category for YesNo {
    const ALL: &'static [Self] = &[YesNo::No, YesNo::Yes];

    fn label(self) -> &'static str {
        match self {
            YesNo::No => "No",
            YesNo::Yes => "Yes",
        }
    }

    fn code(self) -> u8 {
        match self {
            YesNo::No => 0,
            YesNo::Yes => 1,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MultipleLines {
    No,
    NoPhoneService,
    Yes,
}

impl Category for MultipleLines {
    const ALL: &'static [Self] = &[
        MultipleLines::No,
        MultipleLines::NoPhoneService,
        MultipleLines::Yes,
    ];

    fn label(self) -> &'static str {
        match self {
            MultipleLines::No => "No",
            MultipleLines::NoPhoneService => "No phone service",
            MultipleLines::Yes => "Yes",
        }
    }

    fn code(self) -> u8 {
        match self {
            MultipleLines::No => 0,
            MultipleLines::NoPhoneService => 1,
            MultipleLines::Yes => 2,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum InternetService {
    Dsl,
    FiberOptic,
    No,
}

impl Category for InternetService {
    const ALL: &'static [Self] = &[
        InternetService::Dsl,
        InternetService::FiberOptic,
        InternetService::No,
    ];

    fn label(self) -> &'static str {
        match self {
            InternetService::Dsl => "DSL",
            InternetService::FiberOptic => "Fiber optic",
            InternetService::No => "No",
        }
    }

    fn code(self) -> u8 {
        match self {
            InternetService::Dsl => 0,
            InternetService::FiberOptic => 1,
            InternetService::No => 2,
        }
    }
}

/// The six internet add-ons: OnlineSecurity through StreamingMovies.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum InternetAddon {
    No,
    NoInternetService,
    Yes,
}

impl Category for InternetAddon {
    const ALL: &'static [Self] = &[
        InternetAddon::No,
        InternetAddon::NoInternetService,
        InternetAddon::Yes,
    ];

    fn label(self) -> &'static str {
        match self {
            InternetAddon::No => "No",
            InternetAddon::NoInternetService => "No internet service",
            InternetAddon::Yes => "Yes",
        }
    }

    fn code(self) -> u8 {
        match self {
            InternetAddon::No => 0,
            InternetAddon::NoInternetService => 1,
            InternetAddon::Yes => 2,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Contract {
    MonthToMonth,
    OneYear,
    TwoYear,
}

impl Category for Contract {
    const ALL: &'static [Self] = &[Contract::MonthToMonth, Contract::OneYear, Contract::TwoYear];

    fn label(self) -> &'static str {
        match self {
            Contract::MonthToMonth => "Month-to-month",
            Contract::OneYear => "One year",
            Contract::TwoYear => "Two year",
        }
    }

    fn code(self) -> u8 {
        match self {
            Contract::MonthToMonth => 0,
            Contract::OneYear => 1,
            Contract::TwoYear => 2,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PaymentMethod {
    BankTransfer,
    CreditCard,
    ElectronicCheck,
    MailedCheck,
}

impl Category for PaymentMethod {
    const ALL: &'static [Self] = &[
        PaymentMethod::BankTransfer,
        PaymentMethod::CreditCard,
        PaymentMethod::ElectronicCheck,
        PaymentMethod::MailedCheck,
    ];

    fn label(self) -> &'static str {
        match self {
            PaymentMethod::BankTransfer => "Bank transfer (automatic)",
            PaymentMethod::CreditCard => "Credit card (automatic)",
            PaymentMethod::ElectronicCheck => "Electronic check",
            PaymentMethod::MailedCheck => "Mailed check",
        }
    }

    fn code(self) -> u8 {
        match self {
            PaymentMethod::BankTransfer => 0,
            PaymentMethod::CreditCard => 1,
            PaymentMethod::ElectronicCheck => 2,
            PaymentMethod::MailedCheck => 3,
        }
    }
}

/// Choices offered to form clients, in display order.
pub const FEATURE_OPTIONS: [(&str, &[&str]); 15] = [
    ("gender", &["Female", "Male"]),
    ("Partner", &["Yes", "No"]),
    ("Dependents", &["Yes", "No"]),
    ("PhoneService", &["Yes", "No"]),
    ("MultipleLines", &["Yes", "No", "No phone service"]),
    ("InternetService", &["DSL", "Fiber optic", "No"]),
    ("OnlineSecurity", &["Yes", "No", "No internet service"]),
    ("OnlineBackup", &["Yes", "No", "No internet service"]),
    ("DeviceProtection", &["Yes", "No", "No internet service"]),
    ("TechSupport", &["Yes", "No", "No internet service"]),
    ("StreamingTV", &["Yes", "No", "No internet service"]),
    ("StreamingMovies", &["Yes", "No", "No internet service"]),
    ("Contract", &["Month-to-month", "One year", "Two year"]),
    ("PaperlessBilling", &["Yes", "No"]),
    (
        "PaymentMethod",
        &[
            "Electronic check",
            "Mailed check",
            "Bank transfer (automatic)",
            "Credit card (automatic)",
        ],
    ),
];
