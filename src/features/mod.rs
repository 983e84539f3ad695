//! Feature encoding: loosely typed customer attributes in, fixed numeric vector out.

pub mod domain;
pub mod service;

pub use domain::{AttributeBag, FeatureVector, RawValue, FEATURE_COUNT, FEATURE_NAMES};
pub use service::{bag_from_form, encode};
