//! Continuous-integration knobs shared by the lstree test suites.

pub mod property_test_profile;
