//! Engineered pricing and health features derived from raw attributes.
//!
//! Everything here is a pure function over small fixed inputs: BMI, the
//! life-style risk tier, the age bracket, the city tier, and the health
//! verdict. Range validation happens at the model boundary before these run.

use crate::models::types::{AgeGroup, BmiVerdict, LifestyleRisk};

/// Tier 1 cities, matched by exact string membership.
///
/// The list is carried over verbatim from the trained model's feature
/// vocabulary, including the spellings "Chenni" and "Kolkota". Correcting them
/// here would silently shift those cities to tier 3 at prediction time.
pub const TIER_1_CITIES: [&str; 7] = [
    "Mumbai", "Delhi", "Bangalore", "Chenni", "Kolkota", "Hyderabad", "Pune",
];

/// Tier 2 cities, matched by exact string membership.
pub const TIER_2_CITIES: [&str; 48] = [
    "Jaipur",
    "Chandigarh",
    "Indore",
    "Lucknow",
    "Patna",
    "Ranchi",
    "Visakhapatnam",
    "Coimbatore",
    "Bhopal",
    "Nagpur",
    "Vadodara",
    "Surat",
    "Rajkot",
    "Jodhpur",
    "Raipur",
    "Amritsar",
    "Varanasi",
    "Agra",
    "Dehradun",
    "Mysore",
    "Jabalpur",
    "Guwahati",
    "Thiruvananthapuram",
    "Ludhiana",
    "Nashik",
    "Allahabad",
    "Udaipur",
    "Aurangabad",
    "Hubli",
    "Belgaum",
    "Salem",
    "Vijayawada",
    "Tiruchirappalli",
    "Bhavnagar",
    "Gwalior",
    "Dhanbad",
    "Bareilly",
    "Aligarh",
    "Gaya",
    "Kozhikode",
    "Warangal",
    "Kolhapur",
    "Bilaspur",
    "Jalandhar",
    "Noida",
    "Guntur",
    "Asansol",
    "Siliguri",
];

/// Body-mass index: weight (kg) over height (m) squared, unrounded.
#[must_use]
pub fn bmi(weight_kg: f64, height_m: f64) -> f64 {
    weight_kg / (height_m * height_m)
}

/// BMI rounded to two decimals, the form persisted on patient records.
#[must_use]
pub fn bmi_rounded(weight_kg: f64, height_m: f64) -> f64 {
    (bmi(weight_kg, height_m) * 100.0).round() / 100.0
}

/// Life-style risk tier.
///
/// Only smokers are ever flagged above `Low`; a non-smoker with a high BMI
/// stays `Low`. That asymmetry is part of the trained feature definition.
#[must_use]
pub fn lifestyle_risk(smoker: bool, bmi: f64) -> LifestyleRisk {
    if smoker && bmi > 30.0 {
        LifestyleRisk::High
    } else if smoker && bmi > 27.0 {
        LifestyleRisk::Medium
    } else {
        LifestyleRisk::Low
    }
}

/// Age bracket with strict upper bounds at 25, 45 and 60.
#[must_use]
pub fn age_group(age: u32) -> AgeGroup {
    if age < 25 {
        AgeGroup::Young
    } else if age < 45 {
        AgeGroup::Adult
    } else if age < 60 {
        AgeGroup::MiddleAged
    } else {
        AgeGroup::Senior
    }
}

/// City tier by exact, case-sensitive membership in the fixed tier lists.
/// Cities in neither list are tier 3.
#[must_use]
pub fn city_tier(city: &str) -> u8 {
    if TIER_1_CITIES.contains(&city) {
        1
    } else if TIER_2_CITIES.contains(&city) {
        2
    } else {
        3
    }
}

/// Health verdict for a BMI value.
#[must_use]
pub fn verdict(bmi: f64) -> BmiVerdict {
    if bmi < 18.5 {
        BmiVerdict::Underweight
    } else if bmi < 25.0 {
        BmiVerdict::Normal
    } else {
        BmiVerdict::OverweightObese
    }
}
