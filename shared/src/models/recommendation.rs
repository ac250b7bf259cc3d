//! Recommendation pipeline types and pure helpers
//!
//! The classifier ranks candidate crops by suitability; the seasonal filter
//! narrows that list to crops currently in demand for the user's location.
//! When the intersection is empty, generic environmental-adjustment advice
//! is derived locally from the raw readings.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// The seven soil/climate readings entered on the dashboard
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct FieldReadings {
    #[validate(range(min = 0.0, max = 200.0))]
    pub nitrogen: f64,
    #[validate(range(min = 0.0, max = 200.0))]
    pub phosphorus: f64,
    #[validate(range(min = 0.0, max = 200.0))]
    pub potassium: f64,
    #[validate(range(min = 0.0, max = 50.0))]
    pub temperature: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub humidity: f64,
    #[validate(range(min = 0.0, max = 14.0))]
    pub ph: f64,
    #[validate(range(min = 0.0, max = 300.0))]
    pub rainfall: f64,
}

impl FieldReadings {
    /// Feature vector in classifier input order
    pub fn as_features(&self) -> [f64; 7] {
        [
            self.nitrogen,
            self.phosphorus,
            self.potassium,
            self.temperature,
            self.humidity,
            self.ph,
            self.rainfall,
        ]
    }
}

/// One classifier-ranked candidate crop
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankedCrop {
    pub name: String,
    pub probability: f64,
}

/// Parse a comma-separated crop list returned by the generative-text
/// service: split on commas, trim, lowercase. Empty segments are dropped.
/// No schema validation beyond that.
pub fn parse_crop_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(|crop| crop.trim().to_lowercase())
        .filter(|crop| !crop.is_empty())
        .collect()
}

/// Keep the ranked crops whose name appears in the seasonal-demand set,
/// preserving rank order.
pub fn filter_by_demand(ranked: &[RankedCrop], in_demand: &[String]) -> Vec<RankedCrop> {
    ranked
        .iter()
        .filter(|crop| in_demand.iter().any(|d| d == &crop.name.to_lowercase()))
        .cloned()
        .collect()
}

/// Generic environmental-adjustment advice derived purely from local
/// threshold comparisons on the raw readings. Never empty.
pub fn adaptation_tips(readings: &FieldReadings) -> Vec<String> {
    let mut tips = Vec::new();

    if readings.ph < 6.0 {
        tips.push("Add lime to the soil to increase pH.".to_string());
    } else if readings.ph > 7.5 {
        tips.push("Add sulfur or organic matter to reduce pH.".to_string());
    }

    if readings.nitrogen < 50.0 {
        tips.push("Increase nitrogen levels using urea or compost.".to_string());
    }
    if readings.phosphorus < 30.0 {
        tips.push("Use phosphorus-rich fertilizers like DAP.".to_string());
    }
    if readings.potassium < 40.0 {
        tips.push("Apply potassium sulfate or potash.".to_string());
    }

    if readings.temperature < 15.0 {
        tips.push("Consider greenhouse techniques to maintain optimal temperature.".to_string());
    }
    if readings.humidity < 40.0 {
        tips.push("Implement irrigation or misting systems to increase humidity.".to_string());
    }

    if tips.is_empty() {
        tips.push(
            "Your environment is generally suitable, but consider seasonal factors.".to_string(),
        );
    }

    tips
}

/// Fixed cultivation guidance for the crops the classifier can emit
pub fn cultivation_advice(crop: &str) -> &'static str {
    match crop.to_lowercase().as_str() {
        "rice" => "Rice requires flooded conditions. Ensure good water availability and pH levels of 5.5–7.0.",
        "maize" => "Maize needs a well-drained soil and prefers temperatures between 18–30°C. Keep the soil pH between 5.8 and 7.0.",
        "chickpea" => "Chickpeas thrive in well-drained soil with moderate rainfall and prefer a pH between 6.0 and 8.0.",
        "kidneybeans" => "Kidney beans require a warm climate with temperatures between 20–30°C. The soil should be well-drained.",
        "pigeonpeas" => "Pigeon peas prefer a tropical climate and well-drained soil with a pH between 6.0 and 7.5.",
        "mothbeans" => "Moth beans grow best in hot and dry climates. The soil should be sandy and well-drained.",
        "mungbean" => "Mung beans thrive in warm temperatures of 25–35°C with moderate rainfall and soil pH of 6.0–7.5.",
        "blackgram" => "Blackgram requires a warm climate with temperatures between 25–30°C. The soil should be well-drained.",
        "lentil" => "Lentils prefer cool conditions with temperatures around 15°C and a soil pH of 6.0–7.0.",
        "pomegranate" => "Pomegranate requires a hot, dry climate with temperatures above 35°C. Ensure well-drained soil.",
        "banana" => "Bananas need a warm and humid climate with temperatures between 25–30°C. The soil should be rich in organic matter.",
        "mango" => "Mangoes prefer tropical climates with temperatures above 25°C. Ensure well-drained, fertile soil.",
        "grapes" => "Grapes thrive in warm and dry climates with temperatures between 25–30°C and well-drained soil.",
        "watermelon" => "Watermelon prefers warm conditions with temperatures between 24–30°C and needs plenty of water.",
        "muskmelon" => "Muskmelons thrive in warm, dry climates. Ensure soil is well-drained and pH is between 6.0–7.5.",
        "apple" => "Apple trees prefer cool climates with temperatures around 20°C and well-drained soil.",
        "orange" => "Oranges require warm climates and well-drained, sandy soil with a pH of 6.0–7.5.",
        "papaya" => "Papayas require a tropical climate with temperatures between 25–30°C and well-drained soil.",
        "coconut" => "Coconuts grow in tropical climates with temperatures around 27°C. Ensure high humidity and sandy soil.",
        "cotton" => "Cotton requires a hot, dry climate with temperatures between 21–30°C and well-drained soil.",
        "jute" => "Jute thrives in warm, humid climates and requires plenty of water and a pH of 6.0–7.0.",
        "coffee" => "Coffee grows best in a cool, tropical climate with temperatures between 15–25°C and acidic, well-drained soil.",
        _ => "Treatment information is not available for this crop.",
    }
}
