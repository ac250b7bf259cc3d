//! Generative-text service client
//!
//! Sends natural-language prompts to a hosted Gemini-style
//! `generateContent` endpoint and parses the free-form reply as a
//! comma-separated crop list. No schema validation, no retry on malformed
//! output; a bad reply simply yields fewer (or zero) crops.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::external::SeasonalAdvisor;
use shared::{parse_crop_list, FieldReadings, Season};

/// Client for the hosted text-generation service
#[derive(Clone)]
pub struct GenerativeClient {
    client: Client,
    api_endpoint: String,
    api_key: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

impl GenerativeClient {
    /// Create a new client against the given endpoint
    pub fn new(api_endpoint: String, api_key: String, model: String) -> Self {
        Self {
            client: Client::new(),
            api_endpoint,
            api_key,
            model,
        }
    }

    /// Send one prompt and return the raw reply text
    async fn generate(&self, prompt: &str) -> AppResult<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.api_endpoint, self.model, self.api_key
        );

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::AdvisorError(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::AdvisorError(format!(
                "API returned {}: {}",
                status, body
            )));
        }

        let data: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AppError::AdvisorError(format!("failed to parse response: {}", e)))?;

        let text = data
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| AppError::AdvisorError("response carried no text".to_string()))?;

        Ok(text)
    }
}

#[async_trait]
impl SeasonalAdvisor for GenerativeClient {
    async fn seasonal_crops(&self, location: &str, season: Season) -> AppResult<Vec<String>> {
        let prompt = format!(
            "Based on historical agricultural and market demand trends, \
             what are the most in-demand crops for {} in {}? \
             Focus on crops that are popular in local markets and suitable for cultivation. \
             Return a list of 5-10 crops. \
             Only provide a comma-separated list of names with no numbers or extra text.",
            season.as_str(),
            location
        );

        let text = self.generate(&prompt).await?;
        Ok(parse_crop_list(&text))
    }

    async fn alternative_crops(&self, readings: &FieldReadings) -> AppResult<Vec<String>> {
        let prompt = format!(
            "Given the following field conditions: \
             Nitrogen: {}, Phosphorus: {}, Potassium: {}, Temperature: {}°C, \
             Humidity: {}%, pH: {}, Rainfall: {}mm, \
             suggest alternative crops that might grow well based on these conditions. \
             Focus on crops that are suitable for these conditions and are in-demand in local markets. \
             Return a list of 5-10 crops. \
             Only provide a comma-separated list of names with no numbers or extra text.",
            readings.nitrogen,
            readings.phosphorus,
            readings.potassium,
            readings.temperature,
            readings.humidity,
            readings.ph,
            readings.rainfall
        );

        let text = self.generate(&prompt).await?;
        Ok(parse_crop_list(&text))
    }
}
