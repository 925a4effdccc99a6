//! Fixed demo data loaded into an empty store.
//!
//! Every call builds fresh values, so mutating a live collection can never
//! leak back into the demo set.

use serde_json::json;

use crate::types::{ResultSet, Survey};

/// Name prefix for surveys created without an explicit name.
pub const DEFAULT_SURVEY_NAME: &str = "New Survey";

const PRODUCT_FEEDBACK_SCHEMA: &str = r#"{
  "pages": [
    {
      "name": "page1",
      "elements": [
        {
          "type": "matrix",
          "name": "Quality",
          "title": "Please indicate if you agree or disagree with the following statements",
          "columns": [
            { "value": 1, "text": "Strongly Disagree" },
            { "value": 2, "text": "Disagree" },
            { "value": 3, "text": "Neutral" },
            { "value": 4, "text": "Agree" },
            { "value": 5, "text": "Strongly Agree" }
          ],
          "rows": [
            { "value": "affordable", "text": "Product is affordable" },
            { "value": "does what it claims", "text": "Product does what it claims" },
            { "value": "better than others", "text": "Product is better than other products on the market" },
            { "value": "easy to use", "text": "Product is easy to use" }
          ]
        },
        {
          "type": "rating",
          "name": "satisfaction",
          "title": "How satisfied are you with the Product?",
          "minRateDescription": "Not Satisfied",
          "maxRateDescription": "Completely satisfied"
        },
        {
          "type": "comment",
          "name": "suggestions",
          "title": "What would make you more satisfied with the Product?"
        }
      ]
    }
  ]
}"#;

const INCOME_SCHEMA: &str = r#"{
  "pages": [
    {
      "name": "page1",
      "elements": [
        {
          "type": "radiogroup",
          "name": "maritalstatus_c",
          "title": "Marital status",
          "choices": ["Married", "Single"]
        },
        {
          "type": "panel",
          "name": "income",
          "title": "Income",
          "elements": [
            {
              "type": "text",
              "name": "income_c",
              "title": "Your monthly income",
              "inputType": "number"
            },
            {
              "type": "text",
              "name": "income_p",
              "title": "Your partner's monthly income",
              "inputType": "number",
              "visibleIf": "{maritalstatus_c} = 'Married'"
            }
          ]
        }
      ]
    }
  ]
}"#;

/// The demo surveys, in insertion order.
pub fn demo_surveys() -> Vec<Survey> {
    vec![
        Survey::new("1", "Product Feedback Survey", PRODUCT_FEEDBACK_SCHEMA),
        Survey::new("2", "Customer and their partner income survey", INCOME_SCHEMA),
    ]
}

/// Results matching the demo surveys by id.
pub fn demo_results() -> Vec<ResultSet> {
    vec![
        ResultSet {
            id: "1".to_string(),
            data: vec![
                json!({
                    "Quality": {
                        "affordable": "3",
                        "better than others": "3",
                        "does what it claims": "4",
                        "easy to use": "5"
                    },
                    "satisfaction": 4,
                    "suggestions": "Lower the price"
                }),
                json!({
                    "Quality": {
                        "affordable": "2",
                        "better than others": "2",
                        "does what it claims": "3",
                        "easy to use": "3"
                    },
                    "satisfaction": 3
                }),
            ],
        },
        ResultSet {
            id: "2".to_string(),
            data: vec![
                json!({"maritalstatus_c": "Married", "income_c": 3500, "income_p": 2800}),
                json!({"maritalstatus_c": "Single", "income_c": 4100}),
            ],
        },
    ]
}
