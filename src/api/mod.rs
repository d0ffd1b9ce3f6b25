pub mod assessment_api;
pub mod http;

pub use assessment_api::AssessmentApi;
pub use http::HttpAssessmentApi;

#[cfg(test)]
pub use assessment_api::MockAssessmentApi;
