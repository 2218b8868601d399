use super::ActivityDetails;
use crate::error::{ActivityError, Result, ValidationIssue};
use serde::{Deserialize, Serialize};

/// Inclusive bounds for `review.score`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReviewScale {
    pub min: f64,
    pub max: f64,
}

impl Default for ReviewScale {
    fn default() -> Self {
        Self { min: 0.0, max: 5.0 }
    }
}

impl ReviewScale {
    pub fn contains(&self, score: f64) -> bool {
        score.is_finite() && score >= self.min && score <= self.max
    }
}

fn require_text(issues: &mut Vec<ValidationIssue>, field: String, text: &str) {
    if text.trim().is_empty() {
        issues.push(ValidationIssue::new(field, "must not be empty"));
    }
}

impl ActivityDetails {
    /// Check bounds and required text that the type system does not enforce.
    ///
    /// Every problem is collected; an empty list means the record is valid.
    pub fn validation_issues(&self, scale: &ReviewScale) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        require_text(&mut issues, "title".to_string(), &self.title);
        require_text(&mut issues, "url".to_string(), &self.url);

        if !scale.contains(self.review.score) {
            issues.push(ValidationIssue::new(
                "review.score",
                format!(
                    "{} is outside the rating scale {}..={}",
                    self.review.score, scale.min, scale.max
                ),
            ));
        }

        for (i, image) in self.images.iter().enumerate() {
            require_text(&mut issues, format!("images[{}].url", i), &image.url);
            if image.width == 0 {
                issues.push(ValidationIssue::new(
                    format!("images[{}].width", i),
                    "must be greater than 0",
                ));
            }
            if image.height == 0 {
                issues.push(ValidationIssue::new(
                    format!("images[{}].height", i),
                    "must be greater than 0",
                ));
            }
        }

        for (i, crumb) in self.breadcrumbs.iter().enumerate() {
            require_text(&mut issues, format!("breadcrumbs[{}].name", i), &crumb.name);
            require_text(&mut issues, format!("breadcrumbs[{}].url", i), &crumb.url);
        }

        issues
    }

    pub fn validate(&self, scale: &ReviewScale) -> Result<()> {
        let issues = self.validation_issues(scale);
        if issues.is_empty() {
            Ok(())
        } else {
            Err(ActivityError::Validation(issues))
        }
    }
}
