//! The compiled-in case file registry
//!
//! Pure configuration data: three reviewed research case files. The
//! registry is constructed once at startup and never mutated.

use super::{Alignment, AlignmentScore, CaseStatus, Classification};
use serde::{Deserialize, Serialize};

/// A single research case file record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseFile {
    pub id: String,
    pub title: String,
    pub classification: Classification,
    pub status: CaseStatus,
    pub alignment: Alignment,
    /// Last access timestamp, as recorded in the registry
    pub last_accessed: String,
    pub agent: String,
    pub focus: String,
    pub methodology: Vec<String>,
    pub conclusions: String,
    pub gaps: String,
    /// Opaque reference to an attached document, if any
    pub document_path: Option<String>,
    pub score: AlignmentScore,
}

impl CaseFile {
    /// One-line summary for list views
    pub fn brief(&self) -> String {
        format!("{} {} [{}]", self.id, self.title, self.status)
    }
}

/// The fixed case registry, in display order
pub fn case_files() -> Vec<CaseFile> {
    vec![
        CaseFile {
            id: "CASE-001".to_string(),
            title: "Experimental Design: The Germination of an Experimental Study Indulging Strawberries".to_string(),
            classification: Classification::TopSecret,
            status: CaseStatus::Active,
            alignment: Alignment::High,
            last_accessed: "2024-03-15T09:23:00Z".to_string(),
            agent: "AGENT-007".to_string(),
            focus: "Investigating optimal conditions for strawberry germination through controlled experimental design, focusing on temperature, humidity, and soil composition variables".to_string(),
            methodology: vec![
                "Systematic temperature variation experiments (15°C to 30°C)".to_string(),
                "Humidity level testing (40% to 80% relative humidity)".to_string(),
                "Soil composition analysis with varying organic matter content".to_string(),
                "Statistical analysis using ANOVA and regression models".to_string(),
                "Control group implementation with standard growing conditions".to_string(),
            ],
            conclusions: "Optimal germination conditions identified at 22°C with 65% humidity. Soil composition with 30% organic matter showed highest success rate (87%). Temperature variations beyond ±3°C significantly reduced germination rates. Humidity levels below 50% resulted in 40% lower success rates".to_string(),
            gaps: "Limited to laboratory conditions, need for field testing across different seasons, potential genetic variations not accounted for, and long-term growth monitoring required".to_string(),
            document_path: Some("docs/case-001-findings.txt".to_string()),
            score: AlignmentScore {
                focus: 92,
                methodology: 95,
                analysis: 88,
                conclusions: 90,
                gaps: 85,
            },
        },
        CaseFile {
            id: "CASE-002".to_string(),
            title: "Content Analysis: Advertising Appeals of Nike Sportswear and User Engagement".to_string(),
            classification: Classification::TopSecret,
            status: CaseStatus::Active,
            alignment: Alignment::High,
            last_accessed: "2024-03-18T14:45:00Z".to_string(),
            agent: "AGENT-007".to_string(),
            focus: "Comprehensive analysis of Nike's advertising strategies and their impact on user engagement across digital platforms".to_string(),
            methodology: vec![
                "Content analysis of 100 Nike advertisements from 2020-2023".to_string(),
                "Engagement metrics tracking across social media platforms".to_string(),
                "A/B testing of different emotional and rational appeals".to_string(),
                "User sentiment analysis through social media monitoring".to_string(),
                "Cross-platform performance comparison".to_string(),
            ],
            conclusions: "Emotional appeals showed 40% higher engagement rates than rational appeals. Social proof elements increased conversion by 25%. Video content outperformed static images by 60%. User-generated content showed 35% higher trust metrics".to_string(),
            gaps: "Limited to digital campaigns, potential cultural bias in appeal effectiveness, need for longitudinal study, and offline impact not measured".to_string(),
            document_path: None,
            score: AlignmentScore {
                focus: 88,
                methodology: 90,
                analysis: 92,
                conclusions: 85,
                gaps: 82,
            },
        },
        CaseFile {
            id: "CASE-003".to_string(),
            title: "Mixed Method: Bridging the Ball Gap".to_string(),
            classification: Classification::TopSecret,
            status: CaseStatus::Active,
            alignment: Alignment::High,
            last_accessed: "2024-03-19T16:30:00Z".to_string(),
            agent: "AGENT-007".to_string(),
            focus: "Comprehensive investigation of ball design impact on player performance and injury prevention through combined survey and experimental approaches".to_string(),
            methodology: vec![
                "Quantitative analysis of player performance metrics across 500 games".to_string(),
                "Qualitative interviews with 50 professional athletes".to_string(),
                "Biomechanical analysis of different ball designs".to_string(),
                "Statistical analysis of injury rates and patterns".to_string(),
                "Comparative study of traditional vs. optimized ball designs".to_string(),
            ],
            conclusions: "Ball design significantly impacts player performance and safety. Key findings show a 23% reduction in injury rates with optimized ball design, 15% improvement in player accuracy, and 30% better grip feedback. New design showed 40% higher player satisfaction".to_string(),
            gaps: "Limited data on long-term effects, need for more diverse sport-specific studies, potential bias in professional athlete sample, and environmental factors not fully considered".to_string(),
            document_path: None,
            score: AlignmentScore {
                focus: 95,
                methodology: 93,
                analysis: 90,
                conclusions: 92,
                gaps: 88,
            },
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn registry_has_three_records_in_order() {
        let cases = case_files();
        assert_eq!(cases.len(), 3);
        let ids: Vec<&str> = cases.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["CASE-001", "CASE-002", "CASE-003"]);
    }

    #[test]
    fn registry_ids_are_unique() {
        let cases = case_files();
        let ids: HashSet<&str> = cases.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids.len(), cases.len());
    }

    #[test]
    fn all_scores_within_range() {
        for case in case_files() {
            for value in case.score.as_array() {
                assert!(value <= 100, "{}: score {} out of range", case.id, value);
            }
        }
    }

    #[test]
    fn brief_names_id_and_status() {
        let cases = case_files();
        let brief = cases[0].brief();
        assert!(brief.contains("CASE-001"));
        assert!(brief.contains("ACTIVE"));
    }
}
