//! The closed command table for the analysis terminal
//!
//! Every command the console understands is a variant here; anything
//! else resolves to [`Resolved::Unknown`]. Output bodies are canned,
//! except `status`, which stamps the wall clock at dispatch time.

use chrono::Local;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Commands the terminal accepts. Membership never changes at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Help,
    Analyze,
    Status,
    Gap,
    Methodology,
    Conclusion,
    Limitations,
    Cite,
    Reflection,
    Clear,
}

/// What a submitted line resolves to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    Known(Command),
    Empty,
    Unknown(String),
}

impl Command {
    pub const ALL: [Command; 10] = [
        Command::Help,
        Command::Analyze,
        Command::Status,
        Command::Gap,
        Command::Methodology,
        Command::Conclusion,
        Command::Limitations,
        Command::Cite,
        Command::Reflection,
        Command::Clear,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Command::Help => "help",
            Command::Analyze => "analyze",
            Command::Status => "status",
            Command::Gap => "gap",
            Command::Methodology => "methodology",
            Command::Conclusion => "conclusion",
            Command::Limitations => "limitations",
            Command::Cite => "cite",
            Command::Reflection => "reflection",
            Command::Clear => "clear",
        }
    }

    fn parse(token: &str) -> Option<Command> {
        match token {
            "help" => Some(Command::Help),
            "analyze" => Some(Command::Analyze),
            "status" => Some(Command::Status),
            "gap" => Some(Command::Gap),
            "methodology" => Some(Command::Methodology),
            "conclusion" => Some(Command::Conclusion),
            "limitations" => Some(Command::Limitations),
            "cite" => Some(Command::Cite),
            "reflection" => Some(Command::Reflection),
            "clear" => Some(Command::Clear),
            _ => None,
        }
    }

    /// Resolve a raw input line: trimmed, case-insensitive.
    pub fn resolve(line: &str) -> Resolved {
        let token = line.trim();
        if token.is_empty() {
            return Resolved::Empty;
        }
        match Command::parse(&token.to_lowercase()) {
            Some(cmd) => Resolved::Known(cmd),
            None => Resolved::Unknown(token.to_string()),
        }
    }

    /// The command's output block. Called at dispatch time so that
    /// `status` can stamp the current wall clock.
    pub fn output(&self) -> Vec<String> {
        match self {
            Command::Help => vec![
                "Available commands:".to_string(),
                "  analyze    - Run analysis on current case files".to_string(),
                "  status     - Display system status and case overview".to_string(),
                "  gap        - Identify research gaps in active cases".to_string(),
                "  methodology - Review methodology strength ratings".to_string(),
                "  conclusion - Display key findings summary".to_string(),
                "  limitations - List acknowledged study limitations".to_string(),
                "  cite       - Generate citation for selected research".to_string(),
                "  reflection - Access team reflection notes".to_string(),
                "  clear      - Clear terminal screen".to_string(),
                "  help       - Show this help message".to_string(),
                String::new(),
            ],

            Command::Analyze => vec![
                "ANALYSIS COMPLETE".to_string(),
                RULE.to_string(),
                "Case CASE-001: Experimental Design Study".to_string(),
                "  ✓ Methodology robust (95% confidence)".to_string(),
                "  ✓ Statistical significance achieved".to_string(),
                "  ✓ Temperature and humidity correlations validated".to_string(),
                String::new(),
                "Case CASE-002: Content Analysis Study".to_string(),
                "  ✓ Methodology validated (90% confidence)".to_string(),
                "  ✓ Multi-platform analysis complete".to_string(),
                "  ✓ Engagement metrics validated".to_string(),
                String::new(),
                "Case CASE-003: Mixed Method Study".to_string(),
                "  ✓ Methodology strengthened (93% confidence)".to_string(),
                "  ✓ Quantitative and qualitative data integrated".to_string(),
                "  ✓ Performance metrics validated".to_string(),
                String::new(),
                "RECOMMENDATION: All cases meet publication standards".to_string(),
                String::new(),
            ],

            Command::Status => vec![
                "SYSTEM STATUS REPORT".to_string(),
                RULE.to_string(),
                format!("Timestamp: {}", Local::now().format("%Y-%m-%d %H:%M:%S")),
                "Classification Level: ALPHA".to_string(),
                "Active Cases: 3".to_string(),
                "  • CASE-001: Experimental Design [HIGH] ✓".to_string(),
                "  • CASE-002: Content Analysis [HIGH] ✓".to_string(),
                "  • CASE-003: Mixed Method [HIGH] ✓".to_string(),
                String::new(),
                "System Health: OPERATIONAL".to_string(),
                "Security Status: SECURE".to_string(),
                "Review Status: ALL APPROVED".to_string(),
                "Last Backup: 2024-03-19 16:30:00".to_string(),
                String::new(),
            ],

            Command::Gap => vec![
                "RESEARCH GAP ANALYSIS".to_string(),
                RULE.to_string(),
                "CASE-001 Gap Resolution:".to_string(),
                "  ✓ Laboratory to field testing transition planned".to_string(),
                "  ✓ Seasonal variation study initiated".to_string(),
                "  ✓ Genetic diversity analysis scheduled".to_string(),
                String::new(),
                "CASE-002 Gap Resolution:".to_string(),
                "  ✓ Cross-cultural validation in progress".to_string(),
                "  ✓ Long-term impact assessment planned".to_string(),
                "  ✓ Offline impact measurement framework developed".to_string(),
                String::new(),
                "CASE-003 Gap Resolution:".to_string(),
                "  ✓ Long-term performance tracking initiated".to_string(),
                "  ✓ Environmental factor analysis scheduled".to_string(),
                "  ✓ Cross-sport validation planned".to_string(),
                String::new(),
                "Status: RESEARCH GAPS BEING SYSTEMATICALLY ADDRESSED".to_string(),
                String::new(),
            ],

            Command::Methodology => vec![
                "METHODOLOGY STRENGTH ASSESSMENT".to_string(),
                RULE.to_string(),
                "CASE-001 Methods:".to_string(),
                "  Temperature Control: ★★★★★".to_string(),
                "  Humidity Testing: ★★★★★".to_string(),
                "  Soil Analysis: ★★★★★".to_string(),
                "  Statistical Modeling: ★★★★★".to_string(),
                "  Control Implementation: ★★★★★".to_string(),
                String::new(),
                "CASE-002 Methods:".to_string(),
                "  Content Analysis: ★★★★★".to_string(),
                "  Engagement Tracking: ★★★★☆".to_string(),
                "  A/B Testing: ★★★★★".to_string(),
                "  Sentiment Analysis: ★★★★☆".to_string(),
                "  Cross-Platform Analysis: ★★★★★".to_string(),
                String::new(),
                "CASE-003 Methods:".to_string(),
                "  Performance Metrics: ★★★★★".to_string(),
                "  Athlete Interviews: ★★★★☆".to_string(),
                "  Biomechanical Analysis: ★★★★★".to_string(),
                "  Injury Rate Analysis: ★★★★☆".to_string(),
                "  Design Comparison: ★★★★★".to_string(),
                String::new(),
                "Overall Assessment: ROBUST methodology across all cases".to_string(),
                String::new(),
            ],

            Command::Conclusion => vec![
                "KEY FINDINGS SUMMARY".to_string(),
                RULE.to_string(),
                "CASE-001 Conclusions:".to_string(),
                "  • Optimal temperature: 22°C (87% success rate)".to_string(),
                "  • Ideal humidity: 65% (p<0.001)".to_string(),
                "  • Soil composition: 30% organic matter optimal".to_string(),
                "  • Temperature sensitivity: ±3°C critical range".to_string(),
                String::new(),
                "CASE-002 Conclusions:".to_string(),
                "  • Emotional appeals: 40% higher engagement".to_string(),
                "  • Social proof: 25% conversion increase".to_string(),
                "  • Video content: 60% better performance".to_string(),
                "  • User-generated content: 35% higher trust".to_string(),
                String::new(),
                "CASE-003 Conclusions:".to_string(),
                "  • Injury reduction: 23% with new design".to_string(),
                "  • Accuracy improvement: 15%".to_string(),
                "  • Grip feedback: 30% better".to_string(),
                "  • Player satisfaction: 40% higher".to_string(),
                String::new(),
                "Meta-Analysis: HIGH confidence findings across all studies".to_string(),
                String::new(),
            ],

            Command::Limitations => vec![
                "LIMITATIONS ASSESSMENT & RESOLUTION".to_string(),
                RULE.to_string(),
                "CASE-001 Limitations → Resolution:".to_string(),
                "  ✗ Lab-only conditions → ✓ Field testing planned".to_string(),
                "  ✗ Seasonal variation → ✓ Year-round study initiated".to_string(),
                "  ✗ Genetic factors → ✓ Diversity analysis scheduled".to_string(),
                String::new(),
                "CASE-002 Limitations → Resolution:".to_string(),
                "  ✗ Digital-only focus → ✓ Offline impact framework".to_string(),
                "  ✗ Cultural bias → ✓ Cross-cultural validation".to_string(),
                "  ✗ Short-term data → ✓ Longitudinal study planned".to_string(),
                String::new(),
                "CASE-003 Limitations → Resolution:".to_string(),
                "  ✗ Long-term effects → ✓ Extended tracking initiated".to_string(),
                "  ✗ Sport specificity → ✓ Cross-sport validation".to_string(),
                "  ✗ Environmental factors → ✓ Comprehensive analysis".to_string(),
                String::new(),
                "Status: LIMITATIONS BEING SYSTEMATICALLY ADDRESSED".to_string(),
                String::new(),
            ],

            Command::Cite => vec![
                "CITATION GENERATOR".to_string(),
                RULE.to_string(),
                "CASE-001 Citation (MLA Format):".to_string(),
                "Agent-007. \"Experimental Design: The Germination of an Experimental Study Indulging Strawberries.\"".to_string(),
                "Research Intelligence Case File CASE-001, 15 Mar. 2024.".to_string(),
                "Classification: TOP SECRET. Status: ACTIVE.".to_string(),
                String::new(),
                "CASE-002 Citation (MLA Format):".to_string(),
                "Agent-007. \"Content Analysis: Advertising Appeals of Nike Sportswear and User Engagement.\"".to_string(),
                "Research Intelligence Case File CASE-002, 18 Mar. 2024.".to_string(),
                "Classification: TOP SECRET. Status: ACTIVE.".to_string(),
                String::new(),
                "CASE-003 Citation (MLA Format):".to_string(),
                "Agent-007. \"Mixed Method: Bridging the Ball Gap.\"".to_string(),
                "Research Intelligence Case File CASE-003, 19 Mar. 2024.".to_string(),
                "Classification: TOP SECRET. Status: ACTIVE.".to_string(),
                String::new(),
                "Note: All cases approved for academic citation".to_string(),
                String::new(),
            ],

            Command::Reflection => vec![
                "TEAM REFLECTION ACCESS".to_string(),
                RULE.to_string(),
                "Meta-Level AP Research Process Reflection:".to_string(),
                String::new(),
                "1. Research Question Development:".to_string(),
                "   ✓ Clear experimental design established".to_string(),
                "   ✓ Content analysis framework validated".to_string(),
                "   ✓ Mixed method approach successfully integrated".to_string(),
                String::new(),
                "2. Methodology Selection & Validation:".to_string(),
                "   ✓ Controlled experiments properly designed".to_string(),
                "   ✓ Content analysis systematically conducted".to_string(),
                "   ✓ Survey and experimental data effectively combined".to_string(),
                "   ✓ Peer review process completed successfully".to_string(),
                String::new(),
                "3. Analysis & Quality Assurance:".to_string(),
                "   ✓ Statistical significance achieved".to_string(),
                "   ✓ Qualitative insights validated".to_string(),
                "   ✓ Mixed method integration successful".to_string(),
                "   ✓ Practical implications demonstrated".to_string(),
                String::new(),
                "4. Academic Growth & Professional Development:".to_string(),
                "   ✓ Experimental design mastery achieved".to_string(),
                "   ✓ Content analysis skills developed".to_string(),
                "   ✓ Mixed method research expertise gained".to_string(),
                "   ✓ Publication-ready work produced".to_string(),
                String::new(),
                "Final Assessment: EXCEPTIONAL research execution across all methodologies".to_string(),
                "Recommendation: READY FOR ADVANCED ACADEMIC RESEARCH".to_string(),
                String::new(),
            ],

            // Handled synchronously by the console; never dispatched.
            Command::Clear => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_is_trimmed_and_case_insensitive() {
        assert_eq!(Command::resolve("help"), Resolved::Known(Command::Help));
        assert_eq!(Command::resolve("HELP"), Resolved::Known(Command::Help));
        assert_eq!(Command::resolve("  help  "), Resolved::Known(Command::Help));
        assert_eq!(Command::resolve("StAtUs"), Resolved::Known(Command::Status));
    }

    #[test]
    fn resolve_empty_and_whitespace() {
        assert_eq!(Command::resolve(""), Resolved::Empty);
        assert_eq!(Command::resolve("   "), Resolved::Empty);
    }

    #[test]
    fn resolve_unknown_keeps_trimmed_token() {
        assert_eq!(
            Command::resolve("  frobnicate  "),
            Resolved::Unknown("frobnicate".to_string())
        );
    }

    #[test]
    fn every_command_round_trips_through_its_name() {
        for cmd in Command::ALL {
            assert_eq!(Command::resolve(cmd.name()), Resolved::Known(cmd));
        }
    }

    #[test]
    fn output_blocks_end_with_blank_line() {
        for cmd in Command::ALL {
            if cmd == Command::Clear {
                continue;
            }
            let block = cmd.output();
            assert_eq!(block.last().map(String::as_str), Some(""), "{:?}", cmd);
        }
    }

    #[test]
    fn status_embeds_current_year() {
        let year = Local::now().format("%Y").to_string();
        let block = Command::Status.output();
        assert!(block.iter().any(|l| l.starts_with("Timestamp:") && l.contains(&year)));
    }
}
