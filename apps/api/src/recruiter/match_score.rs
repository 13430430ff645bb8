//! Filter-based match scoring for the recruiter candidate search.
//!
//! Each active criterion (job role, location, experience range) counts once; the score is
//! the rounded percentage of active criteria the candidate satisfies. With no active
//! criteria every candidate scores 100.

use serde::Deserialize;

use crate::models::user::CandidateProfile;

/// Sentinel the UI sends for "no preference".
const ANY: &str = "all";

/// Years-of-experience bucket as sent by the filter UI: `"5-8"`, `"8+"` or `"8"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperienceRange {
    Between { min: i32, max: i32 },
    AtLeast { min: i32 },
}

impl ExperienceRange {
    /// Returns `None` when the text is not a recognizable range.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();

        if let Some(min) = text.strip_suffix('+') {
            return min.trim().parse().ok().map(|min| ExperienceRange::AtLeast { min });
        }

        match text.split_once('-') {
            Some((min, max)) => {
                let min = min.trim().parse().ok()?;
                let max = max.trim().parse().ok()?;
                Some(ExperienceRange::Between { min, max })
            }
            None => text.parse().ok().map(|min| ExperienceRange::AtLeast { min }),
        }
    }

    /// Inclusive at both ends.
    pub fn contains(&self, years: i32) -> bool {
        match *self {
            ExperienceRange::Between { min, max } => (min..=max).contains(&years),
            ExperienceRange::AtLeast { min } => years >= min,
        }
    }
}

/// Query parameters of the candidate search.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateFilter {
    pub job_role: Option<String>,
    pub location: Option<String>,
    pub experience: Option<String>,
    /// Candidates scoring below this are dropped from the result.
    pub min_score: Option<u32>,
}

impl CandidateFilter {
    fn active(value: &Option<String>) -> Option<&str> {
        value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case(ANY))
    }

    pub fn job_role(&self) -> Option<&str> {
        Self::active(&self.job_role)
    }

    pub fn location(&self) -> Option<&str> {
        Self::active(&self.location)
    }

    pub fn experience(&self) -> Option<&str> {
        Self::active(&self.experience)
    }
}

pub fn calculate_match_score(candidate: &CandidateProfile, filter: &CandidateFilter) -> u32 {
    let mut total_criteria = 0u32;
    let mut matched = 0u32;

    if let Some(role) = filter.job_role() {
        total_criteria += 1;
        if candidate.job_role.as_deref().map(str::trim) == Some(role) {
            matched += 1;
        }
    }

    if let Some(location) = filter.location() {
        total_criteria += 1;
        let wanted = location.to_lowercase();
        if candidate
            .location
            .as_deref()
            .is_some_and(|l| l.to_lowercase().contains(&wanted))
        {
            matched += 1;
        }
    }

    if let Some(experience) = filter.experience() {
        total_criteria += 1;
        // An unparsable range still counts as a criterion, it just never matches.
        let in_range = ExperienceRange::parse(experience)
            .zip(candidate.years_of_experience)
            .is_some_and(|(range, years)| range.contains(years));
        if in_range {
            matched += 1;
        }
    }

    if total_criteria == 0 {
        return 100;
    }
    (f64::from(matched) / f64::from(total_criteria) * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(role: &str, location: &str, years: Option<i32>) -> CandidateProfile {
        CandidateProfile {
            name: "Grace".to_string(),
            job_role: Some(role.to_string()),
            location: Some(location.to_string()),
            years_of_experience: years,
            ..CandidateProfile::default()
        }
    }

    fn filter(role: Option<&str>, location: Option<&str>, experience: Option<&str>) -> CandidateFilter {
        CandidateFilter {
            job_role: role.map(str::to_string),
            location: location.map(str::to_string),
            experience: experience.map(str::to_string),
            min_score: None,
        }
    }

    #[test]
    fn test_closed_range_matches_inside_only() {
        let f = filter(None, None, Some("5-8"));
        assert_eq!(calculate_match_score(&candidate("Dev", "Pune", Some(6)), &f), 100);
        assert_eq!(calculate_match_score(&candidate("Dev", "Pune", Some(5)), &f), 100);
        assert_eq!(calculate_match_score(&candidate("Dev", "Pune", Some(8)), &f), 100);
        assert_eq!(calculate_match_score(&candidate("Dev", "Pune", Some(9)), &f), 0);
        assert_eq!(calculate_match_score(&candidate("Dev", "Pune", Some(4)), &f), 0);
    }

    #[test]
    fn test_open_range() {
        let f = filter(None, None, Some("8+"));
        assert_eq!(calculate_match_score(&candidate("Dev", "Pune", Some(10)), &f), 100);
        assert_eq!(calculate_match_score(&candidate("Dev", "Pune", Some(8)), &f), 100);
        assert_eq!(calculate_match_score(&candidate("Dev", "Pune", Some(7)), &f), 0);
    }

    #[test]
    fn test_no_active_filters_scores_100() {
        let c = candidate("Dev", "Pune", None);
        assert_eq!(calculate_match_score(&c, &CandidateFilter::default()), 100);
        let all = filter(Some("all"), Some("ALL"), Some(" "));
        assert_eq!(calculate_match_score(&c, &all), 100);
    }

    #[test]
    fn test_single_matching_criterion_scores_100() {
        let f = filter(Some("Backend Developer"), None, None);
        let c = candidate(" Backend Developer ", "Remote", Some(2));
        assert_eq!(calculate_match_score(&c, &f), 100);
    }

    #[test]
    fn test_partial_match_rounds() {
        // role matches, location does not, experience matches: 2 of 3
        let f = filter(Some("Data Engineer"), Some("berlin"), Some("2-4"));
        let c = candidate("Data Engineer", "Munich, Germany", Some(3));
        assert_eq!(calculate_match_score(&c, &f), 67);
    }

    #[test]
    fn test_location_is_case_insensitive_containment() {
        let f = filter(None, Some("bangalore"), None);
        let c = candidate("Dev", "Bangalore, India", None);
        assert_eq!(calculate_match_score(&c, &f), 100);
    }

    #[test]
    fn test_role_requires_exact_case() {
        let f = filter(Some("backend developer"), None, None);
        let c = candidate("Backend Developer", "Pune", None);
        assert_eq!(calculate_match_score(&c, &f), 0);
    }

    #[test]
    fn test_missing_years_or_bad_range_never_match() {
        let c = candidate("Dev", "Pune", None);
        assert_eq!(calculate_match_score(&c, &filter(None, None, Some("5-8"))), 0);

        let c = candidate("Dev", "Pune", Some(6));
        assert_eq!(calculate_match_score(&c, &filter(None, None, Some("senior"))), 0);
    }

    #[test]
    fn test_range_parsing() {
        assert_eq!(
            ExperienceRange::parse("5-8"),
            Some(ExperienceRange::Between { min: 5, max: 8 })
        );
        assert_eq!(
            ExperienceRange::parse(" 8+ "),
            Some(ExperienceRange::AtLeast { min: 8 })
        );
        assert_eq!(
            ExperienceRange::parse("3"),
            Some(ExperienceRange::AtLeast { min: 3 })
        );
        assert_eq!(ExperienceRange::parse("a-b"), None);
    }
}
