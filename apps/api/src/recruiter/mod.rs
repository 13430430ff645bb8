// Recruiter surface: filter match scoring, candidate search, dashboard stats
// and the AI ranking endpoint.

pub mod candidates;
pub mod handlers;
pub mod match_score;
