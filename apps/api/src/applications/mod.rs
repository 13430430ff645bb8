// Application tracking reads: a job seeker's own tracking records and
// recruiter pipeline applications with their status timeline.

pub mod handlers;
