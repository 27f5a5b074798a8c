#[cfg(test)]
mod common;

#[cfg(test)]
mod auth_tests;

#[cfg(test)]
mod membership_tests;

#[cfg(test)]
mod issue_create_tests;

#[cfg(test)]
mod issue_triage_tests;

#[cfg(test)]
mod donation_tests;

#[cfg(test)]
mod community_tests;

#[cfg(test)]
mod stats_tests;
