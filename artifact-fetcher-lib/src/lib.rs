pub mod artifacts;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod github;
pub mod logging;
pub mod release_client;
pub mod version_matcher;

#[cfg(test)]
pub mod test_helpers;
