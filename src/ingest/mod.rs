/// Upstream data access.
///
/// Submodules:
/// - `http`        — the injected "fetch JSON from URL" capability + reqwest impl
/// - `opensensemap` — URL construction and response parsing for openSenseMap
/// - `fixtures`    — representative API payloads (test only)

pub mod http;
pub mod opensensemap;

#[cfg(test)]
pub(crate) mod fixtures;
