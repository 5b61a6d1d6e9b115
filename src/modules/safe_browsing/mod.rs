//! URL reputation checks backed by the Google Safe Browsing Lookup API (v4).
//!
//! The rest of the application only sees [`UrlReputationChecker`]; the HTTP
//! client lives in [`SafeBrowsingClient`].

mod client;

pub use client::{
    SafeBrowsingClient, SafeBrowsingError, ThreatEntry, ThreatMatch, UrlReputationChecker,
};
