//! Host normalization and registered-domain extraction.
//!
//! Input lines may be bare hostnames or full URLs. [`normalize_host`] reduces
//! either form to a lowercase ASCII host (or an IP address), and [`extract`]
//! splits that host into subdomain, domain and public suffix using a
//! [`SuffixDatabase`].

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use once_cell::sync::Lazy;
use regex::Regex;
use url::Host;

use crate::database::SuffixDatabase;

static SCHEME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?i:[a-z0-9+.\-]+:)?//").expect("scheme pattern compiles"));

/// A line reduced to the part that suffix matching works on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizedHost {
    Name(String),
    Ip(IpAddr),
}

/// The pieces of a host, split around its public suffix.
///
/// Any field may be empty: `com` has only a suffix, an IP address or
/// `localhost` has only a domain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub subdomain: String,
    pub domain: String,
    pub suffix: String,
}

impl Extraction {
    /// Domain plus suffix, or an empty string when either is missing.
    pub fn registered_domain(&self) -> String {
        if self.domain.is_empty() || self.suffix.is_empty() {
            return String::new();
        }
        format!("{}.{}", self.domain, self.suffix)
    }

    /// Full host name, or an empty string when there is no registered domain.
    pub fn fqdn(&self) -> String {
        let registered = self.registered_domain();
        if registered.is_empty() || self.subdomain.is_empty() {
            return registered;
        }
        format!("{}.{}", self.subdomain, registered)
    }
}

pub fn normalize_host(input: &str) -> Option<NormalizedHost> {
    let input = input.trim();
    let without_scheme = match SCHEME_RE.find(input) {
        Some(scheme) => &input[scheme.end()..],
        None => input,
    };

    let netloc = without_scheme
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default();
    let netloc = netloc.rsplit('@').next().unwrap_or_default();

    if let Some(bracketed) = netloc.strip_prefix('[') {
        let literal = bracketed.split(']').next().unwrap_or_default();
        if let Ok(ip) = literal.parse::<Ipv6Addr>() {
            return Some(NormalizedHost::Ip(IpAddr::V6(ip)));
        }
    }

    let host = netloc
        .split(':')
        .next()
        .unwrap_or_default()
        .trim_end_matches('.')
        .to_lowercase();
    if host.is_empty() {
        return None;
    }

    if let Ok(ip) = host.parse::<Ipv4Addr>() {
        return Some(NormalizedHost::Ip(IpAddr::V4(ip)));
    }

    // IDNA-map to ASCII. Numeric shorthand like "1234" would otherwise be
    // read as an IPv4 address, so only domain results are taken.
    match Host::parse(&host) {
        Ok(Host::Domain(ascii)) if !ascii.is_empty() => Some(NormalizedHost::Name(ascii)),
        _ => Some(NormalizedHost::Name(host)),
    }
}

/// Splits one input line into its subdomain, domain and suffix.
///
/// Lines without a recognisable host (empty after normalization) give an
/// empty [`Extraction`]. Hosts with no known suffix keep their last label as
/// the domain and an empty suffix.
pub fn extract(database: &SuffixDatabase, input: &str) -> Extraction {
    let host = match normalize_host(input) {
        Some(NormalizedHost::Name(host)) => host,
        Some(NormalizedHost::Ip(ip)) => {
            return Extraction {
                domain: ip.to_string(),
                ..Extraction::default()
            }
        }
        None => return Extraction::default(),
    };

    let suffix_len = database.known_suffix_len(&host).unwrap_or(0);
    let (rest, suffix) = if suffix_len == 0 {
        (host.as_str(), "")
    } else if suffix_len >= host.len() {
        ("", host.as_str())
    } else {
        let split_at = host.len() - suffix_len;
        (&host[..split_at - 1], &host[split_at..])
    };

    let (subdomain, domain) = match rest.rsplit_once('.') {
        Some((subdomain, domain)) => (subdomain, domain),
        None => ("", rest),
    };

    Extraction {
        subdomain: subdomain.to_string(),
        domain: domain.to_string(),
        suffix: suffix.to_string(),
    }
}
