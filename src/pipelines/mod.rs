pub mod site;
pub mod video;
pub mod web;

use crate::error::ImportError;
use crate::youtube::is_youtube_url;

/// Which handler a URL belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Cookpad,
    DelishKitchen,
    YouTube,
    /// Any other page; handled through JSON-LD or page text
    Web,
}

impl Source {
    /// Pick the handler for a URL. Anything that isn't an http(s) URL is
    /// rejected.
    pub fn detect(url: &str) -> Result<Self, ImportError> {
        let url = url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ImportError::InvalidUrl(url.to_string()));
        }

        let host = url_host(url).unwrap_or_default();
        let source = if host_matches(host, "cookpad.com") {
            Source::Cookpad
        } else if host_matches(host, "delishkitchen.tv") {
            Source::DelishKitchen
        } else if is_youtube_url(url) {
            Source::YouTube
        } else {
            Source::Web
        };

        Ok(source)
    }
}

/// Host part of an http(s) URL, without credentials or port.
pub fn url_host(url: &str) -> Option<&str> {
    let (_, rest) = url.trim().split_once("://")?;
    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let host = authority.rsplit('@').next().unwrap_or_default();
    let host = host.split(':').next().unwrap_or_default();
    (!host.is_empty()).then_some(host)
}

/// `host` is `domain` or one of its subdomains.
pub(crate) fn host_matches(host: &str, domain: &str) -> bool {
    host.eq_ignore_ascii_case(domain)
        || host
            .len()
            .checked_sub(domain.len() + 1)
            .is_some_and(|split| {
                host.as_bytes()[split] == b'.' && host[split + 1..].eq_ignore_ascii_case(domain)
            })
}
