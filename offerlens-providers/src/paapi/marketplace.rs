//! PA-API marketplace endpoints.
//!
//! Each marketplace domain maps to a regional API host and the signing
//! region that host expects. Requests signed for the wrong region are
//! rejected upstream, so the mapping is fixed here rather than left to
//! configuration.

/// One marketplace endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marketplace {
    /// Retail site domain, e.g. `www.amazon.com`.
    pub domain: &'static str,
    /// API host serving this marketplace.
    pub host: &'static str,
    /// Signing region for this host.
    pub region: &'static str,
}

/// All supported marketplaces.
pub const MARKETPLACES: [Marketplace; 16] = [
    Marketplace {
        domain: "www.amazon.com",
        host: "webservices.amazon.com",
        region: "us-east-1",
    },
    Marketplace {
        domain: "www.amazon.co.uk",
        host: "webservices.amazon.co.uk",
        region: "eu-west-1",
    },
    Marketplace {
        domain: "www.amazon.de",
        host: "webservices.amazon.de",
        region: "eu-west-1",
    },
    Marketplace {
        domain: "www.amazon.fr",
        host: "webservices.amazon.fr",
        region: "eu-west-1",
    },
    Marketplace {
        domain: "www.amazon.it",
        host: "webservices.amazon.it",
        region: "eu-west-1",
    },
    Marketplace {
        domain: "www.amazon.es",
        host: "webservices.amazon.es",
        region: "eu-west-1",
    },
    Marketplace {
        domain: "www.amazon.nl",
        host: "webservices.amazon.nl",
        region: "eu-west-1",
    },
    Marketplace {
        domain: "www.amazon.co.jp",
        host: "webservices.amazon.co.jp",
        region: "us-west-2",
    },
    Marketplace {
        domain: "www.amazon.ca",
        host: "webservices.amazon.ca",
        region: "us-east-1",
    },
    Marketplace {
        domain: "www.amazon.com.mx",
        host: "webservices.amazon.com.mx",
        region: "us-east-1",
    },
    Marketplace {
        domain: "www.amazon.com.br",
        host: "webservices.amazon.com.br",
        region: "us-east-1",
    },
    Marketplace {
        domain: "www.amazon.in",
        host: "webservices.amazon.in",
        region: "eu-west-1",
    },
    Marketplace {
        domain: "www.amazon.com.au",
        host: "webservices.amazon.com.au",
        region: "us-west-2",
    },
    Marketplace {
        domain: "www.amazon.sg",
        host: "webservices.amazon.sg",
        region: "us-west-2",
    },
    Marketplace {
        domain: "www.amazon.com.tr",
        host: "webservices.amazon.com.tr",
        region: "eu-west-1",
    },
    Marketplace {
        domain: "www.amazon.ae",
        host: "webservices.amazon.ae",
        region: "eu-west-1",
    },
];

/// Looks up a marketplace by retail domain.
pub fn marketplace_for(domain: &str) -> Option<&'static Marketplace> {
    MARKETPLACES
        .iter()
        .find(|marketplace| marketplace.domain == domain)
}
