// src/crawl/scope.rs
// =============================================================================
// Decides which discovered addresses belong to the crawl.
//
// Two rules are supported:
// - Host:       the hostname must equal the root's hostname exactly
//               (blog.site.com does NOT match site.com)
// - HostPrefix: only the first hostname label must match
//               (site.com, site.io and site.blog.net all match "site")
//
// Host is the default. Invalid addresses are never in scope.
// =============================================================================

use super::Address;
use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ScopeRule {
    /// Exact hostname match
    #[default]
    Host,
    /// Match on the hostname label before the first dot
    #[value(name = "prefix")]
    HostPrefix,
}

#[derive(Debug, Clone)]
pub struct Scope {
    rule: ScopeRule,
    key: Option<String>,
}

impl Scope {
    // Builds the scope from the crawl root
    //
    // A root without a host produces a scope that contains nothing.
    pub fn new(rule: ScopeRule, root: &Address) -> Self {
        let key = root.host().map(|host| scope_key(rule, host).to_string());
        Self { rule, key }
    }

    pub fn contains(&self, address: &Address) -> bool {
        if !address.is_valid() {
            return false;
        }

        match (&self.key, address.host()) {
            (Some(key), Some(host)) => scope_key(self.rule, host) == key,
            _ => false,
        }
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }
}

fn scope_key(rule: ScopeRule, host: &str) -> &str {
    match rule {
        ScopeRule::Host => host,
        ScopeRule::HostPrefix => host.split('.').next().unwrap_or(host),
    }
}
