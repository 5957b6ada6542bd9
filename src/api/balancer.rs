//! Round-robin selection of AJAX mirrors.

use std::sync::atomic::{AtomicUsize, Ordering};

use url::Url;

use crate::error::{Error, Result};

/// Hands out mirror endpoints, `per_host` consecutive requests each.
///
/// The position inside one full cycle (`hosts.len() * per_host` requests) is
/// advanced with a single compare-and-swap, so concurrent callers always see
/// every host exactly `per_host` times per cycle.
#[derive(Debug)]
pub struct Balancer {
    hosts: Vec<Url>,
    per_host: usize,
    position: AtomicUsize,
}

impl Balancer {
    /// Create a balancer over `hosts`, switching host after `per_host` requests.
    pub fn new(hosts: Vec<Url>, per_host: usize) -> Result<Self> {
        if hosts.is_empty() {
            return Err(Error::MissingConfig("at least one mirror host".to_string()));
        }
        if per_host == 0 {
            return Err(Error::ConfigValidation {
                field: "requests_per_mirror".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            hosts,
            per_host,
            position: AtomicUsize::new(0),
        })
    }

    /// Number of requests in one full rotation.
    pub fn cycle_len(&self) -> usize {
        self.hosts.len() * self.per_host
    }

    /// Next host in rotation.
    pub fn next(&self) -> &Url {
        let cycle = self.cycle_len();
        let position = self
            .position
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |p| Some((p + 1) % cycle))
            .unwrap_or_else(|p| p);

        &self.hosts[position / self.per_host]
    }
}
