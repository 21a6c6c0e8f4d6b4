//! Availability of optional input readers.
//!
//! Readers gated behind cargo features are probed once per process, on
//! first use, and the answer is cached.

use std::fmt;
use std::sync::OnceLock;

static GSD_SUPPORT: OnceLock<Availability> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Available,
    Missing,
}

impl Availability {
    #[inline]
    pub fn is_available(self) -> bool {
        self == Availability::Available
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Availability::Available => write!(f, "available"),
            Availability::Missing => write!(f, "missing"),
        }
    }
}

/// Whether GSD trajectories can be read in this build.
pub fn gsd_support() -> Availability {
    *GSD_SUPPORT.get_or_init(|| {
        let availability = if cfg!(feature = "gsd") {
            Availability::Available
        } else {
            Availability::Missing
        };
        log::debug!("GSD trajectory support: {availability}");
        availability
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_is_stable() {
        assert_eq!(gsd_support(), gsd_support());
        assert_eq!(gsd_support().is_available(), cfg!(feature = "gsd"));
    }
}
