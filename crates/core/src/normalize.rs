//! Normalization of the raw graphs payload

use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::data::{BenchmarkEntry, DashboardPayload, Profile, ProfileBucket, RawDashboardPayload};

/// Lower-case profile keys and turn interpolated index lists into sets.
///
/// The payload is consumed so every series is moved into the result. Profile
/// labels are matched case-insensitively; unknown labels are skipped, and when
/// two labels name the same profile the first in sorted order is kept.
pub fn normalize(raw: RawDashboardPayload) -> DashboardPayload {
    let mut benchmarks = BTreeMap::new();

    for (name, profiles) in raw.benchmarks {
        let mut entry = BenchmarkEntry::default();

        for (label, scenarios) in profiles {
            let Some(profile) = Profile::from_label(&label) else {
                debug!(benchmark = %name, profile = %label, "skipping unknown profile");
                continue;
            };

            let bucket: ProfileBucket = scenarios
                .into_iter()
                .map(|(scenario, series)| (scenario, series.into()))
                .collect();

            if !entry.insert(profile, bucket) {
                warn!(
                    benchmark = %name,
                    profile = %label,
                    "duplicate profile label, keeping the first one"
                );
            }
        }

        benchmarks.insert(name, entry);
    }

    DashboardPayload {
        commits: raw.commits,
        benchmarks,
    }
}
