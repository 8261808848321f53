//! Loading the member list for display.
//!
//! The live list comes from `GET /api/members`. When that fails the loader
//! either reports the error or, if configured to, serves the illustrative
//! dataset. Sample data is always tagged as such.

use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

use crate::clock::Clock;
use crate::config::DirectoryConfig;
use crate::error::Result;
use crate::query::MemberQuery;
use crate::sample::sample_records;
use crate::traits::api::DirectoryApi;
use crate::types::Member;

/// What to do when the live member list can't be fetched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    /// Propagate the fetch error.
    #[default]
    Disabled,
    /// Serve the illustrative dataset instead.
    SampleData,
}

impl From<&DirectoryConfig> for FallbackPolicy {
    fn from(config: &DirectoryConfig) -> Self {
        if config.sample_fallback {
            FallbackPolicy::SampleData
        } else {
            FallbackPolicy::Disabled
        }
    }
}

/// Where a listing's members came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemberSource {
    Live,
    Sample,
}

/// A loaded member list.
///
/// Ages are re-derived from the directory's clock every time members are
/// read, so a listing kept open across midnight stays correct.
#[derive(Clone)]
pub struct MemberListing {
    members: Vec<Member>,
    pub source: MemberSource,
    clock: Arc<dyn Clock>,
}

impl MemberListing {
    pub fn is_live(&self) -> bool {
        self.source == MemberSource::Live
    }

    pub fn total(&self) -> usize {
        self.members.len()
    }

    /// Every member, in backend order, aged as of today.
    pub fn members(&self) -> Vec<Member> {
        let today = self.clock.today();
        self.members
            .iter()
            .cloned()
            .map(|mut member| {
                member.refresh_age(today);
                member
            })
            .collect()
    }

    /// Run the query engine over this listing.
    pub fn query(&self, query: &MemberQuery) -> Vec<Member> {
        query.apply(&self.members())
    }
}

impl fmt::Debug for MemberListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberListing")
            .field("members", &self.members)
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

/// Fetches members and derives their ages from the injected clock.
pub struct MemberDirectory<A> {
    api: A,
    clock: Arc<dyn Clock>,
    fallback: FallbackPolicy,
}

impl<A: DirectoryApi> MemberDirectory<A> {
    pub fn new(api: A, clock: Arc<dyn Clock>) -> Self {
        Self {
            api,
            clock,
            fallback: FallbackPolicy::default(),
        }
    }

    pub fn with_fallback(mut self, fallback: FallbackPolicy) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn fallback(&self) -> FallbackPolicy {
        self.fallback
    }

    pub async fn load(&self) -> Result<MemberListing> {
        let today = self.clock.today();

        match self.api.list_members().await {
            Ok(records) => {
                info!(count = records.len(), "Loaded community members");
                Ok(MemberListing {
                    members: records
                        .into_iter()
                        .map(|record| Member::from_record(record, today))
                        .collect(),
                    source: MemberSource::Live,
                    clock: self.clock.clone(),
                })
            }
            Err(err) => match self.fallback {
                FallbackPolicy::Disabled => Err(err),
                FallbackPolicy::SampleData => {
                    warn!(error = %err, "Failed to fetch members, serving sample data");
                    Ok(MemberListing {
                        members: sample_records()
                            .into_iter()
                            .map(|record| Member::from_record(record, today))
                            .collect(),
                        source: MemberSource::Sample,
                        clock: self.clock.clone(),
                    })
                }
            },
        }
    }
}
