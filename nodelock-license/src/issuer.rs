//! Issuance flows: node requests on the client side, grant fill-in on the
//! authority side.
//!
//! Interactive concerns (prompting for paths, node counts, expiry dates)
//! stay outside this crate; callers collect [`IssueOptions`] however they
//! like and the functions here apply the grant policy.

use crate::device::Fingerprint;
use crate::error::{LicenseError, LicenseResult};
use chrono::{Days, Months, NaiveDateTime};
use nodelock_types::{timestamp, LicenseRecord};
use tracing::warn;

/// How long a node request stays acceptable to the authority, in days.
pub const NODE_REQUEST_TTL_DAYS: u64 = 1;

/// Policy floor for the node capacity of any grant.
pub const MIN_ALLOW_NODES: u32 = 3;

/// Nominal length of a permanent grant. The end bound is not enforced for
/// permanent grants; the date is written for display only.
pub const PERMANENT_GRANT_YEARS: u32 = 100;

/// Grant duration requested by the authority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrantTerm {
    /// Permanent grant: expiry is not enforced.
    Permanent,
    /// Term grant ending at the given wire-format timestamp.
    Until(String),
}

/// Authority-side issuance choices.
#[derive(Debug, Clone)]
pub struct IssueOptions {
    /// Requested node capacity; clamped up to [`MIN_ALLOW_NODES`].
    pub allow_nodes: u32,
    /// Grant duration.
    pub term: GrantTerm,
    /// Customer marker; defaults to the request's MAC address when empty.
    pub customer_tag: String,
    /// Module route prefix carried opaquely in the grant.
    pub model_route: String,
}

/// Builds the client-side node request that the authority later turns into
/// a grant.
///
/// The fingerprint provider returning an empty string means the platform
/// could not be identified; a request cannot be bound to such a machine.
pub fn create_node_request(
    provider: &dyn Fingerprint,
    mac_addr: impl Into<String>,
) -> LicenseResult<LicenseRecord> {
    let mother_board_id = provider.motherboard_id();
    if mother_board_id.is_empty() {
        return Err(LicenseError::FingerprintUnavailable);
    }
    Ok(LicenseRecord {
        start_time: timestamp::format(timestamp::now_local()),
        client_time_zone: timestamp::local_utc_offset(),
        mac_addr: mac_addr.into(),
        mother_board_id,
        ..Default::default()
    })
}

/// Fills in a node request to produce a grant, using the current wall clock.
pub fn issue(request: &LicenseRecord, opts: &IssueOptions) -> LicenseResult<LicenseRecord> {
    issue_at(request, opts, timestamp::now_local())
}

/// Fills in a node request to produce a grant, relative to `now`.
///
/// Grant policy:
/// - an unparseable request start time is reset to `now` (with a warning),
/// - a request older than [`NODE_REQUEST_TTL_DAYS`] is rejected as stale,
/// - a future start time is clamped to `now`,
/// - node capacity is clamped up to [`MIN_ALLOW_NODES`],
/// - permanent grants get `start + 100 years` as a nominal end,
/// - term grants must carry a parseable wire-format end time,
/// - an empty customer tag defaults to the request's MAC address.
///
/// The returned record has its integrity code cleared; encoding computes a
/// fresh one.
pub fn issue_at(
    request: &LicenseRecord,
    opts: &IssueOptions,
    now: NaiveDateTime,
) -> LicenseResult<LicenseRecord> {
    let mut record = request.clone();

    let mut start = match timestamp::parse(&record.start_time) {
        Ok(parsed) => parsed,
        Err(err) => {
            warn!(start_time = %record.start_time, %err, "unparseable request start time, resetting to now");
            record.start_time = timestamp::format(now);
            now
        }
    };

    let deadline = start
        .checked_add_days(Days::new(NODE_REQUEST_TTL_DAYS))
        .ok_or_else(|| LicenseError::InvalidTimestamp(record.start_time.clone()))?;
    if deadline < now {
        return Err(LicenseError::StaleRequest);
    }
    if start > now {
        start = now;
        record.start_time = timestamp::format(now);
    }

    record.license_create_time = timestamp::format(now);
    record.allow_nodes = opts.allow_nodes.max(MIN_ALLOW_NODES);

    match &opts.term {
        GrantTerm::Permanent => {
            let end = start
                .checked_add_months(Months::new(12 * PERMANENT_GRANT_YEARS))
                .ok_or_else(|| LicenseError::InvalidTimestamp(record.start_time.clone()))?;
            record.end_time = timestamp::format(end);
            record.permanent_auth = true;
        }
        GrantTerm::Until(end_time) => {
            timestamp::parse(end_time)?;
            record.end_time = end_time.clone();
            record.permanent_auth = false;
        }
    }

    record.customer_tag = if opts.customer_tag.is_empty() {
        record.mac_addr.clone()
    } else {
        opts.customer_tag.clone()
    };
    record.model_route = opts.model_route.clone();
    record.check_code = String::new();
    Ok(record)
}
