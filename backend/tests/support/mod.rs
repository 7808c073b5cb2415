#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use chrono::{DateTime, TimeZone, Utc};
use shiptrack::models::{Milestone, Shipment};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Fixed clock for relative-time assertions.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

/// Three shipments: one complete, one with no milestones, one complete but
/// with older milestones.
pub fn three_shipments() -> Vec<Shipment> {
    vec![
        Shipment::new("SHP-A", "Acme Industrial", "Rotterdam", "Oslo").with_milestones(vec![
            Milestone::new("Created", Some("2024-05-20T08:00:00Z")),
            Milestone::new("Delivered", Some("2024-05-31T09:00:00Z")),
        ]),
        Shipment::new("SHP-B", "Globex", "Hamburg", "Vienna").with_milestones(vec![]),
        Shipment::new("SHP-C", "acme retail", "Antwerp", "Lyon").with_milestones(vec![
            Milestone::new("Created", Some("2024-05-01T08:00:00Z")),
            Milestone::new("Picked up", Some("2024-05-02T08:00:00Z")),
        ]),
    ]
}

/// Runs `f` with environment variables temporarily modified.
///
/// Restores variables on unwind and serializes access to process-global env
/// vars, since tests run in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}
