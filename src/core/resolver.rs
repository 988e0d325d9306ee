//! # Dependency resolution - computes the initialization order.
//!
//! [`resolve`] walks a service's declared dependencies depth-first and
//! returns the sequence in which `init()` must run so that every dependency
//! is fully initialized before its dependents. The resolver only computes
//! the order; executing `init()` is the orchestrator's job.
//!
//! ## Rules
//! - Ids already in `scheduled` are skipped (already ordered by an earlier
//!   root, or already initialized).
//! - Every service the resolver places into the order is also marked in
//!   `scheduled`, so repeated roots across one startup pass dedupe.
//! - Cycle detection tracks the ids on the **active DFS path** - a plain
//!   "already resolved" set cannot distinguish in-progress from done, which
//!   is exactly what catching a cycle requires. Encountering an in-progress
//!   id fails with [`RuntimeError::CyclicDependency`] naming the cycle.

use std::collections::HashSet;
use std::sync::Arc;

use crate::error::RuntimeError;
use crate::services::{ServiceId, ServiceRef};

/// Computes the initialization order for `root`, ending with `root` itself.
///
/// `scheduled` carries ids ordered by previous calls within the same startup
/// pass; they are skipped here and every newly ordered id is added to it.
///
/// Fails with [`RuntimeError::CyclicDependency`] when the declared graph
/// cycles; the error names the ids on the offending path.
pub(crate) fn resolve(
    root: &ServiceRef,
    scheduled: &mut HashSet<ServiceId>,
) -> Result<Vec<ServiceRef>, RuntimeError> {
    let mut order = Vec::new();
    let mut path = Vec::new();
    visit(root, scheduled, &mut path, &mut order)?;
    Ok(order)
}

fn visit(
    service: &ServiceRef,
    scheduled: &mut HashSet<ServiceId>,
    path: &mut Vec<ServiceId>,
    order: &mut Vec<ServiceRef>,
) -> Result<(), RuntimeError> {
    let uuid = service.uuid();
    if scheduled.contains(&uuid) {
        return Ok(());
    }
    if let Some(start) = path.iter().position(|id| *id == uuid) {
        return Err(RuntimeError::CyclicDependency {
            ids: path[start..].to_vec(),
        });
    }

    path.push(uuid);
    for dependency in service.dependencies() {
        visit(&dependency, scheduled, path, order)?;
    }
    path.pop();

    scheduled.insert(uuid);
    order.push(Arc::clone(service));
    Ok(())
}
