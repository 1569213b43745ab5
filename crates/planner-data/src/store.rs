//! JSON file holding every saved media plan.
//!
//! The file contains one array of plans in the browser application's
//! `mediaPlans` format. It is a convenience copy, not a system of record:
//! a missing or unreadable file falls back to the sample plans.

use std::path::{Path, PathBuf};

use planner_core::error::{PlannerError, Result};
use planner_core::models::MediaPlan;
use tracing::{debug, info, warn};

use crate::seed::sample_plans;

/// Read the plan array at `path`.
pub fn load_plans(path: &Path) -> Result<Vec<MediaPlan>> {
    let content = std::fs::read_to_string(path).map_err(|source| PlannerError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&content)?)
}

/// Atomically write `plans` to `path`, creating parent directories.
pub fn write_plans(path: &Path, plans: &[MediaPlan]) -> Result<()> {
    let write_err = |source| PlannerError::FileWrite {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    let json = serde_json::to_string_pretty(plans)?;

    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json).map_err(write_err)?;
    std::fs::rename(&tmp, path).map_err(write_err)?;
    Ok(())
}

// ── PlanStore ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct PlanStore {
    path: PathBuf,
    plans: Vec<MediaPlan>,
}

impl PlanStore {
    /// Open the store at `path`.
    ///
    /// A missing file is created with the sample plans. A file that cannot
    /// be read or parsed is left in place and the sample plans are used in
    /// memory; the next save overwrites it.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let plans = if path.exists() {
            match load_plans(&path) {
                Ok(plans) => {
                    debug!("Loaded {} plans from {}", plans.len(), path.display());
                    plans
                }
                Err(e) => {
                    warn!("Falling back to sample plans: {}", e);
                    Self::samples()
                }
            }
        } else {
            let plans = Self::samples();
            match write_plans(&path, &plans) {
                Ok(()) => info!("Seeded plan store at {}", path.display()),
                Err(e) => warn!("Could not seed plan store: {}", e),
            }
            plans
        };
        Self { path, plans }
    }

    fn samples() -> Vec<MediaPlan> {
        sample_plans().unwrap_or_else(|e| {
            warn!("Sample plans unavailable: {}", e);
            Vec::new()
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn plans(&self) -> &[MediaPlan] {
        &self.plans
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&MediaPlan> {
        self.plans.iter().find(|p| p.id == id)
    }

    /// Like [`PlanStore::get`] but a missing plan is an error.
    pub fn require(&self, id: &str) -> Result<&MediaPlan> {
        self.get(id)
            .ok_or_else(|| PlannerError::PlanNotFound(id.to_string()))
    }

    /// Write the current plans to disk.
    pub fn save(&self) -> Result<()> {
        write_plans(&self.path, &self.plans)
    }

    /// Replace the plan with the same id, or append it, then save.
    pub fn upsert(&mut self, plan: MediaPlan) -> Result<()> {
        match self.plans.iter_mut().find(|p| p.id == plan.id) {
            Some(existing) => {
                debug!("Updating plan {}", plan.id);
                *existing = plan;
            }
            None => {
                debug!("Adding plan {}", plan.id);
                self.plans.push(plan);
            }
        }
        self.save()
    }

    /// Remove the plan with `id`, save, and return it.
    pub fn delete(&mut self, id: &str) -> Result<MediaPlan> {
        let pos = self
            .plans
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| PlannerError::PlanNotFound(id.to_string()))?;
        let removed = self.plans.remove(pos);
        self.save()?;
        info!("Deleted plan {} ({})", removed.id, removed.client_name);
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planner_core::models::PlanStatus;
    use tempfile::TempDir;

    fn store_path(tmp: &TempDir) -> PathBuf {
        tmp.path().join("nested").join("plans.json")
    }

    #[test]
    fn test_open_missing_file_seeds_samples() {
        let tmp = TempDir::new().unwrap();
        let path = store_path(&tmp);
        let store = PlanStore::open(&path);
        assert_eq!(store.len(), 6);
        assert!(path.exists());
        assert_eq!(load_plans(&path).unwrap().len(), 6);
    }

    #[test]
    fn test_open_corrupt_file_falls_back() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("plans.json");
        std::fs::write(&path, "not json").unwrap();
        let store = PlanStore::open(&path);
        assert_eq!(store.len(), 6);
        // File is left untouched until the next save.
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "not json");
    }

    #[test]
    fn test_open_existing_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("plans.json");
        let mut plan = MediaPlan::new_draft();
        plan.client_name = "Bosch".to_string();
        write_plans(&path, &[plan]).unwrap();
        let store = PlanStore::open(&path);
        assert_eq!(store.len(), 1);
        assert_eq!(store.plans()[0].client_name, "Bosch");
    }

    #[test]
    fn test_upsert_replaces_or_appends() {
        let tmp = TempDir::new().unwrap();
        let mut store = PlanStore::open(store_path(&tmp));

        let mut updated = store.require("4").unwrap().clone();
        updated.status = PlanStatus::PendingApproval;
        store.upsert(updated).unwrap();
        assert_eq!(store.len(), 6);
        assert_eq!(store.get("4").unwrap().status, PlanStatus::PendingApproval);

        let mut fresh = MediaPlan::new_draft();
        fresh.client_name = "Bosch".to_string();
        let id = fresh.id.clone();
        store.upsert(fresh).unwrap();
        assert_eq!(store.len(), 7);

        let reopened = PlanStore::open(store.path());
        assert_eq!(reopened.get(&id).unwrap().client_name, "Bosch");
        assert_eq!(reopened.get("4").unwrap().status, PlanStatus::PendingApproval);
    }

    #[test]
    fn test_delete() {
        let tmp = TempDir::new().unwrap();
        let mut store = PlanStore::open(store_path(&tmp));
        let removed = store.delete("6").unwrap();
        assert_eq!(removed.client_name, "Siemens");
        assert_eq!(store.len(), 5);
        assert!(matches!(
            store.delete("6"),
            Err(PlannerError::PlanNotFound(_))
        ));
        assert_eq!(PlanStore::open(store.path()).len(), 5);
    }

    #[test]
    fn test_require_missing() {
        let tmp = TempDir::new().unwrap();
        let store = PlanStore::open(store_path(&tmp));
        let err = store.require("nope").unwrap_err();
        assert_eq!(err.to_string(), "Media plan not found: nope");
    }

    #[test]
    fn test_write_plans_leaves_no_tmp_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("plans.json");
        write_plans(&path, &[]).unwrap();
        assert!(!path.with_extension("json.tmp").exists());
        assert_eq!(load_plans(&path).unwrap().len(), 0);
    }
}
