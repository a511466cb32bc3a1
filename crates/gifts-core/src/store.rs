use crate::error::Result;
use crate::paths;
use crate::plan::DevelopmentPlan;
use crate::result::QuizResult;
use chrono::Utc;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Store traits
// ---------------------------------------------------------------------------

/// Append-only persistence of scored results. History is kept; "latest by
/// email" is the operative record for plan seeding.
pub trait ResultStore {
    /// Persist a result and return the store-assigned id.
    fn append(&self, result: &QuizResult) -> Result<String>;

    /// Most recent result for the email, creation time descending, limit 1.
    /// No prior result is a defined empty outcome, not an error.
    fn find_latest_by_email(&self, email: &str) -> Result<Option<QuizResult>>;
}

/// Keyed persistence of one mutable plan document per identity.
pub trait PlanStore {
    fn get(&self, key: &str) -> Result<Option<DevelopmentPlan>>;

    /// Partial-field upsert: keys absent from the incoming document leave the
    /// stored document untouched. The store assigns `last_updated`.
    fn upsert(&self, key: &str, plan: &DevelopmentPlan) -> Result<()>;
}

// ---------------------------------------------------------------------------
// FsResultStore
// ---------------------------------------------------------------------------

/// Results as YAML documents under `<root>/.gifts/results/<uuid>.yaml`.
pub struct FsResultStore {
    root: PathBuf,
}

impl FsResultStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ResultStore for FsResultStore {
    fn append(&self, result: &QuizResult) -> Result<String> {
        let id = uuid::Uuid::new_v4().to_string();
        let mut stored = result.clone();
        stored.id = Some(id.clone());
        // The persistence error slot is session-local, never durable.
        stored.save_error = None;

        let data = serde_yaml::to_string(&stored)?;
        crate::io::atomic_write(&paths::result_path(&self.root, &id), data.as_bytes())?;
        Ok(id)
    }

    fn find_latest_by_email(&self, email: &str) -> Result<Option<QuizResult>> {
        let dir = paths::results_dir(&self.root);
        if !dir.exists() {
            return Ok(None);
        }

        let mut latest: Option<QuizResult> = None;
        for entry in std::fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().map(|e| e != "yaml").unwrap_or(true) {
                continue;
            }
            let data = std::fs::read_to_string(&path)?;
            let result: QuizResult = match serde_yaml::from_str(&data) {
                Ok(r) => r,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping unreadable result document");
                    continue;
                }
            };
            if result.email != email {
                continue;
            }
            if latest
                .as_ref()
                .map(|l| result.created_at > l.created_at)
                .unwrap_or(true)
            {
                latest = Some(result);
            }
        }
        Ok(latest)
    }
}

// ---------------------------------------------------------------------------
// FsPlanStore
// ---------------------------------------------------------------------------

/// Plans as YAML documents under `<root>/.gifts/plans/<key>.yaml`, where the
/// key is the sanitized email.
pub struct FsPlanStore {
    root: PathBuf,
}

impl FsPlanStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn read_mapping(path: &Path) -> Result<serde_yaml::Mapping> {
        if !path.exists() {
            return Ok(serde_yaml::Mapping::new());
        }
        let data = std::fs::read_to_string(path)?;
        let value: serde_yaml::Value = serde_yaml::from_str(&data)?;
        Ok(value.as_mapping().cloned().unwrap_or_default())
    }
}

impl PlanStore for FsPlanStore {
    fn get(&self, key: &str) -> Result<Option<DevelopmentPlan>> {
        let path = paths::plan_path(&self.root, key);
        if !path.exists() {
            return Ok(None);
        }
        let data = std::fs::read_to_string(&path)?;
        let plan: DevelopmentPlan = serde_yaml::from_str(&data)?;
        Ok(Some(plan))
    }

    fn upsert(&self, key: &str, plan: &DevelopmentPlan) -> Result<()> {
        let path = paths::plan_path(&self.root, key);

        // Merge, not replace: overlay incoming keys onto the stored mapping
        // so fields this schema does not know about survive.
        let mut merged = Self::read_mapping(&path)?;
        let incoming = serde_yaml::to_value(plan)?;
        if let serde_yaml::Value::Mapping(map) = incoming {
            for (k, v) in map {
                merged.insert(k, v);
            }
        }
        merged.insert(
            serde_yaml::Value::from("last_updated"),
            serde_yaml::to_value(Utc::now())?,
        );

        let data = serde_yaml::to_string(&serde_yaml::Value::Mapping(merged))?;
        crate::io::atomic_write(&path, data.as_bytes())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Gift;
    use crate::score::GiftScore;
    use tempfile::TempDir;

    fn result_for(email: &str, score: u32) -> QuizResult {
        let gift = Gift {
            id: "A".into(),
            name: "Leadership".into(),
            description: String::new(),
            questions: vec![1],
        };
        QuizResult::new(
            "Ana",
            email,
            vec![GiftScore {
                gift: gift.clone(),
                score,
            }],
            vec![GiftScore { gift, score }],
        )
    }

    #[test]
    fn append_assigns_id_and_persists() {
        let dir = TempDir::new().unwrap();
        let store = FsResultStore::new(dir.path());

        let id = store.append(&result_for("ana@example.com", 12)).unwrap();
        assert!(!id.is_empty());

        let found = store.find_latest_by_email("ana@example.com").unwrap();
        let found = found.unwrap();
        assert_eq!(found.id.as_deref(), Some(id.as_str()));
        assert_eq!(found.top_gifts[0].score, 12);
    }

    #[test]
    fn find_latest_none_for_unknown_email() {
        let dir = TempDir::new().unwrap();
        let store = FsResultStore::new(dir.path());
        assert!(store
            .find_latest_by_email("nobody@x.com")
            .unwrap()
            .is_none());

        store.append(&result_for("ana@example.com", 5)).unwrap();
        assert!(store
            .find_latest_by_email("nobody@x.com")
            .unwrap()
            .is_none());
    }

    #[test]
    fn find_latest_picks_most_recent() {
        let dir = TempDir::new().unwrap();
        let store = FsResultStore::new(dir.path());

        let mut old = result_for("ana@example.com", 1);
        old.created_at = Utc::now() - chrono::Duration::hours(2);
        store.append(&old).unwrap();
        store.append(&result_for("ana@example.com", 9)).unwrap();

        let latest = store
            .find_latest_by_email("ana@example.com")
            .unwrap()
            .unwrap();
        assert_eq!(latest.top_gifts[0].score, 9);
    }

    #[test]
    fn append_never_persists_save_error() {
        let dir = TempDir::new().unwrap();
        let store = FsResultStore::new(dir.path());

        let mut result = result_for("ana@example.com", 3);
        result.save_error = Some("earlier outage".into());
        store.append(&result).unwrap();

        let latest = store
            .find_latest_by_email("ana@example.com")
            .unwrap()
            .unwrap();
        assert!(latest.save_error.is_none());
    }

    #[test]
    fn plan_get_missing_is_none() {
        let dir = TempDir::new().unwrap();
        let store = FsPlanStore::new(dir.path());
        assert!(store.get("ana@example.com").unwrap().is_none());
    }

    #[test]
    fn plan_upsert_roundtrip_sets_last_updated() {
        let dir = TempDir::new().unwrap();
        let store = FsPlanStore::new(dir.path());

        let mut plan = DevelopmentPlan::default();
        plan.primary_gifts = "Leadership, Mercy".into();
        store.upsert("ana@example.com", &plan).unwrap();

        let loaded = store.get("ana@example.com").unwrap().unwrap();
        assert_eq!(loaded.primary_gifts, "Leadership, Mercy");
        assert!(loaded.last_updated.is_some());
    }

    #[test]
    fn plan_upsert_preserves_unknown_fields() {
        let dir = TempDir::new().unwrap();
        let store = FsPlanStore::new(dir.path());

        // A document written by a newer schema with a field we don't know.
        let path = paths::plan_path(dir.path(), "ana@example.com");
        crate::io::atomic_write(
            &path,
            b"primary_gifts: Teaching\nfuture_field: keep me\n",
        )
        .unwrap();

        let mut plan = store.get("ana@example.com").unwrap().unwrap();
        plan.secondary_gifts = "Service".into();
        store.upsert("ana@example.com", &plan).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("future_field: keep me"));
        assert!(raw.contains("secondary_gifts: Service"));
    }

    #[test]
    fn plan_upsert_overwrites_known_fields() {
        let dir = TempDir::new().unwrap();
        let store = FsPlanStore::new(dir.path());

        let mut plan = DevelopmentPlan::default();
        plan.base_of_operations = "At home".into();
        store.upsert("k", &plan).unwrap();

        plan.base_of_operations = "Community hall".into();
        store.upsert("k", &plan).unwrap();

        let loaded = store.get("k").unwrap().unwrap();
        assert_eq!(loaded.base_of_operations, "Community hall");
    }
}
