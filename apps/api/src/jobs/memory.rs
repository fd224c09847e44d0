//! In-process `JobStore` used by the router tests.

use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::Utc;

use crate::jobs::search::JobSearch;
use crate::jobs::store::JobStore;
use crate::models::job::{JobInput, JobRow};

#[derive(Default)]
pub struct MemoryJobStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    rows: Vec<JobRow>,
    last_id: i32,
}

impl MemoryJobStore {
    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Inner>> {
        self.inner.lock().map_err(|_| anyhow!("job store poisoned"))
    }

    /// Bumps a row's version behind the caller's back, as a concurrent edit would.
    pub fn touch(&self, id: i32) {
        if let Ok(mut inner) = self.inner.lock() {
            if let Some(row) = inner.rows.iter_mut().find(|r| r.id == id) {
                row.version += 1;
            }
        }
    }
}

#[async_trait]
impl JobStore for MemoryJobStore {
    async fn list(&self, user_id: &str, search: &JobSearch) -> Result<Vec<JobRow>> {
        let inner = self.lock()?;
        let mut rows: Vec<JobRow> = inner
            .rows
            .iter()
            .filter(|r| r.user_id == user_id && search.matches(r))
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            b.application_date
                .cmp(&a.application_date)
                .then(b.id.cmp(&a.id))
        });
        Ok(rows)
    }

    async fn find(&self, id: i32, user_id: &str) -> Result<Option<JobRow>> {
        let inner = self.lock()?;
        Ok(inner
            .rows
            .iter()
            .find(|r| r.id == id && r.user_id == user_id)
            .cloned())
    }

    async fn insert(&self, user_id: &str, input: &JobInput) -> Result<JobRow> {
        let mut inner = self.lock()?;
        inner.last_id += 1;
        let now = Utc::now();
        let row = JobRow {
            id: inner.last_id,
            user_id: user_id.to_string(),
            company: input.company.clone(),
            description: input.description.clone(),
            link: input.link.clone(),
            application_date: input.application_date,
            status: input.status.clone(),
            version: 1,
            created_at: now,
            updated_at: now,
        };
        inner.rows.push(row.clone());
        Ok(row)
    }

    async fn update(
        &self,
        id: i32,
        user_id: &str,
        expected_version: Option<i32>,
        input: &JobInput,
    ) -> Result<Option<JobRow>> {
        let mut inner = self.lock()?;
        let Some(row) = inner.rows.iter_mut().find(|r| {
            r.id == id && r.user_id == user_id && expected_version.map_or(true, |v| v == r.version)
        }) else {
            return Ok(None);
        };
        row.company = input.company.clone();
        row.description = input.description.clone();
        row.link = input.link.clone();
        row.application_date = input.application_date;
        row.status = input.status.clone();
        row.version += 1;
        row.updated_at = Utc::now();
        Ok(Some(row.clone()))
    }

    async fn exists(&self, id: i32, user_id: &str) -> Result<bool> {
        let inner = self.lock()?;
        Ok(inner
            .rows
            .iter()
            .any(|r| r.id == id && r.user_id == user_id))
    }

    async fn delete(&self, id: i32, user_id: &str) -> Result<bool> {
        let mut inner = self.lock()?;
        let before = inner.rows.len();
        inner.rows.retain(|r| !(r.id == id && r.user_id == user_id));
        Ok(inner.rows.len() < before)
    }
}
