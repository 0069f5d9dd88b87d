//! Record store over a [`KeyValueStore`].

use crate::kv::{KeyValueStore, KvError};
use crate::model::employee::{seed_employees, Employee, EmployeeId};
use log::{debug, error, info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Key holding the JSON array of employee records.
pub const EMPLOYEES_KEY: &str = "employees";
/// Key holding the stringified id of the record under edit.
pub const EDIT_ID_KEY: &str = "editId";

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence failure surfaced to the caller of a store operation.
#[derive(Debug)]
pub enum StoreError {
    Kv(KvError),
    Serde(serde_json::Error),
    /// Every id up to `EmployeeId::MAX` is already taken.
    IdsExhausted,
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Kv(err) => write!(f, "employee persistence failed: {err}"),
            Self::Serde(err) => write!(f, "employee serialization failed: {err}"),
            Self::IdsExhausted => write!(f, "no unused employee id left"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Kv(err) => Some(err),
            Self::Serde(err) => Some(err),
            Self::IdsExhausted => None,
        }
    }
}

impl From<KvError> for StoreError {
    fn from(value: KvError) -> Self {
        Self::Kv(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde(value)
    }
}

/// What an [`RecordStore::upsert`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Replaced,
}

/// Owned employee list plus its persistence hook.
pub struct RecordStore<S: KeyValueStore> {
    kv: S,
    records: Vec<Employee>,
    /// `None` once the highest representable id has been used.
    next_id: Option<EmployeeId>,
}

impl<S: KeyValueStore> RecordStore<S> {
    /// Loads the persisted roster, falling back to the seed set.
    ///
    /// The seed set is used when the entry is absent or cannot be decoded.
    /// Nothing is written back; the first mutation persists.
    ///
    /// # Errors
    /// - Returns [`StoreError::Kv`] when the substrate read itself fails.
    pub fn load(kv: S) -> StoreResult<Self> {
        let records = match kv.get(EMPLOYEES_KEY)? {
            None => {
                info!("event=store_load module=store status=ok source=seed reason=absent");
                seed_employees()
            }
            Some(raw) => match decode_records(&raw) {
                Ok(records) => {
                    info!(
                        "event=store_load module=store status=ok source=persisted count={}",
                        records.len()
                    );
                    records
                }
                Err(reason) => {
                    warn!(
                        "event=store_load module=store status=fallback source=seed reason=parse_failed error={}",
                        reason
                    );
                    seed_employees()
                }
            },
        };

        Ok(Self::with_records(kv, records))
    }

    /// Creates a store over `records` without reading persisted state.
    pub fn with_records(kv: S, records: Vec<Employee>) -> Self {
        let next_id = records
            .iter()
            .map(|employee| employee.id)
            .max()
            .map_or(Some(1), |max| max.checked_add(1));
        Self {
            kv,
            records,
            next_id,
        }
    }

    /// Read-only view of all records in storage order.
    pub fn all(&self) -> &[Employee] {
        &self.records
    }

    pub fn get(&self, id: EmployeeId) -> Option<&Employee> {
        self.records.iter().find(|employee| employee.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Hands out the next unused id.
    ///
    /// The counter only moves forward, so ids stay unique for the session
    /// even after deletes or rapid successive creates.
    ///
    /// # Errors
    /// - [`StoreError::IdsExhausted`] when a record already holds
    ///   `EmployeeId::MAX`.
    pub fn allocate_id(&mut self) -> StoreResult<EmployeeId> {
        let id = self.next_id.ok_or(StoreError::IdsExhausted)?;
        self.next_id = id.checked_add(1);
        Ok(id)
    }

    /// Replaces the record with the same id, or appends it; then persists.
    pub fn upsert(&mut self, employee: Employee) -> StoreResult<UpsertOutcome> {
        let id = employee.id;
        self.next_id = match (self.next_id, id.checked_add(1)) {
            (Some(next), Some(after)) => Some(next.max(after)),
            _ => None,
        };

        let outcome = match self.position(id) {
            Some(index) => {
                let previous = std::mem::replace(&mut self.records[index], employee);
                if let Err(err) = self.persist() {
                    self.records[index] = previous;
                    return Err(err);
                }
                UpsertOutcome::Replaced
            }
            None => {
                self.records.push(employee);
                if let Err(err) = self.persist() {
                    self.records.pop();
                    return Err(err);
                }
                UpsertOutcome::Inserted
            }
        };

        debug!(
            "event=store_upsert module=store status=ok id={} outcome={:?}",
            id, outcome
        );
        Ok(outcome)
    }

    /// Replaces an existing record only; a missing id is a no-op.
    ///
    /// Returns whether a record was replaced.
    pub fn replace(&mut self, employee: Employee) -> StoreResult<bool> {
        if self.position(employee.id).is_none() {
            warn!(
                "event=store_replace module=store status=skipped reason=not_found id={}",
                employee.id
            );
            return Ok(false);
        }
        self.upsert(employee)?;
        Ok(true)
    }

    /// Removes the record with `id` if present; a missing id is a no-op.
    ///
    /// Returns whether a record was removed.
    pub fn remove(&mut self, id: EmployeeId) -> StoreResult<bool> {
        let Some(index) = self.position(id) else {
            warn!("event=store_remove module=store status=skipped reason=not_found id={id}");
            return Ok(false);
        };

        let removed = self.records.remove(index);
        if let Err(err) = self.persist() {
            self.records.insert(index, removed);
            return Err(err);
        }

        debug!("event=store_remove module=store status=ok id={id}");
        Ok(true)
    }

    /// Serializes the full list and overwrites the persisted entry.
    pub fn persist(&self) -> StoreResult<()> {
        let payload = serde_json::to_string(&self.records)?;
        match self.kv.set(EMPLOYEES_KEY, &payload) {
            Ok(()) => {
                debug!(
                    "event=store_persist module=store status=ok count={}",
                    self.records.len()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=store_persist module=store status=error count={} error={}",
                    self.records.len(),
                    err
                );
                Err(err.into())
            }
        }
    }

    /// Records `id` as the target of the next form session.
    pub fn mark_editing(&self, id: EmployeeId) -> StoreResult<()> {
        self.kv.set(EDIT_ID_KEY, &id.to_string())?;
        Ok(())
    }

    /// Returns the id under edit, if a marker is present and parses.
    pub fn editing_id(&self) -> StoreResult<Option<EmployeeId>> {
        let Some(raw) = self.kv.get(EDIT_ID_KEY)? else {
            return Ok(None);
        };
        match raw.trim().parse::<EmployeeId>() {
            Ok(id) => Ok(Some(id)),
            Err(_) => {
                warn!("event=edit_marker module=store status=ignored reason=unparseable");
                Ok(None)
            }
        }
    }

    /// Drops the edit-session marker.
    pub fn clear_editing(&self) -> StoreResult<()> {
        self.kv.remove(EDIT_ID_KEY)?;
        Ok(())
    }

    fn position(&self, id: EmployeeId) -> Option<usize> {
        self.records.iter().position(|employee| employee.id == id)
    }
}

fn decode_records(raw: &str) -> Result<Vec<Employee>, String> {
    let decoded: Vec<Employee> =
        serde_json::from_str(raw).map_err(|err| format!("invalid employees json: {err}"))?;

    if decoded.iter().any(|employee| employee.id == 0) {
        return Err("employee id must be positive".to_string());
    }

    let mut seen = HashSet::with_capacity(decoded.len());
    let mut records = Vec::with_capacity(decoded.len());
    for employee in decoded {
        if seen.insert(employee.id) {
            records.push(employee);
        } else {
            warn!(
                "event=store_load module=store status=dropped reason=duplicate_id id={}",
                employee.id
            );
        }
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::decode_records;

    #[test]
    fn decode_rejects_zero_id() {
        let raw = r#"[{"id":0,"firstName":"A","lastName":"B","email":"a@b.com","department":"D","role":"R"}]"#;
        assert!(decode_records(raw).is_err());
    }

    #[test]
    fn decode_keeps_first_of_duplicate_ids() {
        let raw = r#"[
            {"id":7,"firstName":"First","lastName":"B","email":"a@b.com","department":"D","role":"R"},
            {"id":7,"firstName":"Second","lastName":"B","email":"a@b.com","department":"D","role":"R"}
        ]"#;
        let records = decode_records(raw).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].first_name, "First");
    }

    #[test]
    fn decode_rejects_null_payload() {
        assert!(decode_records("null").is_err());
    }
}
