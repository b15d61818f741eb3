use crate::store::error::{Result as StoreResult, StoreError};
use crate::{AccountId, NewStatus, Status, StatusId, StatusInteractions};

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;

/// In-memory status storage shared by the REST handlers.
///
/// Ids increase monotonically, so iterating the map in reverse yields the
/// newest statuses first.
#[derive(Clone)]
pub struct StatusStore {
    domain: Arc<str>,
    inner: Arc<RwLock<StoreInner>>,
}

struct StoreInner {
    statuses: BTreeMap<StatusId, Status>,
    /// Accounts that favourited each status
    favourites: HashMap<StatusId, BTreeSet<AccountId>>,
    /// Accounts that bookmarked each status
    bookmarks: HashMap<StatusId, BTreeSet<AccountId>>,
    next_id: u64,
}

impl StoreInner {
    fn marks(&mut self, mark: Mark) -> &mut HashMap<StatusId, BTreeSet<AccountId>> {
        match mark {
            Mark::Favourite => &mut self.favourites,
            Mark::Bookmark => &mut self.bookmarks,
        }
    }

    fn interactions(&self, id: StatusId, viewer: AccountId) -> StatusInteractions {
        let favourited_by = self.favourites.get(&id);
        StatusInteractions {
            favourites_count: favourited_by.map_or(0, BTreeSet::len),
            favourited: favourited_by.is_some_and(|set| set.contains(&viewer)),
            bookmarked: self
                .bookmarks
                .get(&id)
                .is_some_and(|set| set.contains(&viewer)),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Mark {
    Favourite,
    Bookmark,
}

impl StatusStore {
    pub fn new(domain: impl Into<String>) -> Self {
        let domain: String = domain.into();
        Self {
            domain: Arc::from(domain),
            inner: Arc::new(RwLock::new(StoreInner {
                statuses: BTreeMap::new(),
                favourites: HashMap::new(),
                bookmarks: HashMap::new(),
                next_id: 1,
            })),
        }
    }

    /// Store a status, assigning its id, uri and creation time
    pub fn insert(&self, new: NewStatus) -> Status {
        let mut inner = self.inner.write();

        let id = StatusId::new(inner.next_id);
        inner.next_id += 1;

        let status = Status {
            id,
            account_id: new.account_id,
            uri: Status::uri_for(&self.domain, new.account_id, id),
            text: new.text,
            spoiler_text: new.spoiler_text,
            sensitive: new.sensitive,
            language: new.language,
            visibility: new.visibility,
            created_at: Utc::now(),
        };

        inner.statuses.insert(id, status.clone());
        log::debug!("Stored status {} for account {}", id, status.account_id);

        status
    }

    pub fn get(&self, id: StatusId) -> Option<Status> {
        self.inner.read().statuses.get(&id).cloned()
    }

    /// Remove a status on behalf of `owner`.
    ///
    /// Fails with `NotFound` for unknown ids and `Forbidden` when the status
    /// belongs to another account; the store is unchanged in both cases.
    pub fn delete(&self, id: StatusId, owner: AccountId) -> StoreResult<Status> {
        let mut inner = self.inner.write();

        let status = inner
            .statuses
            .get(&id)
            .ok_or_else(|| StoreError::not_found(id))?;

        if status.account_id != owner {
            return Err(StoreError::forbidden(id, owner));
        }

        inner.favourites.remove(&id);
        inner.bookmarks.remove(&id);
        inner
            .statuses
            .remove(&id)
            .ok_or_else(|| StoreError::not_found(id))
    }

    /// Mark a status as favourited by `account_id`; repeating is a no-op
    pub fn favourite(
        &self,
        id: StatusId,
        account_id: AccountId,
    ) -> StoreResult<(Status, StatusInteractions)> {
        self.set_mark(Mark::Favourite, id, account_id, true)
    }

    pub fn unfavourite(
        &self,
        id: StatusId,
        account_id: AccountId,
    ) -> StoreResult<(Status, StatusInteractions)> {
        self.set_mark(Mark::Favourite, id, account_id, false)
    }

    /// Bookmarks are private to the account; only it sees `bookmarked`
    pub fn bookmark(
        &self,
        id: StatusId,
        account_id: AccountId,
    ) -> StoreResult<(Status, StatusInteractions)> {
        self.set_mark(Mark::Bookmark, id, account_id, true)
    }

    pub fn unbookmark(
        &self,
        id: StatusId,
        account_id: AccountId,
    ) -> StoreResult<(Status, StatusInteractions)> {
        self.set_mark(Mark::Bookmark, id, account_id, false)
    }

    /// Accounts that favourited a status, in account id order
    pub fn favourited_by(&self, id: StatusId) -> StoreResult<Vec<AccountId>> {
        let inner = self.inner.read();

        if !inner.statuses.contains_key(&id) {
            return Err(StoreError::not_found(id));
        }

        Ok(inner
            .favourites
            .get(&id)
            .map(|accounts| accounts.iter().copied().collect())
            .unwrap_or_default())
    }

    fn set_mark(
        &self,
        mark: Mark,
        id: StatusId,
        account_id: AccountId,
        on: bool,
    ) -> StoreResult<(Status, StatusInteractions)> {
        let mut inner = self.inner.write();

        let status = inner
            .statuses
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(id))?;

        let marks = inner.marks(mark);
        if on {
            marks.entry(id).or_default().insert(account_id);
        } else if let Some(accounts) = marks.get_mut(&id) {
            accounts.remove(&account_id);
            if accounts.is_empty() {
                marks.remove(&id);
            }
        }

        log::debug!(
            "{:?} {} on status {} by account {}",
            mark,
            if on { "set" } else { "cleared" },
            id,
            account_id
        );

        let interactions = inner.interactions(id, account_id);
        Ok((status, interactions))
    }

    /// Newest listed statuses across all accounts
    pub fn latest(&self, limit: usize) -> Vec<Status> {
        self.inner
            .read()
            .statuses
            .values()
            .rev()
            .filter(|status| status.visibility.is_listed())
            .take(limit)
            .cloned()
            .collect()
    }

    /// Newest statuses written by `account_id`, any visibility
    pub fn by_account(&self, account_id: AccountId, limit: usize) -> Vec<Status> {
        self.inner
            .read()
            .statuses
            .values()
            .rev()
            .filter(|status| status.account_id == account_id)
            .take(limit)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.inner.read().statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
