use crate::collection::{Document, DocumentId, FindOptions, WriteResult};
use crate::common::{LockRegistry, SortOrder, Value, DOC_ID};
use crate::criteria::Criteria;
use crate::errors::CloverResult;
use crate::store::{DocumentStore, Snapshot};
use std::fmt::Debug;
use std::sync::Arc;

/// Arbitrary caller supplied filter, see [Query::matches].
pub type QueryPredicate = Arc<dyn Fn(&Document) -> bool + Send + Sync>;

/// A frozen description of a read or bulk write against one collection.
///
/// Builder methods (`filter`, `matches`, `skip`, `limit`, `sort`) return a
/// new query and never change the receiver. Terminal methods (`count`,
/// `find_all`, `delete`, `update`, ...) each take one fresh [Snapshot] of
/// the collection and evaluate against it, so two calls on the same query
/// may see different data if the collection changed in between, while a
/// single call always sees one consistent view.
///
/// Mutating terminals hold the collection's write lock from snapshot to
/// commit, so concurrent deletes and updates on one collection serialize.
///
/// # Examples
///
/// ```rust
/// use clover::Clover;
/// use clover::criteria::row;
/// use clover::doc;
///
/// let db = Clover::builder().open().unwrap();
/// db.create_collection("todos").unwrap();
/// db.insert("todos", vec![
///     doc!{ title: "a", completed: true, userId: 1 },
///     doc!{ title: "b", completed: false, userId: 2 },
/// ]).unwrap();
///
/// let done = db.query("todos").filter(row("completed").eq(true));
/// assert_eq!(done.count().unwrap(), 1);
///
/// done.delete().unwrap();
/// assert_eq!(db.query("todos").count().unwrap(), 1);
/// ```
#[derive(Clone)]
pub struct Query {
    collection_name: String,
    store: DocumentStore,
    lock_registry: LockRegistry,
    criteria: Option<Criteria>,
    predicates: Vec<QueryPredicate>,
    find_options: FindOptions,
}

impl Query {
    pub(crate) fn new(collection_name: &str, store: DocumentStore, lock_registry: LockRegistry) -> Self {
        Query {
            collection_name: collection_name.to_string(),
            store,
            lock_registry,
            criteria: None,
            predicates: Vec::new(),
            find_options: FindOptions::new(),
        }
    }

    pub fn collection_name(&self) -> &str {
        &self.collection_name
    }

    /// Criteria accumulated by [Query::filter], if any.
    pub fn criteria(&self) -> Option<&Criteria> {
        self.criteria.as_ref()
    }

    pub fn find_options(&self) -> &FindOptions {
        &self.find_options
    }

    /// Restricts the query to documents matching `criteria`, in addition to
    /// any criteria already set.
    pub fn filter(&self, criteria: Criteria) -> Query {
        let mut query = self.clone();
        query.criteria = Some(match &self.criteria {
            Some(existing) => existing.and(criteria),
            None => criteria,
        });
        query
    }

    /// Restricts the query to documents for which `predicate` returns true,
    /// in addition to any criteria and predicates already set.
    pub fn matches<F>(&self, predicate: F) -> Query
    where
        F: Fn(&Document) -> bool + Send + Sync + 'static,
    {
        let mut query = self.clone();
        query.predicates.push(Arc::new(predicate));
        query
    }

    /// Skips the first `skip` results, after sorting.
    pub fn skip(&self, skip: usize) -> Query {
        let mut query = self.clone();
        query.find_options = query.find_options.skip(skip);
        query
    }

    /// Returns at most `limit` results, after sorting and skipping.
    pub fn limit(&self, limit: usize) -> Query {
        let mut query = self.clone();
        query.find_options = query.find_options.limit(limit);
        query
    }

    /// Adds a sort key. Keys added earlier take precedence.
    pub fn sort(&self, path: &str, sort_order: SortOrder) -> Query {
        let mut query = self.clone();
        query.find_options = query.find_options.then_by(path, sort_order);
        query
    }

    /// Replaces sort, skip and limit with `find_options`.
    pub fn with_options(&self, find_options: FindOptions) -> Query {
        let mut query = self.clone();
        query.find_options = find_options;
        query
    }

    /// Number of documents [Query::find_all] would return.
    pub fn count(&self) -> CloverResult<usize> {
        let snapshot = self.snapshot()?;
        let matched = snapshot.documents().filter(|doc| self.accepts(doc)).count();
        let count = self.find_options.window_len(matched);
        log::debug!(
            "Counted {} documents in {} at version {} with {}",
            count,
            self.collection_name,
            snapshot.version(),
            self.describe()
        );
        Ok(count)
    }

    /// Every matching document, in collection order unless sorted.
    pub fn find_all(&self) -> CloverResult<Vec<Document>> {
        let snapshot = self.snapshot()?;
        let documents = self.select(&snapshot);
        log::debug!(
            "Found {} of {} documents in {} at version {} with {}",
            documents.len(),
            snapshot.len(),
            self.collection_name,
            snapshot.version(),
            self.describe()
        );
        Ok(documents)
    }

    pub fn find_first(&self) -> CloverResult<Option<Document>> {
        Ok(self.find_all()?.into_iter().next())
    }

    pub fn exists(&self) -> CloverResult<bool> {
        Ok(self.count()? > 0)
    }

    /// Deletes every matching document as one batch.
    ///
    /// Documents added after the snapshot was taken are never touched.
    pub fn delete(&self) -> CloverResult<WriteResult> {
        let lock = self.lock_registry.get_lock(&self.collection_name);
        let _guard = lock.write();

        let snapshot = self.snapshot()?;
        let ids: Vec<DocumentId> = self
            .select(&snapshot)
            .iter()
            .filter_map(|doc| doc.id())
            .collect();

        if !ids.is_empty() {
            self.store.delete_documents(&self.collection_name, &ids)?;
        }
        log::debug!(
            "Deleted {} documents from {} at version {} with {}",
            ids.len(),
            self.collection_name,
            snapshot.version(),
            self.describe()
        );
        Ok(WriteResult::new(ids))
    }

    /// Sets every leaf field of `changes` on each matching document.
    ///
    /// Nested fields are applied by path, so `{a: {b: 1}}` sets `a.b` and
    /// leaves the rest of `a` untouched. `_id` is ignored.
    pub fn update(&self, changes: &Document) -> CloverResult<WriteResult> {
        let fields = changes.fields();
        let changes = changes.clone();
        self.update_with(move |doc| {
            for field in &fields {
                if let Some(value) = changes.get(field) {
                    doc.set(field, value.clone());
                }
            }
        })
    }

    /// Applies `update` to each matching document and stores the results as
    /// one batch. Changes to `_id` are discarded.
    pub fn update_with<F>(&self, update: F) -> CloverResult<WriteResult>
    where
        F: Fn(&mut Document),
    {
        let lock = self.lock_registry.get_lock(&self.collection_name);
        let _guard = lock.write();

        let snapshot = self.snapshot()?;
        let mut ids = Vec::new();
        let mut updated = Vec::new();
        for document in self.select(&snapshot) {
            let Some(id) = document.id() else {
                continue;
            };

            let mut next = document.clone();
            update(&mut next);
            if next.get(DOC_ID) != document.get(DOC_ID) {
                log::warn!("Ignoring change to {} of document {} in {}", DOC_ID, id, self.collection_name);
                next.set(DOC_ID, Value::String(id.to_string()));
            }

            ids.push(id);
            updated.push(next);
        }

        if !updated.is_empty() {
            self.store.replace_documents(&self.collection_name, updated)?;
        }
        log::debug!(
            "Updated {} documents in {} at version {} with {}",
            ids.len(),
            self.collection_name,
            snapshot.version(),
            self.describe()
        );
        Ok(WriteResult::new(ids))
    }

    fn snapshot(&self) -> CloverResult<Snapshot> {
        self.store.snapshot(&self.collection_name)
    }

    fn accepts(&self, document: &Document) -> bool {
        let criteria_match = self
            .criteria
            .as_ref()
            .map(|criteria| criteria.matches(document))
            .unwrap_or(true);
        criteria_match && self.predicates.iter().all(|predicate| predicate(document))
    }

    fn select(&self, snapshot: &Snapshot) -> Vec<Document> {
        let matched: Vec<Document> = snapshot
            .documents()
            .filter(|doc| self.accepts(doc))
            .cloned()
            .collect();
        self.find_options.apply(matched)
    }

    fn describe(&self) -> String {
        let criteria = match &self.criteria {
            Some(criteria) => criteria.to_string(),
            None => "no criteria".to_string(),
        };
        if self.predicates.is_empty() {
            criteria
        } else {
            format!("{} and {} predicate(s)", criteria, self.predicates.len())
        }
    }
}

impl Debug for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Query")
            .field("collection_name", &self.collection_name)
            .field("criteria", &self.criteria)
            .field("predicates", &self.predicates.len())
            .field("find_options", &self.find_options)
            .finish()
    }
}
