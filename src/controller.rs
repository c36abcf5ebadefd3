// View controller.
// Shows cached listings immediately, refreshes them from the network in the
// background, and writes the fresh result back to the cache.

use std::future::Future;
use std::sync::Arc;

use serde::{Serialize, de::DeserializeOwned};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::cache::{CacheKey, CacheStore};
use crate::event::{Event, EventSender};
use crate::fetcher::{Fetched, Fetcher};
use crate::figma::{FigmaApi, File, Node, ProjectFiles};
use crate::notify::NotificationSink;
use crate::state::CollectionUpdate;

/// Update for one of the displayed collections.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewUpdate {
    /// The team's project/file listing.
    Files(CollectionUpdate<ProjectFiles>),
    /// The page listing of one file.
    Pages {
        file_key: String,
        update: CollectionUpdate<Node>,
    },
}

/// Runs the read-through-then-refresh cycle for each mounted collection.
pub struct ViewController<A, N> {
    cache: CacheStore,
    fetcher: Arc<Fetcher<A, N>>,
    subscriber: EventSender,
}

impl<A: FigmaApi, N: NotificationSink> ViewController<A, N> {
    pub fn new(cache: CacheStore, fetcher: Arc<Fetcher<A, N>>, subscriber: EventSender) -> Self {
        Self {
            cache,
            fetcher,
            subscriber,
        }
    }

    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    /// Mount the project/file listing.
    pub fn mount_files(&self) -> JoinHandle<()> {
        let cache = self.cache.clone();
        let fetcher = Arc::clone(&self.fetcher);
        let subscriber = self.subscriber.clone();

        tokio::spawn(async move {
            revalidate(
                &cache,
                CacheKey::Files,
                &subscriber,
                ViewUpdate::Files,
                fetcher.load_files(),
            )
            .await;
        })
    }

    /// Mount the page listing of `file`. Each file key is an independent instance.
    pub fn mount_pages(&self, file: File) -> JoinHandle<()> {
        let cache = self.cache.clone();
        let fetcher = Arc::clone(&self.fetcher);
        let subscriber = self.subscriber.clone();

        tokio::spawn(async move {
            let file_key = file.key.clone();
            revalidate(
                &cache,
                CacheKey::pages(&file.key),
                &subscriber,
                |update| ViewUpdate::Pages {
                    file_key: file_key.clone(),
                    update,
                },
                fetcher.load_pages(&file),
            )
            .await;
        })
    }
}

/// Stale-while-revalidate for one collection.
///
/// Emits the cached snapshot (if any), then `Loading`, then the settled
/// result. A successful result is stored after it has been emitted, even
/// when the subscriber is already gone. Failed refreshes are never stored.
async fn revalidate<T, W, F>(
    cache: &CacheStore,
    key: CacheKey,
    subscriber: &EventSender,
    wrap: W,
    fetch: F,
) where
    T: Clone + Serialize + DeserializeOwned + Send + 'static,
    W: Fn(CollectionUpdate<T>) -> ViewUpdate,
    F: Future<Output = Fetched<Vec<T>>>,
{
    let emit = |update| subscriber.send(Event::View(wrap(update))).is_ok();

    let had_snapshot = match cache.load_async::<Vec<T>>(&key).await {
        Some(snapshot) => {
            emit(CollectionUpdate::Cached(snapshot));
            true
        }
        None => false,
    };
    emit(CollectionUpdate::Loading);

    let fetched = fetch.await;

    if fetched.degraded {
        // Keep a displayed snapshot rather than blanking it
        let update = if had_snapshot {
            CollectionUpdate::Unchanged
        } else {
            CollectionUpdate::Fresh(fetched.value)
        };
        emit(update);
        debug!(%key, "refresh failed, cache left untouched");
        return;
    }

    if !emit(CollectionUpdate::Fresh(fetched.value.clone())) {
        debug!(%key, "view unmounted before refresh settled");
    }

    if let Err(e) = cache.store_async(&key, fetched.value).await {
        warn!(%key, error = %e, "failed writing cache entry");
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tempfile::TempDir;
    use tokio::sync::mpsc;

    use super::*;
    use crate::cache::CachedData;
    use crate::fetcher::mock::*;
    use crate::figma::{Project, TeamProjects};
    use crate::notify::RecordingSink;
    use crate::state::{Collection, Phase};

    type Receiver = mpsc::UnboundedReceiver<Event>;

    fn controller(
        api: MockApi,
        cache_dir: &TempDir,
    ) -> (ViewController<MockApi, RecordingSink>, Receiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        let sink = Arc::new(RecordingSink::default());
        let fetcher = Arc::new(Fetcher::new(Arc::new(api), sink, "team-1"));
        (
            ViewController::new(CacheStore::new(cache_dir.path()), fetcher, tx),
            rx,
        )
    }

    fn one_project_team() -> Reply<TeamProjects> {
        Reply::Ok(
            TeamProjects {
                name: "Design".to_string(),
                projects: vec![Project {
                    id: "p1".to_string(),
                    name: "Web".to_string(),
                }],
            },
            ms(0),
        )
    }

    fn drain(rx: &mut Receiver) -> Vec<ViewUpdate> {
        let mut updates = Vec::new();
        while let Ok(event) = rx.try_recv() {
            if let Event::View(update) = event {
                updates.push(update);
            }
        }
        updates
    }

    fn files_updates(updates: Vec<ViewUpdate>) -> Vec<CollectionUpdate<ProjectFiles>> {
        updates
            .into_iter()
            .filter_map(|u| match u {
                ViewUpdate::Files(update) => Some(update),
                _ => None,
            })
            .collect()
    }

    #[tokio::test]
    async fn test_cached_snapshot_replaced_by_fresh_once() {
        let temp_dir = TempDir::new().unwrap();
        let stale = vec![ProjectFiles {
            name: "Old".to_string(),
            files: vec![file("z", "Archived")],
        }];
        let fresh = vec![ProjectFiles {
            name: "Web".to_string(),
            files: vec![file("a", "Home")],
        }];
        let api = MockApi::new(one_project_team())
            .with_project("p1", Reply::Ok(fresh[0].files.clone(), ms(10)));
        let (controller, mut rx) = controller(api, &temp_dir);
        controller.cache().store(&CacheKey::Files, &stale).unwrap();

        controller.mount_files().await.unwrap();

        let updates = files_updates(drain(&mut rx));
        assert_eq!(updates.len(), 3);
        assert!(matches!(&updates[0], CollectionUpdate::Cached(s) if s.data == stale));
        assert_eq!(updates[1], CollectionUpdate::Loading);
        assert_eq!(updates[2], CollectionUpdate::Fresh(fresh.clone()));

        // Displayed items change S -> S' exactly once
        let mut collection = Collection::new();
        let mut shown = vec![collection.items().to_vec()];
        for update in updates {
            collection.apply(update);
            if shown.last().map(|s| s.as_slice()) != Some(collection.items()) {
                shown.push(collection.items().to_vec());
            }
        }
        assert_eq!(shown, vec![Vec::new(), stale, fresh.clone()]);
        assert!(!collection.is_loading());

        let cached: CachedData<Vec<ProjectFiles>> =
            controller.cache().load(&CacheKey::Files).unwrap();
        assert_eq!(cached.data, fresh);
    }

    #[tokio::test]
    async fn test_cold_cache_goes_straight_to_fresh() {
        let temp_dir = TempDir::new().unwrap();
        let api = MockApi::new(one_project_team())
            .with_project("p1", Reply::Ok(vec![file("a", "Home")], ms(0)));
        let (controller, mut rx) = controller(api, &temp_dir);

        controller.mount_files().await.unwrap();

        let updates = files_updates(drain(&mut rx));
        assert_eq!(updates[0], CollectionUpdate::Loading);
        assert!(matches!(&updates[1], CollectionUpdate::Fresh(f) if f.len() == 1));
        assert!(controller.cache().load::<Vec<ProjectFiles>>(&CacheKey::Files).is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_hung_fetch_stays_loading() {
        let temp_dir = TempDir::new().unwrap();
        let (controller, mut rx) = controller(MockApi::new(Reply::Hang), &temp_dir);

        let handle = controller.mount_files();
        tokio::time::sleep(Duration::from_secs(24 * 60 * 60)).await;

        let mut collection = Collection::new();
        for update in files_updates(drain(&mut rx)) {
            collection.apply(update);
        }
        assert!(collection.items().is_empty());
        assert!(collection.is_loading());
        assert_eq!(collection.phase(), Phase::Loading);
        assert!(!handle.is_finished());
        assert!(controller.cache().load::<Vec<ProjectFiles>>(&CacheKey::Files).is_none());

        handle.abort();
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_cached_snapshot() {
        let temp_dir = TempDir::new().unwrap();
        let stale = vec![ProjectFiles::empty("Cached section")];
        let (controller, mut rx) = controller(MockApi::new(Reply::Fail(ms(0))), &temp_dir);
        controller.cache().store(&CacheKey::Files, &stale).unwrap();

        controller.mount_files().await.unwrap();

        let mut collection = Collection::new();
        let updates = files_updates(drain(&mut rx));
        assert_eq!(updates.last(), Some(&CollectionUpdate::Unchanged));
        for update in updates {
            collection.apply(update);
        }
        assert_eq!(collection.items(), stale.as_slice());
        assert!(!collection.is_loading());

        let cached: CachedData<Vec<ProjectFiles>> =
            controller.cache().load(&CacheKey::Files).unwrap();
        assert_eq!(cached.data, stale);
    }

    #[tokio::test]
    async fn test_store_completes_after_unmount() {
        let temp_dir = TempDir::new().unwrap();
        let api = MockApi::new(one_project_team())
            .with_project("p1", Reply::Ok(vec![file("a", "Home")], ms(20)));
        let (controller, rx) = controller(api, &temp_dir);

        let handle = controller.mount_files();
        drop(rx);
        handle.await.unwrap();

        let cached: CachedData<Vec<ProjectFiles>> =
            controller.cache().load(&CacheKey::Files).unwrap();
        assert_eq!(cached.data[0].files[0].key, "a");
    }

    #[tokio::test]
    async fn test_pages_of_two_files_are_independent() {
        let temp_dir = TempDir::new().unwrap();
        let api = MockApi::new(one_project_team())
            .with_document("file-a", Reply::Ok(document(&[("1:1", "A cover")]), ms(15)))
            .with_document(
                "file-b",
                Reply::Ok(document(&[("2:1", "B one"), ("2:2", "B two")]), ms(5)),
            );
        let (controller, mut rx) = controller(api, &temp_dir);

        let a = controller.mount_pages(file("file-a", "A"));
        let b = controller.mount_pages(file("file-b", "B"));
        a.await.unwrap();
        b.await.unwrap();

        let mut pages_a = Collection::new();
        let mut pages_b = Collection::new();
        for update in drain(&mut rx) {
            match update {
                ViewUpdate::Pages { file_key, update } if file_key == "file-a" => {
                    pages_a.apply(update)
                }
                ViewUpdate::Pages { file_key, update } if file_key == "file-b" => {
                    pages_b.apply(update)
                }
                other => panic!("unexpected update {:?}", other),
            }
        }

        let names = |c: &Collection<Node>| -> Vec<String> {
            c.items().iter().map(|n| n.name.clone()).collect()
        };
        assert_eq!(names(&pages_a), ["A cover"]);
        assert_eq!(names(&pages_b), ["B one", "B two"]);

        let cached_a: CachedData<Vec<Node>> =
            controller.cache().load(&CacheKey::pages("file-a")).unwrap();
        let cached_b: CachedData<Vec<Node>> =
            controller.cache().load(&CacheKey::pages("file-b")).unwrap();
        assert_eq!(cached_a.data.len(), 1);
        assert_eq!(cached_b.data.len(), 2);
    }

    #[tokio::test]
    async fn test_pages_served_from_cache_first() {
        let temp_dir = TempDir::new().unwrap();
        let cached_pages = vec![node("9:9", "Cached page", Vec::new())];
        let api = MockApi::new(one_project_team())
            .with_document("file-a", Reply::Ok(document(&[("1:1", "Fresh page")]), ms(5)));
        let (controller, mut rx) = controller(api, &temp_dir);
        controller
            .cache()
            .store(&CacheKey::pages("file-a"), &cached_pages)
            .unwrap();

        controller.mount_pages(file("file-a", "A")).await.unwrap();

        let updates = drain(&mut rx);
        assert!(matches!(
            &updates[0],
            ViewUpdate::Pages { update: CollectionUpdate::Cached(s), .. } if s.data == cached_pages
        ));
        assert!(matches!(
            updates.last(),
            Some(ViewUpdate::Pages { update: CollectionUpdate::Fresh(p), .. }) if p[0].name == "Fresh page"
        ));
    }
}
