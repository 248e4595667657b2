//! Authoritative object list with observer notification on every mutation.

use crate::store::object::SceneObject;

/// What just changed. Observers also get the full post-mutation list, so the
/// event is a hint rather than a delta protocol.
#[derive(Clone, Debug)]
pub enum StoreEvent {
    Added(SceneObject),
    Removed(String),
    TransformChanged(SceneObject),
    MetadataChanged(SceneObject),
    Replaced,
    Cleared,
}

/// Subscriber interface: notified synchronously after each successful
/// mutation. No-op mutations (unknown id) do not notify.
pub trait StoreObserver: Send + Sync {
    fn on_change(&mut self, event: &StoreEvent, objects: &[SceneObject]);
}

/// Sole owner of the placed-object list. Insertion order is preserved and
/// ids are not deduplicated; callers generate unique ids.
#[derive(Default)]
pub struct ObjectStore {
    objects: Vec<SceneObject>,
    observers: Vec<Box<dyn StoreObserver>>,
    revision: u64,
}

impl ObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_objects(objects: Vec<SceneObject>) -> Self {
        Self {
            objects,
            observers: Vec::new(),
            revision: 0,
        }
    }

    pub fn subscribe(&mut self, observer: Box<dyn StoreObserver>) {
        self.observers.push(observer);
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn get(&self, id: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Bumped on every successful mutation; polling consumers compare this
    /// against the last revision they rendered.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn add(&mut self, object: SceneObject) {
        let event = StoreEvent::Added(object.clone());
        self.objects.push(object);
        self.notify(event);
    }

    /// Removes by id; no-op (no event, no revision bump) if absent.
    pub fn remove(&mut self, id: &str) {
        let before = self.objects.len();
        self.objects.retain(|o| o.id != id);
        if self.objects.len() != before {
            self.notify(StoreEvent::Removed(id.to_string()));
        }
    }

    /// Replaces only position/rotation/scale; every other field is left
    /// untouched. No-op if the id is unknown. Values are accepted as-is.
    pub fn update_transform(
        &mut self,
        id: &str,
        position: [f32; 3],
        rotation: [f32; 3],
        scale: [f32; 3],
    ) {
        let Some(obj) = self.objects.iter_mut().find(|o| o.id == id) else {
            return;
        };
        obj.position = position;
        obj.rotation = rotation;
        obj.scale = scale;
        let event = StoreEvent::TransformChanged(obj.clone());
        self.notify(event);
    }

    /// Sets one metadata key; no-op if the id is unknown.
    pub fn set_metadata(&mut self, id: &str, key: &str, value: &str) {
        let Some(obj) = self.objects.iter_mut().find(|o| o.id == id) else {
            return;
        };
        obj.metadata.insert(key.to_string(), value.to_string());
        let event = StoreEvent::MetadataChanged(obj.clone());
        self.notify(event);
    }

    /// Clears then re-populates; used when loading a plot template.
    pub fn replace_all(&mut self, objects: Vec<SceneObject>) {
        self.objects = objects;
        self.notify(StoreEvent::Replaced);
    }

    pub fn clear(&mut self) {
        self.objects.clear();
        self.notify(StoreEvent::Cleared);
    }

    fn notify(&mut self, event: StoreEvent) {
        self.revision += 1;
        let Self {
            objects, observers, ..
        } = self;
        for observer in observers.iter_mut() {
            observer.on_change(&event, objects);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::object::PrimitiveKind;
    use std::sync::{Arc, Mutex};

    fn obj(id: &str) -> SceneObject {
        SceneObject::primitive(id, PrimitiveKind::Box)
    }

    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<String>>>);

    impl StoreObserver for Recorder {
        fn on_change(&mut self, event: &StoreEvent, objects: &[SceneObject]) {
            let label = match event {
                StoreEvent::Added(o) => format!("added:{}", o.id),
                StoreEvent::Removed(id) => format!("removed:{id}"),
                StoreEvent::TransformChanged(o) => format!("moved:{}", o.id),
                StoreEvent::MetadataChanged(o) => format!("tagged:{}", o.id),
                StoreEvent::Replaced => format!("replaced:{}", objects.len()),
                StoreEvent::Cleared => "cleared".to_string(),
            };
            self.0.lock().unwrap().push(label);
        }
    }

    #[test]
    fn add_preserves_insertion_order_and_fields() {
        let mut store = ObjectStore::new();
        for i in 0..5 {
            store.add(obj(&format!("box-{i}")).colored("#112233"));
        }

        assert_eq!(store.len(), 5);
        let ids: Vec<&str> = store.objects().iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, ["box-0", "box-1", "box-2", "box-3", "box-4"]);
        assert!(store
            .objects()
            .iter()
            .all(|o| o.color.as_deref() == Some("#112233")));
    }

    #[test]
    fn remove_unknown_id_is_a_noop() {
        let mut store = ObjectStore::new();
        store.add(obj("box-1"));
        let revision = store.revision();

        store.remove("ghost");

        assert_eq!(store.len(), 1);
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn update_transform_replaces_only_transform_fields() {
        let mut store = ObjectStore::new();
        store.add(
            obj("box-1")
                .colored("#8B5CF6")
                .with_metadata("nft:item", "7"),
        );

        store.update_transform("box-1", [1.0, 2.0, 3.0], [0.0, 0.5, 0.0], [2.0, 2.0, 2.0]);

        let o = store.get("box-1").unwrap();
        assert_eq!(o.position, [1.0, 2.0, 3.0]);
        assert_eq!(o.rotation, [0.0, 0.5, 0.0]);
        assert_eq!(o.scale, [2.0, 2.0, 2.0]);
        assert_eq!(o.primitive_kind(), Some(PrimitiveKind::Box));
        assert_eq!(o.color.as_deref(), Some("#8B5CF6"));
        assert_eq!(o.metadata.get("nft:item").map(String::as_str), Some("7"));
    }

    #[test]
    fn update_transform_unknown_id_is_a_noop() {
        let mut store = ObjectStore::new();
        store.add(obj("box-1"));
        let revision = store.revision();

        store.update_transform("ghost", [9.0; 3], [9.0; 3], [9.0; 3]);

        assert_eq!(store.revision(), revision);
        assert_eq!(store.get("box-1").unwrap().position, [0.0; 3]);
    }

    #[test]
    fn replace_all_swaps_the_whole_list() {
        let mut store = ObjectStore::new();
        store.add(obj("old-1"));
        store.add(obj("old-2"));

        store.replace_all(vec![obj("new-1")]);

        assert_eq!(store.len(), 1);
        assert_eq!(store.objects()[0].id, "new-1");
    }

    #[test]
    fn observers_see_one_event_per_mutation_and_none_for_noops() {
        let recorder = Recorder::default();
        let log = recorder.0.clone();
        let mut store = ObjectStore::new();
        store.subscribe(Box::new(recorder));

        store.add(obj("a"));
        store.remove("ghost"); // no event
        store.update_transform("ghost", [0.0; 3], [0.0; 3], [1.0; 3]); // no event
        store.update_transform("a", [1.0; 3], [0.0; 3], [1.0; 3]);
        store.set_metadata("a", "nft:tx", "0xabc");
        store.remove("a");
        store.replace_all(vec![obj("b"), obj("c")]);
        store.clear();

        let log = log.lock().unwrap();
        assert_eq!(
            *log,
            vec![
                "added:a",
                "moved:a",
                "tagged:a",
                "removed:a",
                "replaced:2",
                "cleared",
            ]
        );
    }

    #[test]
    fn revision_increases_monotonically_with_mutations() {
        let mut store = ObjectStore::new();
        assert_eq!(store.revision(), 0);
        store.add(obj("a"));
        store.add(obj("b"));
        store.clear();
        assert_eq!(store.revision(), 3);
    }
}
