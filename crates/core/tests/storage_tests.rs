// ═══════════════════════════════════════════════════════════════════
// Storage Tests — MemoryLayoutStore, FileLayoutStore
// ═══════════════════════════════════════════════════════════════════

use portfolio_dashboard_core::models::layout::{default_layout, ColumnPref};
use portfolio_dashboard_core::storage::layout_store::{
    LayoutStore, MemoryLayoutStore, COLUMN_LAYOUT_KEY,
};

#[cfg(not(target_arch = "wasm32"))]
use portfolio_dashboard_core::storage::layout_store::FileLayoutStore;

// ═══════════════════════════════════════════════════════════════════
// MemoryLayoutStore
// ═══════════════════════════════════════════════════════════════════

mod memory_store {
    use super::*;

    #[test]
    fn missing_key_is_none() {
        let store = MemoryLayoutStore::new();
        assert_eq!(store.get("never.written").unwrap(), None);
    }

    #[test]
    fn put_then_get() {
        let store = MemoryLayoutStore::new();
        store.put("a.key", "payload").unwrap();
        assert_eq!(store.get("a.key").unwrap().as_deref(), Some("payload"));
    }

    #[test]
    fn put_overwrites() {
        let store = MemoryLayoutStore::new();
        store.put("a.key", "first").unwrap();
        store.put("a.key", "second").unwrap();
        assert_eq!(store.get("a.key").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn remove_deletes_the_key() {
        let store = MemoryLayoutStore::new();
        store.put("a.key", "payload").unwrap();
        store.remove("a.key").unwrap();
        assert_eq!(store.get("a.key").unwrap(), None);
    }

    #[test]
    fn remove_of_missing_key_is_ok() {
        let store = MemoryLayoutStore::new();
        assert!(store.remove("never.written").is_ok());
    }

    #[test]
    fn keys_are_independent() {
        let store = MemoryLayoutStore::new();
        store.put("one", "1").unwrap();
        store.put("two", "2").unwrap();
        store.remove("one").unwrap();
        assert_eq!(store.get("two").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn empty_value_is_stored() {
        let store = MemoryLayoutStore::new();
        store.put("a.key", "").unwrap();
        assert_eq!(store.get("a.key").unwrap().as_deref(), Some(""));
    }
}

// ═══════════════════════════════════════════════════════════════════
// FileLayoutStore
// ═══════════════════════════════════════════════════════════════════

#[cfg(not(target_arch = "wasm32"))]
mod file_store {
    use super::*;

    #[test]
    fn missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileLayoutStore::new(dir.path());
        assert_eq!(store.get("never.written").unwrap(), None);
    }

    #[test]
    fn put_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileLayoutStore::new(dir.path());
        store.put("a.key", "payload").unwrap();
        assert_eq!(store.get("a.key").unwrap().as_deref(), Some("payload"));
    }

    #[test]
    fn put_creates_the_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("prefs").join("dashboard");
        let store = FileLayoutStore::new(&nested);
        store.put("a.key", "payload").unwrap();
        assert!(nested.join("a.key.json").exists());
    }

    #[test]
    fn put_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileLayoutStore::new(dir.path());
        store.put("a.key", "first").unwrap();
        store.put("a.key", "second").unwrap();
        assert_eq!(store.get("a.key").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn remove_deletes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileLayoutStore::new(dir.path());
        store.put("a.key", "payload").unwrap();
        store.remove("a.key").unwrap();
        assert_eq!(store.get("a.key").unwrap(), None);
        assert!(!dir.path().join("a.key.json").exists());
    }

    #[test]
    fn remove_of_missing_key_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileLayoutStore::new(dir.path());
        assert!(store.remove("never.written").is_ok());
    }

    #[test]
    fn values_survive_across_store_instances() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = FileLayoutStore::new(dir.path());
            store.put(COLUMN_LAYOUT_KEY, r#"[{"field":"sector"}]"#).unwrap();
        }
        let reopened = FileLayoutStore::new(dir.path());
        assert_eq!(
            reopened.get(COLUMN_LAYOUT_KEY).unwrap().as_deref(),
            Some(r#"[{"field":"sector"}]"#)
        );
    }

    #[test]
    fn column_layout_round_trips_as_json() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileLayoutStore::new(dir.path());

        let mut layout = default_layout();
        layout[0].width = Some(180);
        layout[3].visible = false;

        let json = serde_json::to_string(&layout).unwrap();
        store.put(COLUMN_LAYOUT_KEY, &json).unwrap();

        let loaded: Vec<ColumnPref> =
            serde_json::from_str(&store.get(COLUMN_LAYOUT_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(loaded, layout);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Trait object behavior
// ═══════════════════════════════════════════════════════════════════

mod trait_object {
    use super::*;

    #[test]
    fn stores_work_behind_a_box() {
        let store: Box<dyn LayoutStore> = Box::new(MemoryLayoutStore::new());
        store.put("a.key", "payload").unwrap();
        assert_eq!(store.get("a.key").unwrap().as_deref(), Some("payload"));
    }

    #[test]
    fn memory_store_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MemoryLayoutStore>();
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn file_store_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FileLayoutStore>();
    }

    #[test]
    fn layout_key_is_stable() {
        // Saved layouts from previous runs must stay readable
        assert_eq!(COLUMN_LAYOUT_KEY, "dashboard.columns.v1");
    }
}
