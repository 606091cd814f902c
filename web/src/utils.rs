use chrono::prelude::*;
use gloo::storage::{LocalStorage, Storage};
use mnemo_core::{KeyValueStore, StorageError};

/// The browser's local storage, as a string key-value port.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub(crate) struct LocalStorageStore;

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        match LocalStorage::raw().get_item(key) {
            Ok(value) => value,
            Err(err) => {
                log::error!("Could not read {:?} from local storage: {:?}", key, err);
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|err| StorageError::WriteFailed {
                key: key.to_string(),
                reason: format!("{:?}", err),
            })
    }
}

/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}

pub(crate) fn utc_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use mnemo_core::{BestScore, ScoreStore, ScoreUpdate, StorageKey};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn best_score_persists_in_local_storage() {
        LocalStorage::delete(BestScore::KEY);
        let mut scores = ScoreStore::new(LocalStorageStore);
        assert_eq!(scores.get(), BestScore::UNSET);

        let update = scores.compare_and_update(4, 6.5).unwrap();

        assert_eq!(update, ScoreUpdate::NewBest(BestScore::new(4, 6.5)));
        assert_eq!(
            LocalStorageStore.get(BestScore::KEY).as_deref(),
            Some(r#"{"moves":4,"time":6.5}"#)
        );
        assert_eq!(ScoreStore::new(LocalStorageStore).get(), BestScore::new(4, 6.5));
        LocalStorage::delete(BestScore::KEY);
    }
}
