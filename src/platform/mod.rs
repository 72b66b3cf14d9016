//! Browser/native seams: wall clock, calendar date, LocalStorage
//!
//! Everything here is best-effort. Storage can be absent (private
//! browsing, disabled cookies) and the native build has none at all, so
//! callers always get a usable default instead of an error.

/// Unix time in milliseconds.
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as f64)
        .unwrap_or(0.0)
}

/// Local calendar date as (year, month 1..=12, day 1..=31).
/// The daily challenge rolls over at the player's local midnight, not UTC's.
#[cfg(target_arch = "wasm32")]
pub fn today_ymd() -> (i32, u32, u32) {
    let date = js_sys::Date::new_0();
    (
        date.get_full_year() as i32,
        date.get_month() + 1,
        date.get_date(),
    )
}

#[cfg(not(target_arch = "wasm32"))]
pub fn today_ymd() -> (i32, u32, u32) {
    use chrono::Datelike;
    let today = chrono::Local::now().date_naive();
    (today.year(), today.month(), today.day())
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten()
}

/// Read a LocalStorage value. `None` when storage is unavailable or the
/// key is unset.
#[cfg(target_arch = "wasm32")]
pub fn storage_get(key: &str) -> Option<String> {
    local_storage().and_then(|s| s.get_item(key).ok()).flatten()
}

/// Write a LocalStorage value. `false` when storage is unavailable or
/// rejects the write (quota, private mode).
#[cfg(target_arch = "wasm32")]
pub fn storage_set(key: &str, value: &str) -> bool {
    local_storage()
        .map(|s| s.set_item(key, value).is_ok())
        .unwrap_or(false)
}

/// Native stubs - persistence only exists in the browser.
#[cfg(not(target_arch = "wasm32"))]
pub fn storage_get(_key: &str) -> Option<String> {
    None
}

#[cfg(not(target_arch = "wasm32"))]
pub fn storage_set(_key: &str, _value: &str) -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_today_ymd_is_plausible() {
        let (year, month, day) = today_ymd();
        assert!(year >= 2024);
        assert!((1..=12).contains(&month));
        assert!((1..=31).contains(&day));
    }

    #[test]
    fn test_now_ms_is_after_2024() {
        // 2024-01-01 in Unix millis
        assert!(now_ms() > 1_704_067_200_000.0);
    }
}
