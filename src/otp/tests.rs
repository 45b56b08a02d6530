use super::*;

fn store() -> OtpStore<InMemoryOtpCache> {
    OtpStore::new(InMemoryOtpCache::new())
}

#[test]
fn test_generate_is_six_digits() {
    let store = store();
    for _ in 0..100 {
        let code = store.generate();
        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c.is_ascii_digit()));
    }
}

#[test]
fn test_verify_unknown_phone() {
    let store = store();
    assert_eq!(
        store.verify("9876543210", "123456", true),
        Err(OtpVerifyError::NotFound)
    );
}

#[test]
fn test_verify_mismatch_keeps_entry() {
    let store = store();
    store.store("9876543210", "123456");

    assert_eq!(
        store.verify("9876543210", "000000", true),
        Err(OtpVerifyError::Mismatch)
    );
    // Wrong guesses must not burn the code.
    assert_eq!(store.verify("9876543210", "123456", true), Ok(()));
}

#[test]
fn test_non_consuming_verify_keeps_code_usable() {
    let store = store();
    store.store("9876543210", "123456");

    assert_eq!(store.verify("9876543210", "123456", false), Ok(()));
    assert_eq!(store.verify("9876543210", "123456", true), Ok(()));
    assert_eq!(
        store.verify("9876543210", "123456", true),
        Err(OtpVerifyError::NotFound)
    );
}

#[test]
fn test_overwrite_discards_previous_code() {
    let store = store();
    store.store("9876543210", "111111");
    store.store("9876543210", "222222");

    assert_eq!(
        store.verify("9876543210", "111111", true),
        Err(OtpVerifyError::Mismatch)
    );
    assert_eq!(store.verify("9876543210", "222222", true), Ok(()));
}

#[test]
fn test_expired_entry_fails_and_is_deleted() {
    let store = store();
    store.cache.put(
        "9876543210",
        OtpEntry {
            code: "123456".to_string(),
            expires_at: Utc::now() - Duration::seconds(1),
        },
    );

    assert_eq!(
        store.verify("9876543210", "123456", false),
        Err(OtpVerifyError::Expired)
    );
    // Entry was removed, so the next attempt is NotFound.
    assert_eq!(
        store.verify("9876543210", "123456", false),
        Err(OtpVerifyError::NotFound)
    );
}

#[test]
fn test_sweep_removes_only_expired_entries() {
    let store = store();
    store.cache.put(
        "1111111111",
        OtpEntry {
            code: "123456".to_string(),
            expires_at: Utc::now() - Duration::minutes(1),
        },
    );
    store.store("2222222222", "654321");

    store.sweep();

    assert_eq!(
        store.verify("1111111111", "123456", true),
        Err(OtpVerifyError::NotFound)
    );
    assert_eq!(store.verify("2222222222", "654321", true), Ok(()));
}
