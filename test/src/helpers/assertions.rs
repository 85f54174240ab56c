/// Assert that a remote entity is visible in the session's registry
#[macro_export]
macro_rules! assert_visible {
    ($session:expr, $id:expr) => {
        assert!(
            $session
                .registry()
                .is_active(&cohort_shared::NetworkId::new($id)),
            "Entity {} should be visible",
            $id
        );
    };
}

/// Assert that a remote entity is not visible, pending or not
#[macro_export]
macro_rules! assert_hidden {
    ($session:expr, $id:expr) => {
        assert!(
            !$session
                .registry()
                .is_active(&cohort_shared::NetworkId::new($id)),
            "Entity {} should not be visible yet",
            $id
        );
    };
}
