//! One gate shared across threads.

use std::thread;

use kinetika_features::FeatureGate;

use crate::common::features;

#[test]
fn test_concurrent_checks_agree() {
    let gate = FeatureGate::builtin();
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let gate = gate.clone();
            thread::spawn(move || {
                let enabled = if i % 2 == 0 {
                    features(&["core.multi_studio"])
                } else {
                    features(&[])
                };
                (0..100)
                    .map(|_| gate.is_permission_allowed("studio.read", &enabled))
                    .all(|allowed| allowed == (i % 2 == 0))
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
