use std::sync::LazyLock;

use serein_core::StressEvent;

/// The canonical life-event inventory. Seeded into `stress_events` at
/// startup; ids are stable and referenced by stored submissions.
pub fn canonical_events() -> &'static [StressEvent] {
    static EVENTS: LazyLock<Vec<StressEvent>> = LazyLock::new(|| {
        [
            (1, "Death of spouse", 100),
            (2, "Divorce", 73),
            (3, "Marital separation", 65),
            (4, "Imprisonment", 63),
            (5, "Death of a close family member", 63),
        ]
        .into_iter()
        .map(|(id, label, points)| StressEvent {
            id,
            label: label.to_string(),
            points,
        })
        .collect()
    });
    &EVENTS
}

/// Point value of a catalog event, or `None` for an unknown id.
///
/// This is the in-memory form of the lookup the store answers from the
/// `stress_events` table.
pub fn point_value(id: i32) -> Option<i32> {
    canonical_events()
        .iter()
        .find(|e| e.id == id)
        .map(|e| e.points)
}
