//! Built-in demo data.

use super::snapshot::Snapshot;
use crate::types::{Activity, Day, HealthMetrics, User};
use chrono::NaiveDate;

pub const DEMO_USER_ID: &str = "demo-user-1";
pub const DEMO_DAY_ID: &str = "1";

/// A one-day snapshot for the demo user, with every metric recorded.
pub fn demo_snapshot() -> Snapshot {
    // (name, start, productivity, satisfaction, [heart, stress, energy, hydration, sleep])
    let rows: [(&str, &str, f64, f64, [f64; 5]); 10] = [
        ("Walking", "08:00", 7.0, 8.0, [75.0, 3.0, 6.0, 7.0, 8.0]),
        ("Work", "09:00", 8.0, 7.0, [80.0, 4.0, 7.0, 6.0, 7.0]),
        ("Yoga", "17:00", 6.0, 9.0, [70.0, 2.0, 8.0, 8.0, 9.0]),
        ("Reading", "19:00", 7.0, 8.0, [72.0, 2.0, 6.0, 7.0, 8.0]),
        ("Meeting", "10:00", 8.0, 6.0, [78.0, 5.0, 7.0, 6.0, 7.0]),
        ("Cooking", "18:00", 6.0, 7.0, [74.0, 3.0, 6.0, 7.0, 8.0]),
        ("Social Time", "20:00", 5.0, 9.0, [76.0, 2.0, 8.0, 7.0, 9.0]),
        ("Gym Workout", "16:00", 7.0, 8.0, [85.0, 4.0, 9.0, 8.0, 8.0]),
        ("Meditation", "07:00", 6.0, 9.0, [68.0, 1.0, 7.0, 8.0, 9.0]),
        ("Running", "06:30", 8.0, 8.0, [82.0, 3.0, 8.0, 7.0, 8.0]),
    ];

    let activities = rows
        .iter()
        .enumerate()
        .map(|(i, (name, start, productivity, satisfaction, h))| Activity {
            id: (i + 1).to_string(),
            day_id: DEMO_DAY_ID.to_string(),
            name: name.to_string(),
            start_time: start.to_string(),
            productivity_score: *productivity,
            satisfaction_score: *satisfaction,
            health_metrics: Some(HealthMetrics {
                heart_rate: h[0],
                stress_level: h[1],
                energy_level: h[2],
                hydration_level: h[3],
                sleep_quality: h[4],
            }),
        })
        .collect();

    Snapshot {
        users: vec![User {
            user_id: DEMO_USER_ID.to_string(),
            username: "Demo User".to_string(),
            email: None,
            created_at: None,
        }],
        days: vec![Day {
            day_id: DEMO_DAY_ID.to_string(),
            user_id: DEMO_USER_ID.to_string(),
            activity_date: NaiveDate::from_ymd_opt(2026, 2, 20).unwrap_or(NaiveDate::MIN),
        }],
        activities,
    }
}
