use chrono::{DateTime, Duration, Utc};

use super::aggregate::Notification;
use super::value_objects::{NewNotification, NotificationKind};

/// Notifications shown on a fresh session, newest first
pub fn demo_notifications(now: DateTime<Utc>) -> Vec<Notification> {
    vec![
        Notification::with_read(
            NewNotification::new(
                NotificationKind::Success,
                "Course Enrollment Successful",
                "You have successfully enrolled in CS50's Introduction to Python",
            )
            .with_icon("check-circle")
            .with_action("View Course", "#"),
            now - Duration::minutes(5),
            false,
        ),
        Notification::with_read(
            NewNotification::new(
                NotificationKind::Achievement,
                "7-Day Streak! 🔥",
                "Congratulations! You've maintained a 7-day learning streak",
            )
            .with_icon("award")
            .with_action("View Achievements", "#"),
            now - Duration::minutes(30),
            false,
        ),
        Notification::with_read(
            NewNotification::new(
                NotificationKind::Certificate,
                "Certificate Ready",
                "Your Machine Learning Specialization certificate is ready to download",
            )
            .with_icon("certificate")
            .with_action("Download", "#"),
            now - Duration::hours(2),
            false,
        ),
        Notification::with_read(
            NewNotification::new(
                NotificationKind::Reminder,
                "Course Deadline Approaching",
                "MIT Probability course access expires in 3 days",
            )
            .with_icon("clock")
            .with_action("Continue Course", "#"),
            now - Duration::hours(5),
            true,
        ),
        Notification::with_read(
            NewNotification::new(
                NotificationKind::Info,
                "New Course Recommendation",
                "Based on your progress, we recommend: Advanced Data Structures",
            )
            .with_icon("lightbulb")
            .with_action("View Course", "#"),
            now - Duration::days(1),
            true,
        ),
    ]
}
