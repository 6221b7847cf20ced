//! Pattern 3: Observer
//! Job Board Publishing to Subscribers
//!
//! Run with: cargo run --bin p3_observer_job_board

use crossbeam::channel::{unbounded, Receiver, Sender};
use std::sync::Arc;
use std::thread;

#[derive(Debug, Clone, PartialEq)]
pub struct JobPost {
    pub title: String,
    pub company: String,
    pub salary: f64,
}

impl JobPost {
    pub fn new(title: &str, company: &str, salary: f64) -> Self {
        JobPost {
            title: title.to_string(),
            company: company.to_string(),
            salary,
        }
    }
}

pub trait JobSubscriber: Send + Sync {
    fn name(&self) -> &'static str;
    fn receive_update(&self, job: &JobPost) -> String;
}

pub type Subscriber = Arc<dyn JobSubscriber>;

#[derive(Default)]
pub struct JobBoard {
    subscribers: Vec<Subscriber>,
}

impl JobBoard {
    pub fn register_observer(&mut self, subscriber: Subscriber) -> bool {
        if self.subscribers.iter().any(|s| Arc::ptr_eq(s, &subscriber)) {
            return false;
        }
        println!("[Board] Registered observer: {}", subscriber.name());
        self.subscribers.push(subscriber);
        true
    }

    pub fn remove_observer(&mut self, subscriber: &Subscriber) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| !Arc::ptr_eq(s, subscriber));
        let removed = self.subscribers.len() != before;
        if removed {
            println!("[Board] Removed observer: {}", subscriber.name());
        }
        removed
    }

    pub fn notify_subscribers(&self, job: &JobPost) -> Vec<String> {
        self.subscribers
            .iter()
            .map(|subscriber| subscriber.receive_update(job))
            .collect()
    }

    pub fn post_job(&self, job: &JobPost) -> Vec<String> {
        println!(
            "\n[Board] Notifying subscribers about new job: {} ({:.0})",
            job.title, job.salary
        );
        self.notify_subscribers(job)
    }
}

// ----------------------------------------------------------------------------
// Subscribers
// ----------------------------------------------------------------------------

pub struct EmailAlerter;

impl JobSubscriber for EmailAlerter {
    fn name(&self) -> &'static str {
        "EmailAlerter"
    }

    fn receive_update(&self, job: &JobPost) -> String {
        format!("EmailAlerter: Sending job alert for '{}' to all users.", job.title)
    }
}

pub struct AnalyticsTracker;

impl JobSubscriber for AnalyticsTracker {
    fn name(&self) -> &'static str {
        "AnalyticsTracker"
    }

    fn receive_update(&self, job: &JobPost) -> String {
        format!("AnalyticsTracker: Logging new job posting data for {}.", job.company)
    }
}

pub struct SponsorAdvertiser {
    salary_threshold: f64,
}

impl Default for SponsorAdvertiser {
    fn default() -> Self {
        SponsorAdvertiser {
            salary_threshold: 150_000.0,
        }
    }
}

impl JobSubscriber for SponsorAdvertiser {
    fn name(&self) -> &'static str {
        "SponsorAdvertiser"
    }

    fn receive_update(&self, job: &JobPost) -> String {
        if job.salary > self.salary_threshold {
            format!(
                "SponsorAdvertiser: Activating ad campaign for high-value job: '{}'.",
                job.title
            )
        } else {
            "SponsorAdvertiser: Tracking standard job post.".to_string()
        }
    }
}

/// Forwards each post to a channel so another thread can consume it.
pub struct ChannelForwarder {
    sender: Sender<JobPost>,
}

impl ChannelForwarder {
    pub fn new() -> (Self, Receiver<JobPost>) {
        let (sender, receiver) = unbounded();
        (ChannelForwarder { sender }, receiver)
    }
}

impl JobSubscriber for ChannelForwarder {
    fn name(&self) -> &'static str {
        "ChannelForwarder"
    }

    fn receive_update(&self, job: &JobPost) -> String {
        match self.sender.send(job.clone()) {
            Ok(()) => format!("ChannelForwarder: Queued '{}' for the digest.", job.title),
            Err(_) => "ChannelForwarder: Digest consumer has gone away.".to_string(),
        }
    }
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

fn main() {
    let mut job_board = JobBoard::default();

    let email_alerter: Subscriber = Arc::new(EmailAlerter);
    let analytics_tracker: Subscriber = Arc::new(AnalyticsTracker);
    let sponsor_advertiser: Subscriber = Arc::new(SponsorAdvertiser::default());

    let low_salary_job = JobPost::new("Junior Rust Dev", "Startup X", 95_000.0);
    let high_salary_job = JobPost::new("Lead Architect", "BigTech Corp", 180_000.0);
    let mid_salary_job = JobPost::new("Data Scientist", "Data Co", 125_000.0);

    println!("\n--- PHASE 1: Registering All Observers ---");
    job_board.register_observer(Arc::clone(&email_alerter));
    job_board.register_observer(Arc::clone(&analytics_tracker));
    job_board.register_observer(Arc::clone(&sponsor_advertiser));

    println!("\n--- PHASE 2: Post Low-Salary Job (Test Standard Alert) ---");
    print_lines(&job_board.post_job(&low_salary_job));

    println!("\n--- PHASE 3: Post High-Salary Job (Test Conditional Alert) ---");
    print_lines(&job_board.post_job(&high_salary_job));

    println!("\n--- PHASE 4: Unsubscribe Email Alerter ---");
    job_board.remove_observer(&email_alerter);

    println!("\n--- PHASE 5: Post Mid-Salary Job (Verify Unsubscribe) ---");
    print_lines(&job_board.post_job(&mid_salary_job));

    println!("\n--- PHASE 6: Channel-Based Subscriber ---");
    let (forwarder, receiver) = ChannelForwarder::new();
    let forwarder: Subscriber = Arc::new(forwarder);
    job_board.register_observer(Arc::clone(&forwarder));

    let digest = thread::spawn(move || {
        receiver
            .iter()
            .map(|job| format!("{} @ {}", job.title, job.company))
            .collect::<Vec<_>>()
    });

    print_lines(&job_board.post_job(&JobPost::new("SRE", "Cloud Inc", 160_000.0)));
    print_lines(&job_board.post_job(&JobPost::new("QA Engineer", "Test Co", 90_000.0)));

    // Dropping the last sender ends the digest thread's loop.
    job_board.remove_observer(&forwarder);
    drop(forwarder);

    match digest.join() {
        Ok(entries) => println!("\nDigest received {} jobs: {:?}", entries.len(), entries),
        Err(_) => eprintln!("[WARN] digest thread panicked"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard_board() -> (JobBoard, Subscriber) {
        let mut board = JobBoard::default();
        let email: Subscriber = Arc::new(EmailAlerter);
        board.register_observer(Arc::clone(&email));
        board.register_observer(Arc::new(AnalyticsTracker));
        board.register_observer(Arc::new(SponsorAdvertiser::default()));
        (board, email)
    }

    #[test]
    fn test_post_reaches_all_in_order() {
        let (board, _) = standard_board();
        let lines = board.notify_subscribers(&JobPost::new("Lead Architect", "BigTech Corp", 180_000.0));
        assert_eq!(
            lines,
            vec![
                "EmailAlerter: Sending job alert for 'Lead Architect' to all users.",
                "AnalyticsTracker: Logging new job posting data for BigTech Corp.",
                "SponsorAdvertiser: Activating ad campaign for high-value job: 'Lead Architect'.",
            ]
        );
    }

    #[test]
    fn test_sponsor_threshold_is_strict() {
        let sponsor = SponsorAdvertiser::default();
        let at_threshold = JobPost::new("X", "Y", 150_000.0);
        assert_eq!(
            sponsor.receive_update(&at_threshold),
            "SponsorAdvertiser: Tracking standard job post."
        );
    }

    #[test]
    fn test_unsubscribed_observer_not_notified() {
        let (mut board, email) = standard_board();
        assert!(board.remove_observer(&email));
        assert!(!board.remove_observer(&email));

        let lines = board.notify_subscribers(&JobPost::new("Data Scientist", "Data Co", 125_000.0));
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|line| !line.starts_with("EmailAlerter")));
    }

    #[test]
    fn test_duplicate_registration_ignored() {
        let (mut board, email) = standard_board();
        assert!(!board.register_observer(email));
        assert_eq!(board.notify_subscribers(&JobPost::new("a", "b", 1.0)).len(), 3);
    }

    #[test]
    fn test_channel_forwarder_delivers_posts() {
        let mut board = JobBoard::default();
        let (forwarder, receiver) = ChannelForwarder::new();
        board.register_observer(Arc::new(forwarder));

        let job = JobPost::new("SRE", "Cloud Inc", 160_000.0);
        board.notify_subscribers(&job);
        assert_eq!(receiver.try_recv(), Ok(job));
    }
}
