// Design Patterns: Singleton, Factory Method, Observer
// Each pattern is demonstrated by standalone programs under src/bin.

pub mod examples {
    //! # Design Patterns Walkthrough
    //!
    //! ## Pattern 1: Singleton
    //! - Process-wide logger (lazy_static + atomic handle counter)
    //! - Application settings store (OnceLock + RwLock, TOML overrides)
    //! - Thread-safe resource pool (OnceLock + Mutex, fail-fast acquire)
    //!
    //! ## Pattern 2: Factory Method
    //! - UI buttons per platform (trait objects, `FromStr` selection)
    //! - Notification senders (template method over the factory method)
    //! - Enemy spawners (open registry, adding a new enemy type)
    //!
    //! ## Pattern 3: Observer
    //! - Weather station with stateful displays (push model)
    //! - Job board with conditional and channel-based subscribers
    //!
    //! Run individual examples with:
    //! ```bash
    //! cargo run --bin p1_singleton_logger
    //! cargo run --bin p1_singleton_settings
    //! cargo run --bin p1_singleton_resource_pool
    //! cargo run --bin p2_factory_ui_buttons
    //! cargo run --bin p2_factory_notifications
    //! cargo run --bin p2_factory_enemy_spawner
    //! cargo run --bin p3_observer_weather_station
    //! cargo run --bin p3_observer_job_board
    //! ```
}
