//! Pattern 1: Singleton
//! Thread-Safe Resource Pool
//!
//! One process-wide pool of interchangeable resource tokens, created lazily
//! on first use and shared by every thread. Acquire and release are
//! serialised by a single mutex guarding both token collections.
//!
//! Run with: cargo run --bin p1_singleton_resource_pool
//! Override defaults with: POOL_SIZE=4 POOL_WORKERS=8 cargo run --bin p1_singleton_resource_pool

use colored::Colorize;
use crossbeam::channel::{unbounded, Sender};
use rand::Rng;
use serde::Deserialize;
use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};
use std::thread;
use std::time::Duration;
use thiserror::Error;

// =============================================================================
// Milestone 1: Tokens, errors and status
// =============================================================================

/// Opaque identifier for one unit of the pooled resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceToken(String);

impl ResourceToken {
    fn minted(index: usize) -> Self {
        ResourceToken(format!("Res-{}", index))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceToken {
    fn from(label: &str) -> Self {
        ResourceToken(label.to_string())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    #[error("pool exhausted: all {capacity} resources are in use")]
    Exhausted { capacity: usize },

    #[error("resource {0} is not in use")]
    NotInUse(ResourceToken),
}

/// Counts taken at a single instant under the pool lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStatus {
    pub available: usize,
    pub in_use: usize,
}

impl fmt::Display for PoolStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Avail: {}. In Use: {}.", self.available, self.in_use)
    }
}

/// Copy of both collections; `available` in FIFO order, `in_use` sorted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSnapshot {
    pub available: Vec<ResourceToken>,
    pub in_use: Vec<ResourceToken>,
}

// =============================================================================
// Milestone 2: The pool and its critical section
// =============================================================================

struct PoolState {
    available: VecDeque<ResourceToken>,
    in_use: HashSet<ResourceToken>,
}

pub struct ResourcePool {
    capacity: usize,
    state: Mutex<PoolState>,
}

impl ResourcePool {
    /// Builds a standalone pool holding `Res-1 ..= Res-size`.
    pub fn new(size: usize) -> Self {
        let available = (1..=size).map(ResourceToken::minted).collect();
        ResourcePool {
            capacity: size,
            state: Mutex::new(PoolState {
                available,
                in_use: HashSet::with_capacity(size),
            }),
        }
    }

    /// Returns the process-wide pool, creating it with `requested_size`
    /// on the very first call. Later sizes are ignored.
    pub fn global(requested_size: usize) -> &'static ResourcePool {
        static POOL: OnceLock<ResourcePool> = OnceLock::new();
        POOL.get_or_init(|| ResourcePool::new(requested_size))
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // Nothing panics while the guard is held, so a poisoned lock still
    // holds consistent state.
    fn lock(&self) -> MutexGuard<'_, PoolState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Hands out the token that has been free the longest.
    pub fn acquire(&self) -> Result<ResourceToken, PoolError> {
        let mut state = self.lock();
        let token = state.available.pop_front().ok_or(PoolError::Exhausted {
            capacity: self.capacity,
        })?;
        state.in_use.insert(token.clone());
        Ok(token)
    }

    /// Returns a checked-out token to the back of the queue. Tokens that
    /// are not checked out leave the pool untouched.
    pub fn release(&self, token: &ResourceToken) -> Result<(), PoolError> {
        let mut state = self.lock();
        if !state.in_use.remove(token) {
            return Err(PoolError::NotInUse(token.clone()));
        }
        state.available.push_back(token.clone());
        Ok(())
    }

    pub fn status(&self) -> PoolStatus {
        let state = self.lock();
        PoolStatus {
            available: state.available.len(),
            in_use: state.in_use.len(),
        }
    }

    pub fn snapshot(&self) -> PoolSnapshot {
        let (available, mut in_use) = {
            let state = self.lock();
            (
                state.available.iter().cloned().collect::<Vec<_>>(),
                state.in_use.iter().cloned().collect::<Vec<_>>(),
            )
        };
        in_use.sort();
        PoolSnapshot { available, in_use }
    }

    /// Acquires a token that goes back to the pool when the guard drops.
    pub fn checkout(&self) -> Result<PooledResource<'_>, PoolError> {
        let token = self.acquire()?;
        Ok(PooledResource { pool: self, token })
    }
}

// =============================================================================
// Milestone 3: RAII checkout
// =============================================================================

pub struct PooledResource<'a> {
    pool: &'a ResourcePool,
    token: ResourceToken,
}

impl PooledResource<'_> {
    pub fn token(&self) -> &ResourceToken {
        &self.token
    }
}

impl Drop for PooledResource<'_> {
    fn drop(&mut self) {
        // The guard owns the checkout, so the token is always in use here.
        let _ = self.pool.release(&self.token);
    }
}

// =============================================================================
// Milestone 4: Demo configuration
// =============================================================================

const DEFAULT_CONFIG: &str = r#"
pool_size = 3
workers = 5
"#;

fn default_pool_size() -> usize {
    3
}

fn default_workers() -> usize {
    5
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct DemoConfig {
    #[serde(default = "default_pool_size")]
    pool_size: usize,

    #[serde(default = "default_workers")]
    workers: usize,
}

#[derive(Error, Debug)]
enum ConfigError {
    #[error("invalid demo configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("environment override {name}={value} is not a non-negative integer")]
    InvalidOverride { name: String, value: String },
}

impl DemoConfig {
    fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        for (name, slot) in [
            ("POOL_SIZE", &mut self.pool_size),
            ("POOL_WORKERS", &mut self.workers),
        ] {
            if let Some(value) = lookup(name) {
                *slot = value.trim().parse().map_err(|_| ConfigError::InvalidOverride {
                    name: name.to_string(),
                    value: value.clone(),
                })?;
            }
        }
        Ok(self)
    }

    fn load() -> Result<Self, ConfigError> {
        Self::from_toml(DEFAULT_CONFIG)?.with_overrides(|name| std::env::var(name).ok())
    }
}

// =============================================================================
// Milestone 5: Worker threads
// =============================================================================

#[derive(Debug)]
enum WorkerEvent {
    Acquired { worker: String, token: ResourceToken },
    Released { worker: String, token: ResourceToken },
    Empty { worker: String },
    Rejected { worker: String, error: PoolError },
}

impl fmt::Display for WorkerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkerEvent::Acquired { worker, token } => {
                write!(f, "[{}] Acquired: {}", worker, token.to_string().green())
            }
            WorkerEvent::Released { worker, token } => {
                write!(f, "[{}] Released: {}", worker, token.to_string().cyan())
            }
            WorkerEvent::Empty { worker } => {
                write!(f, "[{}] {}", worker, "Pool empty!".yellow())
            }
            WorkerEvent::Rejected { worker, error } => {
                write!(f, "[{}] {} {}", worker, "Warning:".yellow(), error)
            }
        }
    }
}

fn current_worker() -> String {
    thread::current().name().unwrap_or("unnamed").to_string()
}

fn worker(pool_size: usize, events: Sender<WorkerEvent>) {
    let name = current_worker();
    let pool = ResourcePool::global(pool_size);

    let token = match pool.acquire() {
        Ok(token) => token,
        Err(_) => {
            let _ = events.send(WorkerEvent::Empty { worker: name });
            return;
        }
    };
    let _ = events.send(WorkerEvent::Acquired {
        worker: name.clone(),
        token: token.clone(),
    });

    // Simulated work happens outside the pool lock.
    let hold = rand::thread_rng().gen_range(5..25);
    thread::sleep(Duration::from_millis(hold));

    let event = match pool.release(&token) {
        Ok(()) => WorkerEvent::Released { worker: name, token },
        Err(error) => WorkerEvent::Rejected { worker: name, error },
    };
    let _ = events.send(event);
}

fn run_workers(config: &DemoConfig) -> Result<(), Box<dyn std::error::Error>> {
    let (tx, rx) = unbounded();

    let mut handles = Vec::with_capacity(config.workers);
    for id in 0..config.workers {
        let events = tx.clone();
        let pool_size = config.pool_size;
        let handle = thread::Builder::new()
            .name(format!("Thread-{}", id))
            .spawn(move || worker(pool_size, events))?;
        handles.push(handle);
    }
    drop(tx);

    for event in rx {
        println!("  {}", event);
    }

    for handle in handles {
        if handle.join().is_err() {
            eprintln!("  {} a worker thread panicked", "[WARN]".yellow());
        }
    }
    Ok(())
}

// =============================================================================
// Milestone 6: Walkthroughs
// =============================================================================

fn sequential_walkthrough() {
    let pool = ResourcePool::new(3);
    println!("Fresh pool: {:?}", pool.snapshot());

    for _ in 0..4 {
        match pool.acquire() {
            Ok(token) => println!("  acquire() -> {}", token.to_string().green()),
            Err(err) => println!("  acquire() -> {}", err.to_string().red()),
        }
    }

    let res2 = ResourceToken::from("Res-2");
    match pool.release(&res2) {
        Ok(()) => println!("  release({}) -> ok", res2),
        Err(err) => println!("  release({}) -> {}", res2, err),
    }
    match pool.release(&res2) {
        Ok(()) => println!("  release({}) again -> ok", res2),
        Err(err) => println!("  release({}) again -> {}", res2, err.to_string().yellow()),
    }

    println!("  status() -> {}", pool.status());
    println!("  snapshot -> {:?}", pool.snapshot());
}

fn checkout_walkthrough() {
    let pool = ResourcePool::new(2);
    {
        match pool.checkout() {
            Ok(guard) => {
                println!("  Checked out {}", guard.token());
                println!("  While held: {}", pool.status());
            }
            Err(err) => println!("  checkout failed: {}", err),
        }
    }
    println!("  After guard dropped: {}", pool.status());
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Thread-Safe Resource Pool Singleton ===\n");

    let config = DemoConfig::load()?;
    println!("Config: pool_size={}, workers={}\n", config.pool_size, config.workers);

    println!("=== Sequential Walkthrough (standalone pool) ===");
    sequential_walkthrough();

    println!("\n=== RAII Checkout ===");
    checkout_walkthrough();

    println!("\n=== {} Workers Sharing the Global Pool ===", config.workers);
    run_workers(&config)?;

    println!("\n=== Repeat Construction ===");
    let pool = ResourcePool::global(config.pool_size);
    let requested = config.pool_size + 10;
    let again = ResourcePool::global(requested);
    println!("  Same instance: {}", std::ptr::eq(pool, again));
    if again.capacity() != requested {
        eprintln!(
            "  {} requested size {} ignored; pool already has capacity {}",
            "[WARN]".yellow(),
            requested,
            again.capacity()
        );
    }

    println!("\n--- Final Pool Status ---");
    let status = pool.status();
    if status.available == pool.capacity() && status.in_use == 0 {
        println!("{}", status.to_string().green());
    } else {
        println!("{}", status.to_string().red());
    }

    println!("\n=== Key Points ===");
    println!("1. OnceLock::get_or_init runs the initializer exactly once");
    println!("2. One Mutex guards both collections, so status() never tears");
    println!("3. acquire() on an empty pool fails fast instead of blocking");
    println!("4. Releasing a token that is not checked out is reported, not fatal");

    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
