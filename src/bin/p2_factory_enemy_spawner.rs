//! Pattern 2: Factory Method
//! Enemy Spawners
//!
//! New enemy types plug in by implementing `Enemy` and `EnemySpawner`;
//! nothing else changes. The Goblin below is added that way.
//!
//! Run with: cargo run --bin p2_factory_enemy_spawner

use std::collections::BTreeMap;
use thiserror::Error;

// ============================================================================
// Example: Products and creators
// ============================================================================

pub trait Enemy {
    fn attack(&self) -> String;
}

pub trait EnemySpawner {
    fn create_enemy(&self) -> Box<dyn Enemy>;

    fn simulate_encounter(&self) -> String {
        let enemy = self.create_enemy();
        format!("An encounter begins! [{}]", enemy.attack())
    }
}

macro_rules! enemy {
    ($enemy:ident, $spawner:ident, $attack:expr) => {
        pub struct $enemy;

        impl Enemy for $enemy {
            fn attack(&self) -> String {
                $attack.to_string()
            }
        }

        pub struct $spawner;

        impl EnemySpawner for $spawner {
            fn create_enemy(&self) -> Box<dyn Enemy> {
                Box::new($enemy)
            }
        }
    };
}

enemy!(Orc, OrcSpawner, "Orc swings a crude axe!");
enemy!(Elf, ElfSpawner, "Elf fires an arrow with precision!");
enemy!(Dragon, DragonSpawner, "Dragon breathes fire!");

// ============================================================================
// Example: Extending without touching existing code
// ============================================================================

pub struct Goblin;

impl Enemy for Goblin {
    fn attack(&self) -> String {
        "Goblin stabs with a rusty dagger!".to_string()
    }
}

pub struct GoblinSpawner;

impl EnemySpawner for GoblinSpawner {
    fn create_enemy(&self) -> Box<dyn Enemy> {
        Box::new(Goblin)
    }
}

// ============================================================================
// Example: Spawner registry keyed by name
// ============================================================================

#[derive(Error, Debug, PartialEq)]
#[error("no spawner registered for '{name}' (known: {known})")]
pub struct UnknownEnemy {
    name: String,
    known: String,
}

#[derive(Default)]
pub struct SpawnerRegistry {
    spawners: BTreeMap<String, Box<dyn EnemySpawner>>,
}

impl SpawnerRegistry {
    pub fn register(&mut self, name: &str, spawner: Box<dyn EnemySpawner>) {
        self.spawners.insert(name.to_ascii_lowercase(), spawner);
    }

    pub fn spawn(&self, name: &str) -> Result<Box<dyn Enemy>, UnknownEnemy> {
        self.spawners
            .get(&name.to_ascii_lowercase())
            .map(|spawner| spawner.create_enemy())
            .ok_or_else(|| UnknownEnemy {
                name: name.to_string(),
                known: self.spawners.keys().cloned().collect::<Vec<_>>().join(", "),
            })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.spawners.keys().map(String::as_str)
    }
}

fn standard_registry() -> SpawnerRegistry {
    let mut registry = SpawnerRegistry::default();
    registry.register("orc", Box::new(OrcSpawner));
    registry.register("elf", Box::new(ElfSpawner));
    registry.register("dragon", Box::new(DragonSpawner));
    registry.register("goblin", Box::new(GoblinSpawner));
    registry
}

fn main() {
    println!("--- Simulating Encounters ---");
    let spawners: Vec<Box<dyn EnemySpawner>> = vec![
        Box::new(OrcSpawner),
        Box::new(ElfSpawner),
        Box::new(DragonSpawner),
        Box::new(GoblinSpawner),
    ];
    for spawner in &spawners {
        println!("{}", spawner.simulate_encounter());
    }

    println!("\n--- Spawning From a Level Script ---");
    let registry = standard_registry();
    println!("Registered: {}", registry.names().collect::<Vec<_>>().join(", "));
    for name in ["Dragon", "goblin", "troll"] {
        match registry.spawn(name) {
            Ok(enemy) => println!("  {} -> {}", name, enemy.attack()),
            Err(err) => println!("  {} -> {}", name, err),
        }
    }
}
