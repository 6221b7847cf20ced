//! Pattern 2: Factory Method
//! Cross-Platform UI Buttons
//!
//! Run with: cargo run --bin p2_factory_ui_buttons

use std::str::FromStr;
use thiserror::Error;

// ============================================================================
// Products
// ============================================================================

pub trait Button {
    fn render(&self) -> String;
}

pub struct WindowsButton;

impl Button for WindowsButton {
    fn render(&self) -> String {
        "Rendering a Windows Button.".to_string()
    }
}

pub struct MacOsButton;

impl Button for MacOsButton {
    fn render(&self) -> String {
        "Rendering a MacOS Button.".to_string()
    }
}

pub struct LinuxButton;

impl Button for LinuxButton {
    fn render(&self) -> String {
        "Rendering a Linux Button.".to_string()
    }
}

// ============================================================================
// Creators
// ============================================================================

pub trait UiCreator {
    /// The factory method.
    fn create_button(&self) -> Box<dyn Button>;

    fn display_dialog(&self) -> String {
        let button = self.create_button();
        format!("Displaying dialog with: {}", button.render())
    }
}

pub struct WindowsCreator;

impl UiCreator for WindowsCreator {
    fn create_button(&self) -> Box<dyn Button> {
        Box::new(WindowsButton)
    }
}

pub struct MacOsCreator;

impl UiCreator for MacOsCreator {
    fn create_button(&self) -> Box<dyn Button> {
        Box::new(MacOsButton)
    }
}

pub struct LinuxCreator;

impl UiCreator for LinuxCreator {
    fn create_button(&self) -> Box<dyn Button> {
        Box::new(LinuxButton)
    }
}

// ============================================================================
// Choosing a creator at runtime
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
}

#[derive(Error, Debug, PartialEq)]
#[error("unknown platform '{0}' (expected windows, macos or linux)")]
pub struct UnknownPlatform(String);

impl FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "windows" => Ok(Platform::Windows),
            "macos" | "mac" => Ok(Platform::MacOs),
            "linux" => Ok(Platform::Linux),
            _ => Err(UnknownPlatform(s.to_string())),
        }
    }
}

pub fn creator_for(platform: Platform) -> Box<dyn UiCreator> {
    match platform {
        Platform::Windows => Box::new(WindowsCreator),
        Platform::MacOs => Box::new(MacOsCreator),
        Platform::Linux => Box::new(LinuxCreator),
    }
}

fn main() {
    println!("=== Factory Method: UI Buttons ===\n");

    let creators: Vec<Box<dyn UiCreator>> = vec![
        Box::new(WindowsCreator),
        Box::new(MacOsCreator),
        Box::new(LinuxCreator),
    ];
    for creator in &creators {
        println!("{}", creator.display_dialog());
    }

    println!("\n=== Selecting a Creator by Name ===");
    for name in ["Linux", "macos", "BeOS"] {
        match name.parse::<Platform>() {
            Ok(platform) => println!("{:<6} -> {}", name, creator_for(platform).display_dialog()),
            Err(err) => println!("{:<6} -> error: {}", name, err),
        }
    }
}
