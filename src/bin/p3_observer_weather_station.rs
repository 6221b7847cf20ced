//! Pattern 3: Observer
//! Weather Station With Push-Model Displays
//!
//! Run with: cargo run --bin p3_observer_weather_station

use std::sync::{Arc, Mutex, PoisonError};

// ============================================================================
// Example: Event and observer contract
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub temperature: f64,
    pub humidity: f64,
    pub pressure: f64,
}

pub trait Observer {
    fn name(&self) -> &'static str;

    /// Receives the pushed measurement and returns the line it displays.
    fn update(&mut self, measurement: &Measurement) -> String;
}

pub type SharedObserver = Arc<Mutex<dyn Observer + Send>>;

// ============================================================================
// Example: Subject
// ============================================================================

#[derive(Default)]
pub struct WeatherStation {
    observers: Vec<SharedObserver>,
    current: Option<Measurement>,
}

impl WeatherStation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if this exact observer is already registered.
    pub fn register_observer(&mut self, observer: SharedObserver) -> bool {
        if self.observers.iter().any(|o| Arc::ptr_eq(o, &observer)) {
            return false;
        }
        println!("WeatherStation: Registered {}.", name_of(&observer));
        self.observers.push(observer);
        true
    }

    pub fn remove_observer(&mut self, observer: &SharedObserver) -> bool {
        match self.observers.iter().position(|o| Arc::ptr_eq(o, observer)) {
            Some(index) => {
                let removed = self.observers.remove(index);
                println!("WeatherStation: Removed {}.", name_of(&removed));
                true
            }
            None => false,
        }
    }

    /// Pushes the current measurement to every observer in registration order.
    pub fn notify_observers(&self) -> Vec<String> {
        let Some(measurement) = self.current else {
            return Vec::new();
        };
        self.observers
            .iter()
            .map(|observer| {
                observer
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .update(&measurement)
            })
            .collect()
    }

    pub fn set_measurements(&mut self, temperature: f64, humidity: f64, pressure: f64) -> Vec<String> {
        println!(
            "\nWeatherStation: New measurements received - Temp: {:.1}°C, Humidity: {:.1}%, Pressure: {:.1}hPa",
            temperature, humidity, pressure
        );
        self.current = Some(Measurement {
            temperature,
            humidity,
            pressure,
        });
        self.notify_observers()
    }
}

fn name_of(observer: &SharedObserver) -> &'static str {
    observer.lock().unwrap_or_else(PoisonError::into_inner).name()
}

// ============================================================================
// Example: Displays
// ============================================================================

pub struct CurrentConditionsDisplay;

impl Observer for CurrentConditionsDisplay {
    fn name(&self) -> &'static str {
        "CurrentConditionsDisplay"
    }

    fn update(&mut self, m: &Measurement) -> String {
        format!(
            "CurrentConditionsDisplay: Temp: {:.1}°C, Humidity: {:.1}%.",
            m.temperature, m.humidity
        )
    }
}

pub struct StatisticsDisplay {
    min: f64,
    max: f64,
    sum: f64,
    readings: u32,
}

impl StatisticsDisplay {
    pub fn new() -> Self {
        StatisticsDisplay {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            sum: 0.0,
            readings: 0,
        }
    }

    pub fn average(&self) -> f64 {
        if self.readings == 0 {
            0.0
        } else {
            self.sum / f64::from(self.readings)
        }
    }
}

impl Observer for StatisticsDisplay {
    fn name(&self) -> &'static str {
        "StatisticsDisplay"
    }

    fn update(&mut self, m: &Measurement) -> String {
        self.min = self.min.min(m.temperature);
        self.max = self.max.max(m.temperature);
        self.sum += m.temperature;
        self.readings += 1;

        format!(
            "StatisticsDisplay: Avg Temp: {:.1}°C, Min Temp: {:.1}°C, Max Temp: {:.1}°C.",
            self.average(),
            self.min,
            self.max
        )
    }
}

pub struct ForecastDisplay;

impl ForecastDisplay {
    fn forecast(temperature: f64) -> &'static str {
        if temperature > 25.0 {
            "Warm weather expected!"
        } else if temperature < 10.0 {
            "Cooler weather coming!"
        } else {
            "Mild weather ahead."
        }
    }
}

impl Observer for ForecastDisplay {
    fn name(&self) -> &'static str {
        "ForecastDisplay"
    }

    fn update(&mut self, m: &Measurement) -> String {
        format!("ForecastDisplay: {}", Self::forecast(m.temperature))
    }
}

fn print_lines(lines: &[String]) {
    println!("WeatherStation: Notifying observers about new measurements...");
    for line in lines {
        println!("  {}", line);
    }
}

fn main() {
    let mut station = WeatherStation::new();

    let current: SharedObserver = Arc::new(Mutex::new(CurrentConditionsDisplay));
    let stats: SharedObserver = Arc::new(Mutex::new(StatisticsDisplay::new()));
    let forecast: SharedObserver = Arc::new(Mutex::new(ForecastDisplay));

    println!("--- Registering Observers ---");
    station.register_observer(Arc::clone(&current));
    station.register_observer(Arc::clone(&stats));
    station.register_observer(Arc::clone(&forecast));

    println!("\n--- First Measurement Update ---");
    print_lines(&station.set_measurements(24.5, 65.0, 1013.1));

    println!("\n--- Second Measurement Update (Warm Weather) ---");
    print_lines(&station.set_measurements(28.0, 70.0, 1012.8));

    println!("\n--- Removing Statistics Display ---");
    station.remove_observer(&stats);

    println!("\n--- Third Measurement Update (Cool Weather) ---");
    print_lines(&station.set_measurements(8.2, 85.5, 1015.0));

    println!("\n--- Re-registering Statistics Display ---");
    station.register_observer(Arc::clone(&stats));

    println!("\n--- Fourth Measurement Update (Mild Weather) ---");
    print_lines(&station.set_measurements(18.0, 60.0, 1014.5));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shared<O: Observer + Send + 'static>(observer: O) -> SharedObserver {
        Arc::new(Mutex::new(observer))
    }

    #[test]
    fn test_notifies_in_registration_order() {
        let mut station = WeatherStation::new();
        station.register_observer(shared(ForecastDisplay));
        station.register_observer(shared(CurrentConditionsDisplay));

        let lines = station.set_measurements(24.5, 65.0, 1013.1);
        assert_eq!(
            lines,
            vec![
                "ForecastDisplay: Mild weather ahead.",
                "CurrentConditionsDisplay: Temp: 24.5°C, Humidity: 65.0%.",
            ]
        );
    }

    #[test]
    fn test_duplicate_registration_ignored() {
        let mut station = WeatherStation::new();
        let display = shared(CurrentConditionsDisplay);
        assert!(station.register_observer(Arc::clone(&display)));
        assert!(!station.register_observer(Arc::clone(&display)));
        assert_eq!(station.set_measurements(20.0, 50.0, 1000.0).len(), 1);
    }

    #[test]
    fn test_removed_observer_is_skipped() {
        let mut station = WeatherStation::new();
        let stats = shared(StatisticsDisplay::new());
        let forecast = shared(ForecastDisplay);
        station.register_observer(Arc::clone(&stats));
        station.register_observer(Arc::clone(&forecast));

        assert!(station.remove_observer(&stats));
        assert!(!station.remove_observer(&stats));

        let lines = station.set_measurements(8.2, 85.5, 1015.0);
        assert_eq!(lines, vec!["ForecastDisplay: Cooler weather coming!"]);
    }

    #[test]
    fn test_statistics_running_values() {
        let mut stats = StatisticsDisplay::new();
        let reading = |t| Measurement {
            temperature: t,
            humidity: 0.0,
            pressure: 0.0,
        };

        stats.update(&reading(24.0));
        let line = stats.update(&reading(28.0));
        assert_eq!(
            line,
            "StatisticsDisplay: Avg Temp: 26.0°C, Min Temp: 24.0°C, Max Temp: 28.0°C."
        );

        stats.update(&reading(18.5));
        assert!((stats.average() - 23.5).abs() < 1e-9);
        assert_eq!(stats.min, 18.5);
        assert_eq!(stats.max, 28.0);
    }

    #[test]
    fn test_forecast_thresholds() {
        assert_eq!(ForecastDisplay::forecast(25.1), "Warm weather expected!");
        assert_eq!(ForecastDisplay::forecast(25.0), "Mild weather ahead.");
        assert_eq!(ForecastDisplay::forecast(10.0), "Mild weather ahead.");
        assert_eq!(ForecastDisplay::forecast(9.9), "Cooler weather coming!");
    }

    #[test]
    fn test_notify_without_measurement_is_empty() {
        let mut station = WeatherStation::new();
        station.register_observer(shared(ForecastDisplay));
        assert!(station.notify_observers().is_empty());
    }
}
