//! Where recommendations are requested for: the device position when one is
//! available, otherwise one of a fixed set of demo cities.

use async_trait::async_trait;
use std::fmt::Debug;
use tracing::{debug, warn};

use crate::{
    error::LocationError,
    model::{Coordinates, Location},
};

/// Name given to a position obtained from the device.
pub const CURRENT_LOCATION_NAME: &str = "Current Location";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DemoLocation {
    pub name: &'static str,
    pub coordinates: Coordinates,
}

impl DemoLocation {
    pub fn to_location(&self) -> Location {
        Location::new(self.coordinates, self.name)
    }
}

pub const DEMO_LOCATIONS: &[DemoLocation] = &[
    DemoLocation { name: "New Delhi, India", coordinates: Coordinates::new(28.6139, 77.2090) },
    DemoLocation { name: "New York, USA", coordinates: Coordinates::new(40.7128, -74.0060) },
    DemoLocation { name: "London, UK", coordinates: Coordinates::new(51.5074, -0.1278) },
    DemoLocation { name: "Tokyo, Japan", coordinates: Coordinates::new(35.6895, 139.6917) },
    DemoLocation { name: "Sydney, Australia", coordinates: Coordinates::new(-33.8688, 151.2093) },
    DemoLocation { name: "Honolulu, Hawaii", coordinates: Coordinates::new(21.3069, -157.8583) },
    DemoLocation { name: "Reykjavik, Iceland", coordinates: Coordinates::new(64.1466, -21.9426) },
];

/// Index into [`DEMO_LOCATIONS`] used when the device position is unavailable ("New York, USA").
pub const DEFAULT_FALLBACK_INDEX: usize = 1;

/// What the user picked from the location list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationChoice {
    /// Ask the device again.
    Current,
    /// A fixed entry of [`DEMO_LOCATIONS`].
    Demo(usize),
}

impl LocationChoice {
    /// Match a choice by name, case-insensitively. "current" selects the device.
    pub fn from_name(name: &str) -> Result<Self, LocationError> {
        let wanted = name.trim().to_lowercase();
        if wanted == "current" || wanted == CURRENT_LOCATION_NAME.to_lowercase() {
            return Ok(LocationChoice::Current);
        }

        DEMO_LOCATIONS
            .iter()
            .position(|demo| {
                let lower = demo.name.to_lowercase();
                lower == wanted || lower.split(',').next().is_some_and(|city| city.trim() == wanted)
            })
            .map(LocationChoice::Demo)
            .ok_or_else(|| LocationError::UnknownDemoLocation(name.to_string()))
    }
}

/// Source of the device's own position.
#[async_trait]
pub trait DeviceLocator: Send + Sync + Debug {
    async fn locate(&self) -> Result<Coordinates, LocationError>;
}

/// Locator that always reports a fixed position (from config or flags).
#[derive(Debug, Clone, Copy)]
pub struct FixedLocator {
    coordinates: Coordinates,
}

impl FixedLocator {
    pub fn new(coordinates: Coordinates) -> Self {
        Self { coordinates }
    }
}

#[async_trait]
impl DeviceLocator for FixedLocator {
    async fn locate(&self) -> Result<Coordinates, LocationError> {
        Ok(self.coordinates)
    }
}

/// Locator for hosts without any positioning support.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableLocator;

#[async_trait]
impl DeviceLocator for UnavailableLocator {
    async fn locate(&self) -> Result<Coordinates, LocationError> {
        Err(LocationError::ServiceUnavailable)
    }
}

/// Build the locator for the given optional fixed position.
pub fn locator_for(coordinates: Option<Coordinates>) -> Box<dyn DeviceLocator> {
    match coordinates {
        Some(c) => Box::new(FixedLocator::new(c)),
        None => Box::new(UnavailableLocator),
    }
}

#[derive(Debug)]
pub struct LocationResolver {
    locator: Box<dyn DeviceLocator>,
}

impl LocationResolver {
    pub fn new(locator: Box<dyn DeviceLocator>) -> Self {
        Self { locator }
    }

    /// Ask the device for its position, falling back to a demo city on any failure.
    ///
    /// Never errors: a failed attempt is logged and resolved via the fallback.
    pub async fn resolve_current(&self) -> Location {
        match self.locator.locate().await {
            Ok(coordinates) => {
                debug!(?coordinates, "device location resolved");
                Location::new(coordinates, CURRENT_LOCATION_NAME)
            }
            Err(err) => {
                let fallback = DEMO_LOCATIONS[DEFAULT_FALLBACK_INDEX].to_location();
                warn!(
                    error = %err,
                    fallback = fallback.name(),
                    "device location unavailable, using demo location"
                );
                fallback
            }
        }
    }

    /// Resolve a user choice. Demo entries resolve without touching the device.
    pub async fn select(&self, choice: LocationChoice) -> Result<Location, LocationError> {
        match choice {
            LocationChoice::Current => Ok(self.resolve_current().await),
            LocationChoice::Demo(index) => demo_location(index),
        }
    }
}

pub fn demo_location(index: usize) -> Result<Location, LocationError> {
    DEMO_LOCATIONS
        .get(index)
        .map(DemoLocation::to_location)
        .ok_or_else(|| LocationError::UnknownDemoLocation(index.to_string()))
}
