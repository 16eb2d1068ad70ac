//! Core state types for the location resource.
//!
//! This module defines the fundamental types shared by every component:
//!
//! - [`ResourceId`] - The fixed set of exposed resource identifiers
//! - [`PositionSnapshot`] - One assembled reading from the data source
//! - [`ResourceState`] - The cached state served to readers
//! - [`ChangeEvent`] - Which resources changed in a single commit
//! - [`ResourceValue`] - A single resource value handed back on read

use chrono::{DateTime, Utc};

/// Default scale factor applied to movement deltas.
pub const DEFAULT_SCALE_FACTOR: f64 = 1.0;

/// Resource identifiers exposed by the location object.
///
/// The numbering follows the LwM2M Location object (id 6). Only these
/// three resources are served; everything else is unsupported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum ResourceId {
    /// Latitude in decimal degrees.
    Latitude = 0,
    /// Longitude in decimal degrees.
    Longitude = 1,
    /// Time of the last committed coordinate change.
    Timestamp = 5,
}

impl ResourceId {
    /// All supported resource identifiers, in protocol order.
    pub const ALL: [ResourceId; 3] = [
        ResourceId::Latitude,
        ResourceId::Longitude,
        ResourceId::Timestamp,
    ];

    /// Numeric identifier as seen by the protocol layer.
    #[inline]
    pub fn id(self) -> u16 {
        self as u16
    }
}

impl TryFrom<u16> for ResourceId {
    type Error = u16;

    fn try_from(id: u16) -> Result<Self, Self::Error> {
        match id {
            0 => Ok(Self::Latitude),
            1 => Ok(Self::Longitude),
            5 => Ok(Self::Timestamp),
            other => Err(other),
        }
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Latitude => write!(f, "Latitude"),
            Self::Longitude => write!(f, "Longitude"),
            Self::Timestamp => write!(f, "Timestamp"),
        }
    }
}

/// A position reading assembled at the end of one refresh cycle.
///
/// Immutable once built. `observed_at` is taken when the reading is
/// assembled and becomes the committed timestamp if anything changed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionSnapshot {
    /// Latitude in decimal degrees.
    pub latitude: f64,

    /// Longitude in decimal degrees.
    pub longitude: f64,

    /// When this reading was taken.
    pub observed_at: DateTime<Utc>,
}

impl PositionSnapshot {
    /// Create a new snapshot.
    pub fn new(latitude: f64, longitude: f64, observed_at: DateTime<Utc>) -> Self {
        Self {
            latitude,
            longitude,
            observed_at,
        }
    }
}

/// Cached resource state served to readers.
///
/// `timestamp` always belongs to the latitude/longitude pair it is stored
/// with: it only moves when a coordinate moves, and all three fields are
/// replaced together.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResourceState {
    /// Latitude in decimal degrees.
    pub latitude: f64,

    /// Longitude in decimal degrees.
    pub longitude: f64,

    /// Time of the most recent committed coordinate change.
    pub timestamp: DateTime<Utc>,

    /// Multiplier for movement deltas. Refresh never touches it.
    pub scale_factor: f64,
}

impl ResourceState {
    /// Create the initial state from a first reading.
    pub fn initial(latitude: f64, longitude: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            latitude,
            longitude,
            timestamp,
            scale_factor: DEFAULT_SCALE_FACTOR,
        }
    }

    /// Get the position as (lat, lon).
    pub fn position(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }
}

/// Set of resources changed by a single commit.
///
/// Identifiers are kept sorted and unique. `Timestamp` is present whenever
/// a coordinate is, and never on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    resources: Vec<ResourceId>,
}

impl ChangeEvent {
    /// Build an event from the coordinate resources that changed.
    ///
    /// Returns `None` when no coordinate changed. `Timestamp` is added
    /// automatically.
    pub fn from_changed(latitude: bool, longitude: bool) -> Option<Self> {
        if !latitude && !longitude {
            return None;
        }

        let mut resources = Vec::with_capacity(3);
        if latitude {
            resources.push(ResourceId::Latitude);
        }
        if longitude {
            resources.push(ResourceId::Longitude);
        }
        resources.push(ResourceId::Timestamp);

        Some(Self { resources })
    }

    /// The changed resources, in protocol order.
    pub fn resources(&self) -> &[ResourceId] {
        &self.resources
    }

    /// Numeric identifiers of the changed resources.
    pub fn resource_ids(&self) -> Vec<u16> {
        self.resources.iter().map(|r| r.id()).collect()
    }

    /// Check whether a given resource changed.
    pub fn contains(&self, resource: ResourceId) -> bool {
        self.resources.contains(&resource)
    }
}

impl std::fmt::Display for ChangeEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, resource) in self.resources.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", resource)?;
        }
        write!(f, "}}")
    }
}

/// Value of a single resource returned by a read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResourceValue {
    /// Coordinate in decimal degrees.
    Float(f64),
    /// Point in time (UTC).
    Time(DateTime<Utc>),
}

impl ResourceValue {
    /// Get the float value, if this is a coordinate.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Time(_) => None,
        }
    }

    /// Get the time value, if this is a timestamp.
    pub fn as_time(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Time(t) => Some(*t),
            Self::Float(_) => None,
        }
    }
}

impl std::fmt::Display for ResourceValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Float(v) => write!(f, "{}", v),
            Self::Time(t) => write!(f, "{}", t.to_rfc3339()),
        }
    }
}
