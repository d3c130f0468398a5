//! Warehouse location addressing and the map grid

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Aisles drawn on the warehouse map
pub const MAP_AISLES: [char; 5] = ['A', 'B', 'C', 'D', 'E'];

/// Shelves drawn on the warehouse map
pub const MAP_SHELVES: [u8; 5] = [1, 2, 3, 4, 5];

/// A parsed location code such as `A1-B2`.
///
/// Aisles are stored uppercase. Values outside the map bounds are valid
/// locations; they just never light up a map cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Location {
    primary_aisle: char,
    primary_shelf: u8,
    secondary_aisle: char,
    secondary_shelf: u8,
}

impl Location {
    /// Build a location from its parts. Aisles must be letters A-Z (either
    /// case) and shelves single digits, so the code always parses back.
    pub fn new(primary_aisle: char, primary_shelf: u8, secondary_aisle: char, secondary_shelf: u8) -> CoreResult<Self> {
        match (side(primary_aisle, primary_shelf), side(secondary_aisle, secondary_shelf)) {
            (Some((primary_aisle, primary_shelf)), Some((secondary_aisle, secondary_shelf))) => Ok(Self {
                primary_aisle,
                primary_shelf,
                secondary_aisle,
                secondary_shelf,
            }),
            _ => Err(CoreError::MalformedLocation(format!(
                "{}{}-{}{}",
                primary_aisle, primary_shelf, secondary_aisle, secondary_shelf
            ))),
        }
    }

    /// Known-good literals for the seed data
    pub(crate) const fn fixed(primary_aisle: char, primary_shelf: u8, secondary_aisle: char, secondary_shelf: u8) -> Self {
        Self {
            primary_aisle,
            primary_shelf,
            secondary_aisle,
            secondary_shelf,
        }
    }

    pub fn primary_aisle(&self) -> char {
        self.primary_aisle
    }

    pub fn primary_shelf(&self) -> u8 {
        self.primary_shelf
    }

    pub fn secondary_aisle(&self) -> char {
        self.secondary_aisle
    }

    pub fn secondary_shelf(&self) -> u8 {
        self.secondary_shelf
    }

    /// Canonical string form, e.g. `A1-B2`
    pub fn code(&self) -> String {
        self.to_string()
    }

    /// Primary side, shown as "Aisle" on the map panel
    pub fn aisle_label(&self) -> String {
        format!("{}{}", self.primary_aisle, self.primary_shelf)
    }

    /// Secondary side, shown as "Shelf" on the map panel
    pub fn shelf_label(&self) -> String {
        format!("{}{}", self.secondary_aisle, self.secondary_shelf)
    }

    /// Whether the primary aisle/shelf falls inside the 5x5 map
    pub fn is_mapped(&self) -> bool {
        MAP_AISLES.contains(&self.primary_aisle) && MAP_SHELVES.contains(&self.primary_shelf)
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{}-{}{}",
            self.primary_aisle, self.primary_shelf, self.secondary_aisle, self.secondary_shelf
        )
    }
}

impl std::str::FromStr for Location {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_location(s)
    }
}

impl TryFrom<String> for Location {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        parse_location(&value)
    }
}

impl From<Location> for String {
    fn from(location: Location) -> Self {
        location.to_string()
    }
}

/// Parse a location code of the form `<Aisle><Shelf>-<Aisle><Shelf>`.
///
/// Surrounding whitespace is ignored and aisle letters are case-folded.
pub fn parse_location(raw: &str) -> CoreResult<Location> {
    let malformed = || CoreError::MalformedLocation(raw.to_string());

    let trimmed = raw.trim();
    let mut parts = trimmed.split('-');
    let (primary, secondary) = match (parts.next(), parts.next(), parts.next()) {
        (Some(primary), Some(secondary), None) => (primary, secondary),
        _ => return Err(malformed()),
    };

    let (primary_aisle, primary_shelf) = parse_side(primary).ok_or_else(malformed)?;
    let (secondary_aisle, secondary_shelf) = parse_side(secondary).ok_or_else(malformed)?;

    Ok(Location::fixed(primary_aisle, primary_shelf, secondary_aisle, secondary_shelf))
}

fn parse_side(raw: &str) -> Option<(char, u8)> {
    let mut chars = raw.chars();
    let aisle = chars.next()?;
    let shelf = chars.next()?.to_digit(10)?;
    if chars.next().is_some() {
        return None;
    }
    side(aisle, shelf as u8)
}

fn side(aisle: char, shelf: u8) -> Option<(char, u8)> {
    let aisle = aisle.to_ascii_uppercase();
    (aisle.is_ascii_uppercase() && shelf <= 9).then_some((aisle, shelf))
}

/// Two locations are nearby when they share a primary aisle
pub fn adjacent_aisle(a: &Location, b: &Location) -> bool {
    a.primary_aisle == b.primary_aisle
}

/// One cell of the warehouse map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridCell {
    pub aisle: char,
    pub shelf: u8,
    pub is_current: bool,
}

impl GridCell {
    pub fn label(&self) -> String {
        format!("{}{}", self.aisle, self.shelf)
    }
}

/// The 5x5 warehouse map, one column per aisle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarehouseGrid {
    pub location: Location,
    pub columns: Vec<Vec<GridCell>>,
}

impl WarehouseGrid {
    /// Grid for a raw location string; `None` means no location data is available
    pub fn for_raw(raw: &str) -> Option<Self> {
        parse_location(raw).ok().map(|location| warehouse_grid(&location))
    }

    /// Cells in column-major order
    pub fn cells(&self) -> impl Iterator<Item = &GridCell> {
        self.columns.iter().flatten()
    }

    /// The highlighted cell, if the location is on the map
    pub fn current(&self) -> Option<&GridCell> {
        self.cells().find(|cell| cell.is_current)
    }
}

/// Build the map grid for a location
pub fn warehouse_grid(location: &Location) -> WarehouseGrid {
    let columns = MAP_AISLES
        .iter()
        .map(|&aisle| {
            MAP_SHELVES
                .iter()
                .map(|&shelf| GridCell {
                    aisle,
                    shelf,
                    is_current: aisle == location.primary_aisle && shelf == location.primary_shelf,
                })
                .collect()
        })
        .collect();

    WarehouseGrid {
        location: *location,
        columns,
    }
}
