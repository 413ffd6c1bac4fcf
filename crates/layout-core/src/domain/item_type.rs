//! Item Types
//!
//! The fixed set of spatial and equipment item kinds, with their
//! presentation and grid footprint.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;

/// Item type determines hierarchy placement, footprint and appearance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    Building,
    Floor,
    Room,
    Computer,
    Server,
    NetworkSwitch,
    Router,
    Printer,
    Ups,
    Rack,
}

impl ItemType {
    pub const ALL: [ItemType; 10] = [
        ItemType::Building,
        ItemType::Floor,
        ItemType::Room,
        ItemType::Computer,
        ItemType::Server,
        ItemType::NetworkSwitch,
        ItemType::Router,
        ItemType::Printer,
        ItemType::Ups,
        ItemType::Rack,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Building => "building",
            ItemType::Floor => "floor",
            ItemType::Room => "room",
            ItemType::Computer => "computer",
            ItemType::Server => "server",
            ItemType::NetworkSwitch => "network_switch",
            ItemType::Router => "router",
            ItemType::Printer => "printer",
            ItemType::Ups => "ups",
            ItemType::Rack => "rack",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ItemType::Building => "Building",
            ItemType::Floor => "Floor",
            ItemType::Room => "Room",
            ItemType::Computer => "Computer",
            ItemType::Server => "Server",
            ItemType::NetworkSwitch => "Network Switch",
            ItemType::Router => "Router",
            ItemType::Printer => "Printer",
            ItemType::Ups => "UPS",
            ItemType::Rack => "Server Rack",
        }
    }

    /// Font Awesome icon class
    pub fn icon(&self) -> &'static str {
        match self {
            ItemType::Building => "fa-building",
            ItemType::Floor => "fa-layer-group",
            ItemType::Room => "fa-door-open",
            ItemType::Computer => "fa-desktop",
            ItemType::Server => "fa-server",
            ItemType::NetworkSwitch => "fa-network-wired",
            ItemType::Router => "fa-wifi",
            ItemType::Printer => "fa-print",
            ItemType::Ups => "fa-battery-full",
            ItemType::Rack => "fa-hdd",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            ItemType::Building => "#2c3e50",
            ItemType::Floor => "#3498db",
            ItemType::Room => "#e74c3c",
            ItemType::Computer => "#2ecc71",
            ItemType::Server => "#9b59b6",
            ItemType::NetworkSwitch => "#f39c12",
            ItemType::Router => "#1abc9c",
            ItemType::Printer => "#34495e",
            ItemType::Ups => "#27ae60",
            ItemType::Rack => "#8e44ad",
        }
    }

    /// Grid occupancy as (width, height) in cells
    pub fn footprint(&self) -> (u32, u32) {
        match self {
            ItemType::Building | ItemType::Floor => (3, 2),
            ItemType::Room => (2, 2),
            ItemType::Rack => (1, 2),
            _ => (1, 1),
        }
    }

    /// Buildings, floors and rooms contain other items
    pub fn can_have_children(&self) -> bool {
        matches!(self, ItemType::Building | ItemType::Floor | ItemType::Room)
    }

    pub fn is_equipment(&self) -> bool {
        !self.can_have_children()
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemType {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ItemType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| LayoutError::Decode(format!("unknown item type '{}'", s)))
    }
}

/// Operational state of a piece of equipment (display only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EquipmentStatus {
    /// System is turned on
    Active,
    /// Turned off but functional
    Inactive,
    /// Needs repair or replacement
    NonFunctional,
}

impl EquipmentStatus {
    pub fn css_class(&self) -> &'static str {
        match self {
            EquipmentStatus::Active => "status-active",
            EquipmentStatus::Inactive => "status-inactive",
            EquipmentStatus::NonFunctional => "status-non-functional",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EquipmentStatus::Active => "Active",
            EquipmentStatus::Inactive => "Inactive",
            EquipmentStatus::NonFunctional => "Non-Functional",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_type_serialization() {
        assert_eq!(ItemType::NetworkSwitch.as_str(), "network_switch");
        assert_eq!(serde_json::to_string(&ItemType::NetworkSwitch).unwrap(), "\"network_switch\"");
        assert_eq!("ups".parse::<ItemType>().unwrap(), ItemType::Ups);
        assert!("closet".parse::<ItemType>().is_err());
        for t in ItemType::ALL {
            assert_eq!(t.as_str().parse::<ItemType>().unwrap(), t);
        }
    }

    #[test]
    fn test_containers() {
        let containers: Vec<_> =
            ItemType::ALL.into_iter().filter(|t| t.can_have_children()).collect();
        assert_eq!(containers, vec![ItemType::Building, ItemType::Floor, ItemType::Room]);
        assert!(ItemType::Rack.is_equipment());
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::from_str::<EquipmentStatus>("\"non-functional\"").unwrap(),
            EquipmentStatus::NonFunctional
        );
        assert_eq!(EquipmentStatus::Inactive.css_class(), "status-inactive");
    }
}
