//! Editor Configuration
//!
//! Injected by the page that hosts the editor. Every field has a default so
//! an empty object is a valid root-level configuration.

use serde::Deserialize;

use crate::domain::{Crumb, HierarchyLevel, ItemType};
use crate::error::{LayoutError, LayoutResult};
use crate::geometry::{GridSettings, GRID_COLUMNS, ROW_BUFFER};
use crate::sync::SaveStrategy;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Absolute origin of the API; empty means the page origin
    pub api_base: String,
    pub parent_id: Option<u64>,
    pub parent_type: Option<ItemType>,
    pub ancestors: Vec<Crumb>,
    pub grid_columns: u32,
    pub min_rows: u32,
    pub row_buffer: u32,
    pub cell_width_px: f64,
    pub cell_height_px: f64,
    pub save_strategy: SaveStrategy,
    pub toast_timeout_ms: u32,
    pub log_level: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            parent_id: None,
            parent_type: None,
            ancestors: Vec::new(),
            grid_columns: GRID_COLUMNS,
            min_rows: 8,
            row_buffer: ROW_BUFFER,
            cell_width_px: 90.0,
            cell_height_px: 90.0,
            save_strategy: SaveStrategy::PerItem,
            toast_timeout_ms: 5000,
            log_level: "info".to_string(),
        }
    }
}

impl EditorConfig {
    pub fn from_json(json: &str) -> LayoutResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| LayoutError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> LayoutResult<()> {
        if self.grid_columns == 0 {
            return Err(LayoutError::Config("grid_columns must be at least 1".into()));
        }
        if !(self.cell_width_px > 0.0 && self.cell_height_px > 0.0) {
            return Err(LayoutError::Config("cell sizes must be positive".into()));
        }
        match (self.parent_id, self.parent_type) {
            (Some(_), None) => {
                Err(LayoutError::Config("parent_id given without parent_type".into()))
            }
            (None, Some(_)) => {
                Err(LayoutError::Config("parent_type given without parent_id".into()))
            }
            _ => Ok(()),
        }
    }

    pub fn level(&self) -> HierarchyLevel {
        match (self.parent_id, self.parent_type) {
            (Some(id), Some(parent_type)) => {
                HierarchyLevel::child_of(id, parent_type, self.ancestors.clone())
            }
            _ => HierarchyLevel::root(),
        }
    }

    pub fn grid(&self) -> GridSettings {
        GridSettings {
            columns: self.grid_columns,
            min_rows: self.min_rows,
            row_buffer: self.row_buffer,
            cell_width_px: self.cell_width_px,
            cell_height_px: self.cell_height_px,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ParentKind, ParentRef};

    #[test]
    fn test_empty_object_is_root() {
        let config = EditorConfig::from_json("{}").unwrap();
        assert_eq!(config, EditorConfig::default());
        assert_eq!(config.level(), HierarchyLevel::root());
        assert_eq!(config.grid(), GridSettings::default());
    }

    #[test]
    fn test_child_level() {
        let config = EditorConfig::from_json(
            r#"{"parent_id": 7, "parent_type": "floor", "ancestors": [{"id": 2, "name": "HQ"}], "save_strategy": "bulk"}"#,
        )
        .unwrap();
        let level = config.level();
        assert_eq!(level.parent, ParentRef::Item(7));
        assert_eq!(level.parent_kind, ParentKind::Type(ItemType::Floor));
        assert_eq!(level.back_href(), "/layout/2/");
        assert_eq!(config.save_strategy, SaveStrategy::Bulk);
    }

    #[test]
    fn test_invalid_configs() {
        for json in [
            r#"{"grid_columns": 0}"#,
            r#"{"cell_width_px": 0}"#,
            r#"{"parent_id": 3}"#,
            r#"{"parent_type": "room"}"#,
            r#"{"parent_type": "garage", "parent_id": 1}"#,
        ] {
            assert!(
                matches!(EditorConfig::from_json(json), Err(LayoutError::Config(_))),
                "{}",
                json
            );
        }
    }
}
