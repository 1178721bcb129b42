//! Item catalog loader and equipment set construction.

use std::path::Path;

use castsim_core::{Equipment, ItemDefinition};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Item catalog structure for RON files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemCatalog {
    pub items: Vec<ItemDefinition>,
}

impl ItemCatalog {
    /// Looks an item up by its display name.
    pub fn get(&self, name: &str) -> Option<&ItemDefinition> {
        self.items.iter().find(|item| item.name == name)
    }

    /// Builds an equipment set from item names, in the given order.
    pub fn equipment_set<S: AsRef<str>>(&self, names: &[S]) -> LoadResult<Equipment> {
        let items = names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                self.get(name)
                    .cloned()
                    .ok_or_else(|| anyhow::anyhow!("Unknown item '{}'", name))
            })
            .collect::<LoadResult<Vec<_>>>()?;

        Equipment::new(items).map_err(|e| anyhow::anyhow!("Invalid equipment set: {}", e))
    }
}

/// Loader for item catalogs from RON files.
pub struct ItemLoader;

impl ItemLoader {
    /// Load item catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<ItemCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<ItemCatalog> {
        ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use castsim_core::{ActivationCooldown, ItemEffect, ItemId, ItemSlot};

    const CATALOG: &str = r#"(
        items: [
            (
                id: ItemId(28785),
                name: "The Lightning Capacitor",
                slot: trinket,
                activation: Some((effect: LightningCapacitor, cooldown: Always)),
            ),
            (
                id: ItemId(29370),
                name: "Icon of the Silver Crescent",
                slot: trinket,
                activation: Some((
                    effect: SpellDamage(amount: 155.0, duration_secs: 20),
                    cooldown: Seconds(120),
                )),
            ),
            (id: ItemId(28248), name: "Totem of the Void", slot: totem),
        ],
    )"#;

    #[test]
    fn parses_activations() {
        let catalog = ItemLoader::parse(CATALOG).unwrap();
        assert_eq!(catalog.items.len(), 3);

        let icon = catalog.get("Icon of the Silver Crescent").unwrap();
        assert_eq!(icon.slot, ItemSlot::Trinket);
        assert_eq!(
            icon.on_use(),
            Some((
                ItemEffect::SpellDamage {
                    amount: 155.0,
                    duration_secs: 20
                },
                120
            ))
        );
        let totem = catalog.get("Totem of the Void").unwrap();
        assert!(totem.activation.is_none());
        assert_eq!(
            catalog
                .get("The Lightning Capacitor")
                .and_then(|item| item.activation)
                .map(|activation| activation.cooldown),
            Some(ActivationCooldown::Always)
        );
    }

    #[test]
    fn equipment_set_keeps_requested_order() {
        let catalog = ItemLoader::parse(CATALOG).unwrap();
        let equipment = catalog
            .equipment_set(&["Totem of the Void", "The Lightning Capacitor"])
            .unwrap();

        let ids: Vec<_> = equipment.iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![ItemId(28248), ItemId(28785)]);
    }

    #[test]
    fn equipment_set_rejects_unknown_and_duplicate_items() {
        let catalog = ItemLoader::parse(CATALOG).unwrap();

        let err = catalog.equipment_set(&["Staff of Nonsense"]).unwrap_err();
        assert_eq!(err.to_string(), "Unknown item 'Staff of Nonsense'");

        let err = catalog
            .equipment_set(&["Totem of the Void", "Totem of the Void"])
            .unwrap_err();
        assert!(err.to_string().starts_with("Invalid equipment set"));
    }
}
