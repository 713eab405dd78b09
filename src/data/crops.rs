use crate::shared::*;

/// Populate the CropRegistry with every crop the farm can grow.
///
/// Both crops have four sprite stages, so they become harvestable at age 3.
/// Corn gains a full stage per watered day; tomato needs five days.
pub fn populate_crops(registry: &mut CropRegistry) {
    let crops = [
        CropDef {
            kind: CropKind::Corn,
            growth_rate: 1.0,
            stages: 4,
            y_offset: -16.0,
        },
        CropDef {
            kind: CropKind::Tomato,
            growth_rate: 0.7,
            stages: 4,
            y_offset: -8.0,
        },
    ];

    for def in crops {
        registry.crops.insert(def.kind, def);
    }
}

/// Registry with every crop already populated.
pub fn default_registry() -> CropRegistry {
    let mut registry = CropRegistry::default();
    populate_crops(&mut registry);
    registry
}
