use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use serde::Serialize;

/// One named, range-constrained k-rate parameter as the host UI sees it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParamDescriptor {
    pub name: &'static str,
    pub default_value: f32,
    pub min_value: f32,
    pub max_value: f32,
}

impl ParamDescriptor {
    pub const fn new(name: &'static str, default_value: f32, min_value: f32, max_value: f32) -> Self {
        Self {
            name,
            default_value,
            min_value,
            max_value,
        }
    }

    /// Requested values are clamped into range rather than trusted;
    /// non-finite input falls back to the default.
    pub fn clamp(&self, value: f32) -> f32 {
        if !value.is_finite() {
            return self.default_value;
        }
        value.clamp(self.min_value, self.max_value)
    }
}

/// Look up a descriptor by name within one processor's table.
pub fn descriptor<'a>(table: &'a [ParamDescriptor], name: &str) -> Option<&'a ParamDescriptor> {
    table.iter().find(|d| d.name == name)
}

/// Parameter tables for every processor type, keyed by `node_type`, so a
/// host can enumerate the surface and auto-generate controls.
pub static REGISTRY: Lazy<FxHashMap<&'static str, &'static [ParamDescriptor]>> = Lazy::new(|| {
    let mut registry = FxHashMap::default();
    registry.insert(crate::nodes::delay::NODE_TYPE, crate::nodes::delay::PARAMETERS);
    registry.insert(crate::nodes::xtc::NODE_TYPE, crate::nodes::xtc::PARAMETERS);
    registry.insert(
        crate::nodes::mid_side::NODE_TYPE,
        crate::nodes::mid_side::PARAMETERS,
    );
    registry.insert(
        crate::nodes::automator::NODE_TYPE,
        crate::nodes::automator::PARAMETERS,
    );
    registry
});

pub fn descriptors_for(node_type: &str) -> Option<&'static [ParamDescriptor]> {
    REGISTRY.get(node_type).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_rejects_out_of_range_and_non_finite() {
        let d = ParamDescriptor::new("feedback", 0.0, -0.98, 0.98);
        assert_eq!(d.clamp(0.5), 0.5);
        assert_eq!(d.clamp(2.0), 0.98);
        assert_eq!(d.clamp(-2.0), -0.98);
        assert_eq!(d.clamp(f32::NAN), 0.0);
        assert_eq!(d.clamp(f32::INFINITY), 0.0);
    }

    #[test]
    fn registry_covers_every_processor_type() {
        for node_type in ["delay", "xtc", "midSide", "automator"] {
            let table = descriptors_for(node_type).unwrap();
            assert!(!table.is_empty());
            for d in table {
                assert!(d.min_value <= d.max_value);
                assert!(d.default_value >= d.min_value && d.default_value <= d.max_value);
            }
        }
    }
}
